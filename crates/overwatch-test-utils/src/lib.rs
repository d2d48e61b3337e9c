//! Shared test utilities for the overwatch workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`workspace`]: [`TestWorkspace`] temp directory with raw file helpers
//! - [`fixtures`]: JSON run records as an external driver would produce them

pub mod fixtures;
pub mod workspace;

pub use workspace::TestWorkspace;
