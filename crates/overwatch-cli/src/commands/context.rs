//! Context command: the snapshot a driver reads before a run

use crate::context::Workspace;
use crate::error::Result;

/// Run the context command, printing the run context as JSON.
pub fn run_context(workspace: &Workspace, name: &str) -> Result<()> {
    let context = workspace.manager().run_context(name)?;
    println!("{}", serde_json::to_string_pretty(&context)?);
    Ok(())
}
