use overwatch_fs::{NormalizedPath, validate_path_identifier};
use rstest::rstest;

#[test]
fn test_parent_and_file_name() {
    let path = NormalizedPath::new("/workspace/agents/disk-watch/state.json");
    assert_eq!(path.file_name(), Some("state.json"));
    assert_eq!(
        path.parent().unwrap().as_str(),
        "/workspace/agents/disk-watch"
    );
    assert_eq!(NormalizedPath::new("/workspace").parent().unwrap().as_str(), "/");
}

#[test]
fn test_extension() {
    assert_eq!(NormalizedPath::new("a/state.json").extension(), Some("json"));
    assert_eq!(NormalizedPath::new("a/overwatch.toml").extension(), Some("toml"));
    assert_eq!(NormalizedPath::new("a/.lock").extension(), None);
    assert_eq!(NormalizedPath::new("a/README").extension(), None);
}

#[test]
fn test_canonicalize_missing_path_fails() {
    let temp = tempfile::tempdir().unwrap();
    let missing = NormalizedPath::new(temp.path().join("missing"));
    assert!(missing.canonicalize().is_err());
}

#[test]
fn test_canonicalize_existing_dir() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path());
    let canonical = path.canonicalize().unwrap();
    assert!(canonical.is_dir());
}

#[rstest]
#[case("disk-watch")]
#[case("api_latency")]
#[case("prod.db.replica1")]
#[case("A")]
fn test_valid_identifiers(#[case] name: &str) {
    assert!(validate_path_identifier(name, "Agent name").is_ok());
}

#[rstest]
#[case("")]
#[case(".")]
#[case("..")]
#[case(".hidden")]
#[case("a/b")]
#[case("a\\b")]
#[case("has space")]
#[case("emoji🚀")]
fn test_invalid_identifiers(#[case] name: &str) {
    let err = validate_path_identifier(name, "Agent name").unwrap_err();
    assert!(err.starts_with("Agent name"), "unexpected message: {}", err);
}

#[test]
fn test_identifier_length_limit() {
    let long = "a".repeat(129);
    assert!(validate_path_identifier(&long, "Agent name").is_err());
    assert!(validate_path_identifier(&"a".repeat(128), "Agent name").is_ok());
}
