use overwatch_fs::{NormalizedPath, RobustnessConfig, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_publish_atomic_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("agents/disk-watch/state.json"));

    io::publish_atomic(&path, b"{\"status\":\"active\"}", RobustnessConfig::default()).unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "{\"status\":\"active\"}");
}

#[test]
fn test_publish_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("state.json");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::publish_atomic(&path, b"updated", RobustnessConfig::default()).unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_publish_atomic_without_fsync() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("run.json"));
    let config = RobustnessConfig {
        enable_fsync: false,
        ..RobustnessConfig::default()
    };

    io::publish_atomic(&path, b"[]", config).unwrap();

    assert_eq!(fs::read_to_string(path.to_native()).unwrap(), "[]");
    assert!(
        !temp.path().join("run.json.lock").exists(),
        "publish_atomic should not create a lock file"
    );
}

#[test]
fn test_read_text_existing_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("instruction.md");
    fs::write(&file_path, "Watch the disk").unwrap();

    let path = NormalizedPath::new(&file_path);
    let content = io::read_text(&path).unwrap();
    assert_eq!(content, "Watch the disk");
}

#[test]
fn test_read_text_nonexistent_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("missing.md"));
    let err = io::read_text(&path).unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got: {}", err);
}

#[test]
fn test_list_entries_is_sorted() {
    let temp = TempDir::new().unwrap();
    for name in ["000003-b.json", "000001-a.json", "000002-c.json"] {
        fs::write(temp.path().join(name), "{}").unwrap();
    }

    let names = io::list_entries(&NormalizedPath::new(temp.path())).unwrap();
    assert_eq!(
        names,
        vec!["000001-a.json", "000002-c.json", "000003-b.json"]
    );
}
