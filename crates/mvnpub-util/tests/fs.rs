use mvnpub_util::fs::{find_ancestor_with, resolve_against, write_new};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_find_ancestor_with_walks_up() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Publish.toml"), "").unwrap();
    let nested = tmp.path().join("a/b/c");
    std::fs::create_dir_all(&nested).unwrap();

    let found = find_ancestor_with(&nested, "Publish.toml").unwrap();
    assert_eq!(found, tmp.path());
}

#[test]
fn test_find_ancestor_with_missing_returns_none() {
    let tmp = TempDir::new().unwrap();
    assert!(find_ancestor_with(tmp.path(), "does-not-exist-9f3a.toml").is_none());
}

#[test]
fn test_resolve_against_relative_and_absolute() {
    let base = Path::new("/project");
    assert_eq!(
        resolve_against(base, "build/libs/a.jar"),
        Path::new("/project/build/libs/a.jar")
    );
    assert_eq!(resolve_against(base, "/abs/a.jar"), Path::new("/abs/a.jar"));
}

#[test]
fn test_write_new_refuses_to_overwrite() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("file.txt");
    write_new(&path, "first").unwrap();
    let err = write_new(&path, "second").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
}
