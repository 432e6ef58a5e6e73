// tests/discover.rs

use std::collections::BTreeSet;
use std::path::PathBuf;

use gowatch::errors::GowatchError;
use gowatch::fs::RealFileSystem;
use gowatch::watch::discover_directories;
use gowatch_test_utils::ProjectTree;

#[test]
fn returns_exactly_the_directories() {
    let tree = ProjectTree::new("root")
        .with_dir("a/b")
        .with_file("x.go", "package main\n");

    let dirs = discover_directories(&RealFileSystem, tree.root()).unwrap();

    let expected: BTreeSet<PathBuf> = [tree.root().to_path_buf(), tree.path("a"), tree.path("a/b")]
        .into_iter()
        .collect();
    assert_eq!(dirs, expected);
}

#[test]
fn discovery_from_a_subdirectory_only_covers_that_subtree() {
    let tree = ProjectTree::new("proj")
        .with_dir("left/deep")
        .with_dir("right");

    let dirs = discover_directories(&RealFileSystem, &tree.path("left")).unwrap();
    assert_eq!(dirs.len(), 2);
    assert!(dirs.contains(&tree.path("left/deep")));
    assert!(!dirs.contains(&tree.path("right")));
}

#[test]
fn missing_root_fails_with_traversal_error() {
    let tree = ProjectTree::new("proj");
    let missing = tree.path("gone");

    match discover_directories(&RealFileSystem, &missing) {
        Err(GowatchError::Traversal { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Traversal error, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_not_followed() {
    let tree = ProjectTree::new("proj").with_dir("real/inner");
    std::os::unix::fs::symlink(tree.path("real"), tree.path("link")).unwrap();

    let dirs = discover_directories(&RealFileSystem, tree.root()).unwrap();
    assert!(dirs.contains(&tree.path("real/inner")));
    assert!(!dirs.contains(&tree.path("link")));
    assert!(!dirs.contains(&tree.path("link/inner")));
}
