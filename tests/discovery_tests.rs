//! Controller discovery scan coverage:
//! - file stems anywhere in the tree become discoverable names
//! - dot-free entries are treated as subdirectories and recursed into
//! - the single excluded directory name is skipped at any depth
//! - matching is case-sensitive
//! - an unreadable root is a directory error, not an empty result

use lantern::discovery::{controller_exists, scan_controllers};
use lantern::error::FrameworkError;

#[test]
fn scan_collects_stems_recursively() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("home.page"), "").unwrap();
    let nested = dir.path().join("admin");
    std::fs::create_dir(&nested).unwrap();
    std::fs::write(nested.join("blog.page"), "").unwrap();

    let names = scan_controllers(dir.path(), "private").unwrap();
    assert!(names.contains("home"));
    assert!(names.contains("blog"));
    assert_eq!(names.len(), 2);
}

#[test]
fn excluded_directory_is_skipped_at_any_depth() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("home.page"), "").unwrap();

    let hidden = dir.path().join("admin").join("private");
    std::fs::create_dir_all(&hidden).unwrap();
    std::fs::write(hidden.join("secret.page"), "").unwrap();

    let names = scan_controllers(dir.path(), "private").unwrap();
    assert!(names.contains("home"));
    assert!(!names.contains("secret"));
}

#[test]
fn name_matching_is_case_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Blog.page"), "").unwrap();

    assert!(controller_exists(dir.path(), "Blog", "private").unwrap());
    assert!(!controller_exists(dir.path(), "blog", "private").unwrap());
}

#[test]
fn unreadable_root_is_an_error_not_an_empty_set() {
    let dir = tempfile::tempdir().unwrap();
    let err = scan_controllers(&dir.path().join("absent"), "private").unwrap_err();
    assert!(matches!(err, FrameworkError::DirectoryUnreadable { .. }));
    assert_eq!(err.code(), 1005);
}
