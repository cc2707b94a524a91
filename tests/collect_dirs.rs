//! Collect mode: copy whole source directories that hold requested names.

use assert_fs::prelude::*;
use blueprint_copy::{CopyOptions, Mode, copy_matching_dirs};

#[test]
fn matched_directory_is_copied_with_its_subtree() -> Result<(), Box<dyn std::error::Error>> {
    let temp = assert_fs::TempDir::new()?;
    let src = temp.child("src");
    src.child("sub1/x.png").write_str("x")?;
    src.child("sub1/notes.txt").write_str("n")?;
    src.child("sub1/inner/deeper.bin").write_str("d")?;
    src.child("sub2/unrelated.png").write_str("u")?;
    let dest = temp.child("dest");

    let report = copy_matching_dirs(&["x.png", "y.png"], src.path(), dest.path(), &CopyOptions::default())?;

    assert_eq!(report.mode, Mode::Collect);
    assert_eq!(report.total, 2);
    assert_eq!(report.copied, 1);
    assert_eq!(report.unresolved, vec!["y.png".to_string()]);
    assert!(report.failures.is_empty());

    dest.child("sub1/x.png").assert("x");
    dest.child("sub1/notes.txt").assert("n");
    dest.child("sub1/inner/deeper.bin").assert("d");
    assert!(!dest.path().join("sub2").exists());
    Ok(())
}

#[test]
fn shared_directory_is_copied_once() -> Result<(), Box<dyn std::error::Error>> {
    let temp = assert_fs::TempDir::new()?;
    let src = temp.child("src");
    src.child("a/b/one.png").write_str("1")?;
    src.child("a/b/two.png").write_str("2")?;
    let dest = temp.child("dest");

    let names = vec!["one.png".to_string(), "two.png".to_string()];
    let report = copy_matching_dirs(&names, src.path(), dest.path(), &CopyOptions::default())?;

    assert_eq!(report.copied, 1);
    dest.child("a/b/one.png").assert("1");
    dest.child("a/b/two.png").assert("2");
    Ok(())
}

#[test]
fn dry_run_reports_without_writing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = assert_fs::TempDir::new()?;
    let src = temp.child("src");
    src.child("sub1/x.png").touch()?;
    let dest = temp.child("dest");

    let opts = CopyOptions {
        dry_run: true,
        ..CopyOptions::default()
    };
    let report = copy_matching_dirs(&["x.png"], src.path(), dest.path(), &opts)?;

    assert!(report.dry_run);
    assert_eq!(report.copied, 1);
    assert!(!dest.path().exists());
    Ok(())
}

#[test]
fn missing_source_root_is_a_traversal_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let err = copy_matching_dirs(
        &["x.png"],
        &temp.path().join("missing"),
        &temp.path().join("dest"),
        &CopyOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), "traversal");
}

#[test]
fn nested_match_is_copied_once_with_its_parent() -> Result<(), Box<dyn std::error::Error>> {
    let temp = assert_fs::TempDir::new()?;
    let src = temp.child("src");
    src.child("sub1/x.png").write_str("x")?;
    src.child("sub1/deep/y.png").write_str("y")?;
    let dest = temp.child("dest");

    let report = copy_matching_dirs(&["x.png", "y.png"], src.path(), dest.path(), &CopyOptions::default())?;

    assert_eq!(report.copied, 1);
    assert!(report.failures.is_empty());
    dest.child("sub1/x.png").assert("x");
    dest.child("sub1/deep/y.png").assert("y");
    Ok(())
}

#[test]
fn destination_may_be_the_parent_of_the_source() -> Result<(), Box<dyn std::error::Error>> {
    let temp = assert_fs::TempDir::new()?;
    let pics = temp.child("pics");
    pics.child("src/sub1/1.png").write_str("1")?;

    let report = copy_matching_dirs(&["1.png"], pics.child("src").path(), pics.path(), &CopyOptions::default())?;

    assert_eq!(report.copied, 1);
    pics.child("sub1/1.png").assert("1");
    pics.child("src/sub1/1.png").assert("1");
    Ok(())
}
