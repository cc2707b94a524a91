use assert_fs::prelude::*;
use blueprint_copy::build_index;

#[test]
fn colliding_basenames_resolve_to_one_of_the_candidates() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("one/same.png").write_str("first").unwrap();
    temp.child("two/same.png").write_str("second").unwrap();
    temp.child("two/unique.png").touch().unwrap();

    let index = build_index(temp.path()).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.collisions(), 1);

    let hit = index.get("same.png").expect("indexed");
    let candidates = [temp.path().join("one/same.png"), temp.path().join("two/same.png")];
    assert!(candidates.iter().any(|c| c == hit), "unexpected path {}", hit.display());
}

#[test]
fn directories_are_not_indexed() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("folder.png").create_dir_all().unwrap();
    temp.child("folder.png/inside.png").touch().unwrap();

    let index = build_index(temp.path()).unwrap();
    assert!(index.get("folder.png").is_none());
    assert!(index.get("inside.png").is_some());
}

#[test]
fn empty_tree_gives_empty_index() {
    let temp = assert_fs::TempDir::new().unwrap();
    let index = build_index(temp.path()).unwrap();
    assert!(index.is_empty());
    assert_eq!(index.iter().count(), 0);
}
