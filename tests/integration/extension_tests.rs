use dupehunter::build_extension_filter;
use dupehunter::duplicates::{DuplicateFinder, FinderConfig};
use dupehunter::scanner::{ExtensionFilter, WalkerConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn finder_for(filter: ExtensionFilter) -> DuplicateFinder {
    DuplicateFinder::new(FinderConfig::default().with_walker_config(WalkerConfig {
        extensions: filter,
        ..Default::default()
    }))
}

fn populate(root: &Path) {
    fs::create_dir_all(root.join("a")).unwrap();
    fs::create_dir_all(root.join("b")).unwrap();
    fs::write(root.join("a/foo.txt"), b"text dup").unwrap();
    fs::write(root.join("b/foo.txt"), b"text dup").unwrap();
    fs::write(root.join("a/foo.bin"), b"bin dup!").unwrap();
    fs::write(root.join("b/foo.bin"), b"bin dup!").unwrap();
}

#[test]
fn test_only_allowed_extension_considered() {
    let dir = tempdir().unwrap();
    populate(dir.path());

    let (groups, summary) = finder_for(ExtensionFilter::new(["txt"]))
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(groups.len(), 1);
    assert!(groups[0]
        .members
        .iter()
        .all(|p| p.extension().unwrap() == "txt"));
}

#[test]
fn test_without_filter_both_groups_found() {
    let dir = tempdir().unwrap();
    populate(dir.path());

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 2);
}

#[test]
fn test_extension_match_is_case_insensitive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("IMG_1.JPG"), b"jpeg").unwrap();
    fs::write(dir.path().join("img_2.jpg"), b"jpeg").unwrap();

    let (groups, _) = finder_for(ExtensionFilter::new([".Jpg"]))
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn test_scanlist_file_drives_filter() {
    let dir = tempdir().unwrap();
    populate(dir.path());
    let list = dir.path().join("scanlist.txt");
    fs::write(&list, "bin\n").unwrap();

    let filter = build_extension_filter(&[], Some(&list)).unwrap();
    let (groups, _) = finder_for(filter).find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0]
        .members
        .iter()
        .all(|p| p.extension().unwrap() == "bin"));
}
