use dupehunter::duplicates::{DuplicateFinder, FinderConfig};
use dupehunter::scanner::{FileRecord, WalkerConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write(path: &std::path::Path, content: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_identical_pair_grouped_and_unique_size_never_hashed() {
    let dir = tempdir().unwrap();
    let content = [7u8; 100];
    let a = write(&dir.path().join("a"), &content);
    let b = write(&dir.path().join("b"), &content);
    write(&dir.path().join("c"), &[1u8; 50]);

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members, vec![a, b]);
    assert_eq!(groups[0].size, 100);
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.hashed_files, 2);
    assert_eq!(summary.reclaimable_space, 100);
}

#[test]
fn test_same_size_different_content_not_grouped() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), &[1u8; 100]);
    write(&dir.path().join("b"), &[2u8; 100]);

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.hashed_files, 2);
}

#[test]
fn test_nested_directories_and_multiple_groups() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("one/x.txt"), b"alpha");
    write(&dir.path().join("two/deep/y.txt"), b"alpha");
    write(&dir.path().join("one/p.dat"), b"bravo bravo");
    write(&dir.path().join("two/q.dat"), b"bravo bravo");
    write(&dir.path().join("two/r.dat"), b"bravo bravo");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 2);
    let mut lens: Vec<usize> = groups.iter().map(|g| g.len()).collect();
    lens.sort_unstable();
    assert_eq!(lens, vec![2, 3]);
    assert_eq!(summary.duplicate_files, 3);
    for group in &groups {
        assert!(group.members.iter().all(|p| fs::metadata(p).unwrap().len() == group.size));
    }
}

#[test]
fn test_empty_files_are_duplicates_of_each_other() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("e1"), b"");
    write(&dir.path().join("e2"), b"");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 0);
    assert_eq!(summary.reclaimable_space, 0);
}

#[test]
fn test_hidden_files_included_unless_skipped() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("visible"), b"same bytes");
    write(&dir.path().join(".hidden"), b"same bytes");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(groups.len(), 1);

    let config = FinderConfig::default().with_walker_config(WalkerConfig {
        skip_hidden: true,
        ..Default::default()
    });
    let (groups, summary) = DuplicateFinder::new(config)
        .find_duplicates(dir.path())
        .unwrap();
    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[test]
fn test_duplicates_across_roots() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    let l = write(&left.path().join("photo.jpg"), b"pixels");
    let r = write(&right.path().join("copy.jpg"), b"pixels");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[left.path().to_path_buf(), right.path().to_path_buf()])
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members, vec![l, r]);
}

#[test]
fn test_rescan_is_idempotent() {
    let dir = tempdir().unwrap();
    for i in 0..4 {
        write(&dir.path().join(format!("d{}/f", i)), b"repeated");
    }
    write(&dir.path().join("other"), b"12345678");

    let finder = DuplicateFinder::with_defaults();
    let (first, _) = finder.find_duplicates(dir.path()).unwrap();
    let (second, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_from_records_with_io_threads() {
    let dir = tempdir().unwrap();
    let records: Vec<FileRecord> = (0..10)
        .map(|i| {
            let path = write(&dir.path().join(format!("f{}", i)), format!("{}", i % 2).as_bytes());
            FileRecord::new(path, 1)
        })
        .collect();

    let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(3));
    let (groups, summary) = finder.find_duplicates_from_records(records.clone());

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].members[0], records[0].path);
    assert_eq!(groups[1].members[0], records[1].path);
    assert_eq!(summary.duplicate_files, 8);
}
