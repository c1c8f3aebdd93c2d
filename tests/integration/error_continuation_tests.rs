use dupehunter::duplicates::DuplicateFinder;
use dupehunter::scanner::{FileRecord, HashError, ScanError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_vanished_candidates_are_reported_not_fatal() {
    let finder = DuplicateFinder::with_defaults();
    let records = vec![
        FileRecord::new(PathBuf::from("nonexistent_1.txt"), 100),
        FileRecord::new(PathBuf::from("nonexistent_2.txt"), 100),
    ];

    let (groups, summary) = finder.find_duplicates_from_records(records);

    assert!(groups.is_empty());
    assert_eq!(summary.hash_errors.len(), 2);
    assert_eq!(summary.hashed_files, 0);
    for err in &summary.hash_errors {
        assert!(matches!(err, HashError::NotFound(_)), "unexpected: {:?}", err);
    }
}

#[test]
fn test_failed_member_drops_out_but_others_still_grouped() {
    let dir = tempdir().unwrap();
    let mut records = Vec::new();
    for name in ["a", "b", "c"] {
        let path = dir.path().join(name);
        fs::write(&path, b"shared").unwrap();
        records.push(FileRecord::new(path, 6));
    }
    fs::remove_file(dir.path().join("b")).unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults().find_duplicates_from_records(records);

    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].members,
        vec![dir.path().join("a"), dir.path().join("c")]
    );
    assert_eq!(summary.hash_errors.len(), 1);
}

#[test]
fn test_missing_root_reported_and_other_roots_scanned() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one"), b"dup").unwrap();
    fs::write(dir.path().join("two"), b"dup").unwrap();
    let missing = dir.path().join("does-not-exist");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[missing.clone(), dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(summary.scan_errors.len(), 1);
    assert!(matches!(&summary.scan_errors[0], ScanError::NotFound(p) if *p == missing));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_excluded_and_sibling_left_alone() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("file.bin");
    let sibling = dir.path().join("sibling.bin");
    fs::write(&locked, b"same size").unwrap();
    fs::write(&sibling, b"same size").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if fs::File::open(&locked).is_ok() {
        // Running with privileges that ignore file modes.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.hashed_files, 1);
    assert!(matches!(
        &summary.hash_errors[..],
        [HashError::PermissionDenied(p)] if *p == locked
    ));
}
