use dupehunter::actions::{DeleteMethod, GroupOutcome, Resolver, SKIP_CHOICE};
use dupehunter::duplicates::{DuplicateFinder, FinderConfig};
use dupehunter::prompt::{LineSelector, PromptError};
use dupehunter::scanner::WalkerConfig;
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

#[test]
fn test_selected_copy_deleted_others_kept() {
    let dir = tempdir().unwrap();
    for name in ["x", "y", "z"] {
        fs::write(dir.path().join(name), b"triplet content").unwrap();
    }
    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(groups.len(), 1);

    // [0] Skip!, [1] x, [2] y, [3] z
    let mut selector = LineSelector::new(Cursor::new("2\n"), Vec::new());
    let mut resolver = Resolver::new(DeleteMethod::Remove);
    let report = resolver.resolve_all(&groups, &mut selector).unwrap();

    assert_eq!(report.deleted_count(), 1);
    assert!(dir.path().join("x").exists());
    assert!(!dir.path().join("y").exists());
    assert!(dir.path().join("z").exists());
    assert!(resolver.is_resolved(&groups[0].digest));

    let shown = String::from_utf8(selector.into_output()).unwrap();
    assert!(shown.contains(&format!("[0] {}", SKIP_CHOICE)));
    assert!(shown.contains("[3]"));

    // Same digest again: no prompt, so empty input is never read.
    let mut silent = LineSelector::new(Cursor::new(""), Vec::new());
    let again = resolver.resolve_all(&groups, &mut silent).unwrap();
    assert!(again.resolutions.is_empty());
    assert_eq!(again.repeats, 1);
}

#[test]
fn test_skip_every_group() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a1"), b"aaa").unwrap();
    fs::write(dir.path().join("a2"), b"aaa").unwrap();
    fs::write(dir.path().join("b1"), b"bbbbb").unwrap();
    fs::write(dir.path().join("b2"), b"bbbbb").unwrap();
    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(groups.len(), 2);

    let mut selector = LineSelector::new(Cursor::new("0\n0\n"), Vec::new());
    let report = Resolver::default().resolve_all(&groups, &mut selector).unwrap();

    assert_eq!(report.skipped_count(), 2);
    assert_eq!(report.bytes_freed(), 0);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 4);
}

#[test]
fn test_file_changed_after_scan_is_not_deleted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"original").unwrap();
    fs::write(dir.path().join("b"), b"original").unwrap();
    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    fs::write(dir.path().join("a"), b"original plus edits").unwrap();

    let mut selector = LineSelector::new(Cursor::new("1\n"), Vec::new());
    let report = Resolver::default().resolve_all(&groups, &mut selector).unwrap();

    assert_eq!(report.failed_count(), 1);
    assert!(matches!(
        report.resolutions[0].outcome,
        GroupOutcome::DeleteFailed(_)
    ));
    assert!(dir.path().join("a").exists());
}

#[test]
fn test_input_closed_aborts_resolution() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"same").unwrap();
    fs::write(dir.path().join("b"), b"same").unwrap();
    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    let mut selector = LineSelector::new(Cursor::new(""), Vec::new());
    let err = Resolver::default()
        .resolve_all(&groups, &mut selector)
        .unwrap_err();

    assert!(matches!(err, PromptError::InputClosed));
    assert!(dir.path().join("a").exists());
    assert!(dir.path().join("b").exists());
}

#[cfg(unix)]
#[test]
fn test_followed_link_member_can_be_deleted() {
    let dir = tempdir().unwrap();
    let content = vec![42u8; 1000];
    fs::write(dir.path().join("z_target"), &content).unwrap();
    fs::write(dir.path().join("m_copy"), &content).unwrap();
    std::os::unix::fs::symlink(dir.path().join("z_target"), dir.path().join("a_link")).unwrap();

    let config = FinderConfig::default().with_walker_config(WalkerConfig {
        follow_symlinks: true,
        ..Default::default()
    });
    let (groups, _) = DuplicateFinder::new(config)
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(groups.len(), 1);
    // The link sorts first, so it stands in for its target.
    assert_eq!(
        groups[0].members,
        vec![dir.path().join("a_link"), dir.path().join("m_copy")]
    );

    let mut selector = LineSelector::new(Cursor::new("1\n"), Vec::new());
    let report = Resolver::new(DeleteMethod::Remove)
        .resolve_all(&groups, &mut selector)
        .unwrap();

    assert!(
        matches!(report.resolutions[0].outcome, GroupOutcome::Deleted(_)),
        "unexpected: {:?}",
        report.resolutions[0].outcome
    );
    assert!(fs::symlink_metadata(dir.path().join("a_link")).is_err());
    assert_eq!(fs::read(dir.path().join("z_target")).unwrap(), content);
    assert!(dir.path().join("m_copy").exists());
}
