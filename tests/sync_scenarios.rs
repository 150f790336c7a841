//! End-to-end synchronization scenarios
//!
//! These tests drive full runs against a real directory tree while keeping
//! the attributes in a MemoryStore, so they behave the same on every platform.

use dropbignore::{
    run, ChangeKind, DropbignoreError, MemoryStore, Runner, SyncConfig, SyncReport,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

fn make_tree(root: &Path, dirs: &[&str]) -> std::io::Result<()> {
    for dir in dirs {
        fs::create_dir_all(root.join(dir))?;
    }
    Ok(())
}

fn write_ignore(root: &Path, content: &str) -> std::io::Result<()> {
    fs::write(root.join(".dropbignore"), content)
}

fn changes(report: &SyncReport, kind: &ChangeKind) -> Vec<PathBuf> {
    report
        .records_of(kind)
        .map(|r| r.relative_path.clone())
        .collect()
}

fn project_tree() -> anyhow::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    make_tree(
        temp_dir.path(),
        &["src/__pycache__", "src/node_modules/pkg", "docs"],
    )?;
    write_ignore(temp_dir.path(), "__pycache__/\nnode_modules/\n")?;
    Ok(temp_dir)
}

#[test]
fn test_marks_matching_directories() -> anyhow::Result<()> {
    let temp_dir = project_tree()?;
    let root = temp_dir.path();
    let store = MemoryStore::new();
    let config = SyncConfig::new(root);
    let visited = Mutex::new(Vec::new());

    let report = Runner::new(&config, &store)
        .with_progress(|node| visited.lock().unwrap().push(node.relative_path.clone()))
        .run()?;

    assert_eq!(
        changes(&report, &ChangeKind::Set),
        vec![PathBuf::from("src/__pycache__"), PathBuf::from("src/node_modules")]
    );
    assert_eq!(report.cleared, 0);
    assert_eq!(report.failed, 0);
    assert_eq!(report.scanned, 4);

    // The ignored folder's children are never visited
    let visited = visited.into_inner().unwrap();
    assert!(!visited.contains(&PathBuf::from("src/node_modules/pkg")));
    assert!(visited.contains(&PathBuf::from("docs")));

    assert_eq!(
        store.ignored_paths(),
        vec![root.join("src/__pycache__"), root.join("src/node_modules")]
    );

    Ok(())
}

#[test]
fn test_second_run_changes_nothing() -> anyhow::Result<()> {
    let temp_dir = project_tree()?;
    let store = MemoryStore::new();
    let config = SyncConfig::new(temp_dir.path());

    let first = run(&config, &store)?;
    assert_eq!(first.changes(), 2);
    let writes = store.write_count();

    let second = run(&config, &store)?;
    assert!(second.records.is_empty());
    assert_eq!(second.already_ignored, 2);
    assert_eq!(store.write_count(), writes);

    Ok(())
}

#[test]
fn test_removed_pattern_clears_attribute() -> anyhow::Result<()> {
    let temp_dir = project_tree()?;
    let root = temp_dir.path();
    let store = MemoryStore::new();
    let config = SyncConfig::new(root);

    run(&config, &store)?;

    write_ignore(root, "node_modules/\n")?;
    let report = run(&config, &store)?;

    assert_eq!(
        changes(&report, &ChangeKind::Clear),
        vec![PathBuf::from("src/__pycache__")]
    );
    assert_eq!(report.set, 0);
    assert_eq!(store.ignored_paths(), vec![root.join("src/node_modules")]);

    Ok(())
}

#[test]
fn test_missing_root_is_fatal_and_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let store = MemoryStore::new();
    let config = SyncConfig::new(temp_dir.path().join("Dropbox"));

    let err = run(&config, &store).unwrap_err();

    assert!(matches!(err, DropbignoreError::RootNotFound { .. }));
    assert!(err.is_config_error());
    assert_eq!(store.write_count(), 0);
}

#[test]
fn test_root_that_is_a_file_is_fatal() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let file = temp_dir.path().join("not-a-dir");
    fs::write(&file, "")?;

    let err = run(&SyncConfig::new(&file), &MemoryStore::new()).unwrap_err();
    assert!(matches!(err, DropbignoreError::RootNotDirectory { .. }));

    Ok(())
}

#[test]
fn test_missing_ignore_file_clears_previous_marks() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    make_tree(root, &["old"])?;
    let store = MemoryStore::new().with_ignored(root.join("old"));

    let report = run(&SyncConfig::new(root), &store)?;

    assert_eq!(changes(&report, &ChangeKind::Clear), vec![PathBuf::from("old")]);
    assert!(store.ignored_paths().is_empty());

    Ok(())
}

#[test]
fn test_anchored_pattern_only_at_root() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    make_tree(root, &["build", "sub/build", "a/b/build"])?;
    write_ignore(root, "/build/\n")?;

    let report = run(&SyncConfig::new(root), &MemoryStore::new())?;
    assert_eq!(changes(&report, &ChangeKind::Set), vec![PathBuf::from("build")]);

    write_ignore(root, "build/\n")?;
    let report = run(&SyncConfig::new(root), &MemoryStore::new())?;
    assert_eq!(
        changes(&report, &ChangeKind::Set),
        vec![
            PathBuf::from("a/b/build"),
            PathBuf::from("build"),
            PathBuf::from("sub/build")
        ]
    );

    Ok(())
}

#[test]
fn test_builtin_cache_pattern_always_applies() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    make_tree(root, &[".dropbox.cache/old", "photos"])?;

    let report = run(&SyncConfig::new(root), &MemoryStore::new())?;
    assert_eq!(
        changes(&report, &ChangeKind::Set),
        vec![PathBuf::from(".dropbox.cache")]
    );

    let without = SyncConfig::new(root).with_builtin_patterns(Vec::<String>::new());
    let report = run(&without, &MemoryStore::new())?;
    assert!(report.records.is_empty());

    Ok(())
}

#[test]
fn test_attribute_failures_do_not_abort() -> anyhow::Result<()> {
    let temp_dir = project_tree()?;
    let root = temp_dir.path();
    let store = MemoryStore::new();
    store.fail_on(root.join("src/__pycache__"));

    let report = run(&SyncConfig::new(root), &store)?;

    assert_eq!(report.failed, 1);
    assert_eq!(report.set, 1);
    assert!(report.has_failures());

    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, root.join("src/__pycache__").as_path());
    assert!(failures[0].1.contains("permission denied"));

    Ok(())
}

#[test]
fn test_dry_run_reports_without_writing() -> anyhow::Result<()> {
    let temp_dir = project_tree()?;
    let store = MemoryStore::new();

    let report = run(&SyncConfig::new(temp_dir.path()).dry_run(true), &store)?;

    assert!(report.dry_run);
    assert_eq!(report.set, 2);
    assert_eq!(store.write_count(), 0);
    assert!(store.ignored_paths().is_empty());

    Ok(())
}

#[test]
fn test_parallel_run_matches_sequential() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    for i in 0..20 {
        let target = format!("proj{:02}/target/debug", i);
        let src = format!("proj{:02}/src", i);
        make_tree(root, &[target.as_str(), src.as_str()])?;
    }
    write_ignore(root, "target/\n")?;

    let sequential = run(&SyncConfig::new(root), &MemoryStore::new())?;
    let parallel = run(&SyncConfig::new(root).parallel(true), &MemoryStore::new())?;

    assert_eq!(parallel.records, sequential.records);
    assert_eq!(parallel.scanned, sequential.scanned);
    assert_eq!(parallel.set, 20);

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_recorded() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    make_tree(root, &["locked/inner", "open"])?;
    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000))?;

    // Root can read anything, so there is nothing to observe
    let readable = fs::read_dir(root.join("locked")).is_ok();

    let report = run(&SyncConfig::new(root), &MemoryStore::new());
    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755))?;
    let report = report?;

    if !readable {
        assert_eq!(report.traversal_errors.len(), 1);
        assert_eq!(report.traversal_errors[0].path, root.join("locked"));
        assert!(report.has_failures());
    }
    assert_eq!(report.scanned, if readable { 3 } else { 2 });

    Ok(())
}

#[test]
fn test_vanished_directory_is_recorded_and_run_continues() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    make_tree(root, &["a", "b/inner", "c"])?;
    write_ignore(root, "c/\n")?;

    // The listing of "b" is read after "a" is reported, so it is gone by then
    let doomed = root.join("b");
    let config = SyncConfig::new(root);
    let store = MemoryStore::new();
    let report = Runner::new(&config, &store)
        .with_progress(|node| {
            if node.relative_path == Path::new("a") {
                fs::remove_dir_all(&doomed).unwrap();
            }
        })
        .run()?;

    let error_paths: Vec<_> = report.traversal_errors.iter().map(|e| e.path.clone()).collect();
    assert!(error_paths.contains(&root.join("b")));
    assert!(report.has_failures());
    assert_eq!(changes(&report, &ChangeKind::Set), vec![PathBuf::from("c")]);
    assert_eq!(store.ignored_paths(), vec![root.join("c")]);

    Ok(())
}
