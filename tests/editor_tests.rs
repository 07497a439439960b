mod common;

use std::fs;

use anyhow::Result;
use common::{create_python_tree, current_year, write_file};
use tempfile::tempdir;
use upright::category::{Category, CategorySelection};
use upright::classifier::{Classifier, ScanOptions};
use upright::diff::DiffManager;
use upright::editor::Editor;

#[test]
fn test_update_outdated_category_end_to_end() -> Result<()> {
  let temp_dir = tempdir()?;
  create_python_tree(temp_dir.path())?;
  let (now, previous) = (current_year(), current_year() - 1);

  let working_set = Classifier::new(ScanOptions::new(temp_dir.path()))?.scan()?;
  let files = working_set
    .select(CategorySelection::Only(Category::Outdated), None)
    .files();

  let editor = Editor::new(true, DiffManager::default());
  let summary = editor.update_years(&files, &previous.to_string(), &now.to_string(), 20)?;
  assert_eq!((summary.inspected, summary.modified), (1, 1));

  let content = fs::read_to_string(temp_dir.path().join("shebang.py"))?;
  assert_eq!(
    content,
    format!("#!/usr/bin/env python\n# Copyright (C) 2011-{now} Someone\nprint('hi')\n")
  );

  // A second scan finds nothing outdated, and a second update changes nothing.
  let working_set = Classifier::new(ScanOptions::new(temp_dir.path()))?.scan()?;
  assert!(working_set.files(Category::Outdated).is_empty());
  let summary = editor.update_years(&files, &previous.to_string(), &now.to_string(), 20)?;
  assert_eq!(summary.modified, 0);
  Ok(())
}

#[test]
fn test_update_all_touches_each_file_once() -> Result<()> {
  let temp_dir = tempdir()?;
  create_python_tree(temp_dir.path())?;

  let working_set = Classifier::new(ScanOptions::new(temp_dir.path()))?.scan()?;
  let files = working_set.select(CategorySelection::All, None).files();

  // shebang.py is listed under shebang and outdated; broken.py is unreadable.
  let editor = Editor::new(false, DiffManager::default());
  let summary = editor.update_years(&files, "2011", "2012", 20)?;
  assert_eq!(summary.inspected, 8);
  assert_eq!(summary.skipped, 1);
  assert_eq!(summary.modified, 1);
  Ok(())
}

#[test]
fn test_remove_prefix_is_idempotent() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "a.py", "# a\nb\n# c\n")?;
  let files = vec![temp_dir.path().join("a.py")];

  let editor = Editor::new(true, DiffManager::default());
  editor.remove_prefixed_lines(&files, "# ")?;
  let once = fs::read_to_string(&files[0])?;
  editor.remove_prefixed_lines(&files, "# ")?;
  let twice = fs::read_to_string(&files[0])?;

  assert_eq!(once, "b\n");
  assert_eq!(once, twice);
  Ok(())
}

#[test]
fn test_remove_comment_on_hash_category() -> Result<()> {
  let temp_dir = tempdir()?;
  create_python_tree(temp_dir.path())?;

  let working_set = Classifier::new(ScanOptions::new(temp_dir.path()))?.scan()?;
  let files = working_set
    .select(CategorySelection::Only(Category::Hash), None)
    .files();

  Editor::new(true, DiffManager::default()).remove_leading_comments(&files)?;

  assert_eq!(fs::read_to_string(temp_dir.path().join("hash.py"))?, "x = 1\n");
  // Other categories are untouched.
  assert!(fs::read_to_string(temp_dir.path().join("shebang.py"))?.starts_with("#!/"));
  Ok(())
}

#[cfg(unix)]
#[test]
fn test_write_failure_aborts_after_earlier_files_are_written() -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "a.py", "x = 1\n")?;
  write_file(temp_dir.path(), "b.py", "y = 2\n")?;
  let files = vec![temp_dir.path().join("a.py"), temp_dir.path().join("b.py")];

  // Make the second file read-only
  let mut perms = fs::metadata(&files[1])?.permissions();
  perms.set_mode(0o444);
  fs::set_permissions(&files[1], perms)?;

  // Privileged users ignore file modes; nothing to check then.
  if fs::OpenOptions::new().write(true).open(&files[1]).is_ok() {
    return Ok(());
  }

  let result = Editor::new(true, DiffManager::default()).insert_text(&files, "# Header\n", 0);

  // Restore permissions for cleanup
  let mut perms = fs::metadata(&files[1])?.permissions();
  perms.set_mode(0o644);
  fs::set_permissions(&files[1], perms)?;

  assert!(result.is_err(), "Should fail for unwritable file");
  assert_eq!(fs::read_to_string(&files[0])?, "# Header\nx = 1\n");
  assert_eq!(fs::read_to_string(&files[1])?, "y = 2\n");
  Ok(())
}

#[test]
fn test_dry_run_with_saved_diff() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "a.py", "x = 1\n")?;
  let files = vec![temp_dir.path().join("a.py")];
  let diff_path = temp_dir.path().join("changes.diff");

  let editor = Editor::new(false, DiffManager::new(false, Some(diff_path.clone())));
  let summary = editor.insert_text(&files, "# Header\n", 0)?;

  assert_eq!(summary.modified, 1);
  assert_eq!(summary.written, 0);
  assert_eq!(fs::read_to_string(&files[0])?, "x = 1\n");
  let diff = fs::read_to_string(&diff_path)?;
  assert!(diff.contains("+# Header\n x = 1\n"));
  Ok(())
}
