mod common;

use std::path::{Path, PathBuf};

use anyhow::Result;
use common::{create_python_tree, current_year, write_file};
use tempfile::tempdir;
use upright::category::{Category, CategorySelection};
use upright::classifier::{Classifier, ScanOptions, WorkingSet};
use upright::error::UprightError;

fn scan(root: &Path, ignore: &[&str]) -> Result<WorkingSet> {
  let options = ScanOptions {
    ignore_patterns: ignore.iter().map(|p| p.to_string()).collect(),
    ..ScanOptions::new(root)
  };
  Ok(Classifier::new(options)?.scan()?)
}

fn names(files: &std::collections::BTreeSet<PathBuf>) -> Vec<String> {
  files
    .iter()
    .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
    .collect()
}

#[test]
fn test_every_file_lands_in_exactly_one_structural_category() -> Result<()> {
  let temp_dir = tempdir()?;
  create_python_tree(temp_dir.path())?;

  let working_set = scan(temp_dir.path(), &[])?;

  for path in working_set.total() {
    let containing: Vec<Category> = working_set
      .lists()
      .filter(|(category, files)| category.is_structural() && files.contains(path))
      .map(|(category, _)| category)
      .collect();
    assert_eq!(containing.len(), 1, "{} is in {:?}", path.display(), containing);
  }

  assert_eq!(working_set.total().len(), 8);
  assert_eq!(names(working_set.files(Category::Shebang)), ["shebang.py"]);
  assert_eq!(names(working_set.files(Category::Docstring)), ["docstring.py"]);
  assert_eq!(names(working_set.files(Category::Imports)), ["imports.py", "six.py"]);
  assert_eq!(names(working_set.files(Category::Hash)), ["hash.py"]);
  assert_eq!(names(working_set.files(Category::Empty)), ["empty.py"]);
  assert_eq!(names(working_set.files(Category::Comment)), ["comment.py"]);
  assert_eq!(names(working_set.files(Category::Unknown)), ["unknown.py"]);
  Ok(())
}

#[test]
fn test_broken_files_are_only_in_broken() -> Result<()> {
  let temp_dir = tempdir()?;
  create_python_tree(temp_dir.path())?;

  let working_set = scan(temp_dir.path(), &[])?;
  let broken = temp_dir.path().join("broken.py");

  assert!(working_set.files(Category::Broken).contains(&broken));
  assert!(!working_set.total().contains(&broken));
  assert!(!working_set.has_copyright(&broken));
  let record = working_set.records().iter().find(|r| r.path == broken).unwrap();
  assert_eq!(record.category, Category::Broken);
  Ok(())
}

#[test]
fn test_copyright_index_and_outdated_tag() -> Result<()> {
  let temp_dir = tempdir()?;
  create_python_tree(temp_dir.path())?;

  let working_set = scan(temp_dir.path(), &[])?;

  assert_eq!(working_set.copyright_index().len(), 2);
  assert!(working_set.has_copyright(&temp_dir.path().join("shebang.py")));
  assert!(working_set.has_copyright(&temp_dir.path().join("hash.py")));
  assert_eq!(names(working_set.files(Category::Outdated)), ["shebang.py"]);
  Ok(())
}

#[test]
fn test_outdated_only_looks_at_header_window() -> Result<()> {
  let temp_dir = tempdir()?;
  let stale = current_year() - 2;
  let content = format!("{}# Copyright {stale}\n", "x = 1\n".repeat(5));
  write_file(temp_dir.path(), "late.py", &content)?;

  let narrow = ScanOptions {
    header_lines: 3,
    ..ScanOptions::new(temp_dir.path())
  };
  let working_set = Classifier::new(narrow)?.scan()?;
  assert!(working_set.files(Category::Outdated).is_empty());
  // The copyright search is not limited to the window.
  assert_eq!(working_set.copyright_index().len(), 1);

  let wide = ScanOptions {
    header_lines: 6,
    ..ScanOptions::new(temp_dir.path())
  };
  let working_set = Classifier::new(wide)?.scan()?;
  assert_eq!(working_set.files(Category::Outdated).len(), 1);
  Ok(())
}

#[test]
fn test_ignore_patterns_search_full_path() -> Result<()> {
  let temp_dir = tempdir()?;
  create_python_tree(temp_dir.path())?;

  let working_set = scan(temp_dir.path(), &["vendor", "^.*broken"])?;

  assert_eq!(names(working_set.files(Category::Imports)), ["imports.py"]);
  assert!(working_set.files(Category::Broken).is_empty());
  assert_eq!(working_set.total().len(), 7);
  Ok(())
}

#[test]
fn test_invalid_ignore_pattern() {
  let options = ScanOptions {
    ignore_patterns: vec!["[".to_string()],
    ..ScanOptions::new(".")
  };
  assert!(matches!(
    Classifier::new(options),
    Err(UprightError::InvalidIgnorePattern { .. })
  ));
}

#[test]
fn test_other_file_types() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "main.rs", "/* Copyright 2020 */\nfn main() {}\n")?;
  write_file(temp_dir.path(), "script.py", "import os\n")?;

  let options = ScanOptions {
    file_type: ".rs".to_string(),
    ..ScanOptions::new(temp_dir.path())
  };
  let working_set = Classifier::new(options)?.scan()?;

  assert_eq!(working_set.total().len(), 1);
  assert_eq!(names(working_set.files(Category::Comment)), ["main.rs"]);
  Ok(())
}

#[test]
fn test_rescan_is_deterministic() -> Result<()> {
  let temp_dir = tempdir()?;
  create_python_tree(temp_dir.path())?;

  let first = scan(temp_dir.path(), &[])?;
  let second = scan(temp_dir.path(), &[])?;

  for category in Category::ALL {
    assert_eq!(first.files(category), second.files(category));
  }
  Ok(())
}

#[test]
fn test_selection_by_category_and_file() -> Result<()> {
  let temp_dir = tempdir()?;
  create_python_tree(temp_dir.path())?;
  let working_set = scan(temp_dir.path(), &[])?;

  let selection = working_set.select(CategorySelection::Only(Category::Imports), None);
  assert_eq!(selection.files().len(), 2);

  let shebang = temp_dir.path().join("shebang.py");
  let selection = working_set.select(CategorySelection::All, Some(&shebang));
  // Listed under shebang and outdated, selected once.
  assert_eq!(selection.files(), vec![shebang]);
  Ok(())
}
