//! # Editor Module
//!
//! Applies the text transformations from [`crate::transform`] to a selected
//! file set. Every file is read completely and closed before it is opened for
//! writing, and nothing is written unless write mode is on.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::classifier::FileIO;
use crate::diff::DiffManager;
use crate::error::UprightError;
use crate::output::{self, Highlight};
use crate::transform;
use crate::verbose_log;

/// When a file is rewritten in write mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
  /// Rewrite every inspected file, even if its content did not change.
  Always,
  /// Rewrite only files whose content changed.
  WhenChanged,
}

/// Counters for one mutation command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditSummary {
  /// Files read and transformed
  pub inspected: usize,
  /// Files whose content differs after the transformation
  pub modified: usize,
  /// Files actually written to disk
  pub written: usize,
  /// Files skipped because they could not be read
  pub skipped: usize,
}

/// Runs mutation commands over a file set in dry-run or write mode.
pub struct Editor {
  write: bool,
  diff_manager: DiffManager,
}

impl Editor {
  /// Creates an editor. With `write` off, no file is ever touched.
  pub const fn new(write: bool, diff_manager: DiffManager) -> Self {
    Self { write, diff_manager }
  }

  pub const fn is_write_mode(&self) -> bool {
    self.write
  }

  /// Removes every line starting with `prefix` from each file.
  ///
  /// In write mode every inspected file is rewritten, changed or not.
  pub fn remove_prefixed_lines(&self, files: &[PathBuf], prefix: &str) -> Result<EditSummary> {
    verbose_log!("Removing lines starting with {:?}", prefix);
    self.apply(files, WritePolicy::Always, |content| {
      transform::strip_prefixed_lines(content, prefix)
    })
  }

  /// Removes the leading block of `#` and blank lines from each file.
  ///
  /// In write mode every inspected file is rewritten, changed or not.
  pub fn remove_leading_comments(&self, files: &[PathBuf]) -> Result<EditSummary> {
    self.apply(files, WritePolicy::Always, transform::strip_leading_comments)
  }

  /// Replaces `from` with `to` within the first `header_lines` lines of each
  /// file. Only changed files are rewritten.
  ///
  /// # Errors
  ///
  /// Returns [`UprightError::EmptyYearToken`] before touching any file if
  /// either token is empty.
  pub fn update_years(&self, files: &[PathBuf], from: &str, to: &str, header_lines: usize) -> Result<EditSummary> {
    if from.is_empty() || to.is_empty() {
      return Err(
        UprightError::EmptyYearToken {
          from: from.to_string(),
          to: to.to_string(),
        }
        .into(),
      );
    }

    verbose_log!("Updating {} to {} in the first {} lines", from, to, header_lines);
    self.apply(files, WritePolicy::WhenChanged, |content| {
      transform::replace_year_in_header(content, from, to, header_lines)
    })
  }

  /// Inserts already rendered `text` before line `line` of each file.
  ///
  /// In write mode every inspected file is rewritten.
  pub fn insert_text(&self, files: &[PathBuf], text: &str, line: usize) -> Result<EditSummary> {
    self.apply(files, WritePolicy::Always, |content| {
      transform::insert_at_line(content, text, line)
    })
  }

  fn apply<F>(&self, files: &[PathBuf], policy: WritePolicy, transform: F) -> Result<EditSummary>
  where
    F: for<'a> Fn(&'a str) -> Cow<'a, str>,
  {
    let mut summary = EditSummary::default();

    for path in files {
      output::print_file_banner(path, Highlight::Magenta);

      let content = match FileIO::read_full_content(path) {
        Ok(content) => content,
        Err(e) => {
          warn!("Skipping file: {}", e);
          summary.skipped += 1;
          continue;
        }
      };

      summary.inspected += 1;
      let new_content = transform(&content);
      let changed = new_content != content;
      if changed {
        summary.modified += 1;
      }

      self.diff_manager.display_diff(path, &content, &new_content)?;

      if self.should_write(policy, changed) {
        self.write_file(path, &new_content)?;
        summary.written += 1;
      }
    }

    debug!(
      "Inspected {} files, {} modified, {} written, {} skipped",
      summary.inspected, summary.modified, summary.written, summary.skipped
    );
    Ok(summary)
  }

  const fn should_write(&self, policy: WritePolicy, changed: bool) -> bool {
    self.write
      && match policy {
        WritePolicy::Always => true,
        WritePolicy::WhenChanged => changed,
      }
  }

  fn write_file(&self, path: &Path, content: &str) -> Result<()> {
    verbose_log!("Writing file: {}", path.display());
    FileIO::write_file(path, content).with_context(|| format!("Aborted while editing {}", path.display()))
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  fn write_files(dir: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
    files
      .iter()
      .map(|(name, content)| {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
      })
      .collect()
  }

  #[test]
  fn test_dry_run_never_writes() {
    let temp_dir = tempdir().unwrap();
    let files = write_files(temp_dir.path(), &[("a.py", "# a\nb\n")]);

    let editor = Editor::new(false, DiffManager::default());
    let summary = editor.remove_prefixed_lines(&files, "# ").unwrap();

    assert_eq!(summary.inspected, 1);
    assert_eq!(summary.modified, 1);
    assert_eq!(summary.written, 0);
    assert_eq!(fs::read_to_string(&files[0]).unwrap(), "# a\nb\n");
  }

  #[test]
  fn test_remove_prefixed_lines_writes_every_file() {
    let temp_dir = tempdir().unwrap();
    let files = write_files(temp_dir.path(), &[("a.py", "# a\nb\n# c\n"), ("b.py", "x = 1\n")]);

    let editor = Editor::new(true, DiffManager::default());
    let summary = editor.remove_prefixed_lines(&files, "# ").unwrap();

    assert_eq!(summary.modified, 1);
    assert_eq!(summary.written, 2);
    assert_eq!(fs::read_to_string(&files[0]).unwrap(), "b\n");
    assert_eq!(fs::read_to_string(&files[1]).unwrap(), "x = 1\n");
  }

  #[test]
  fn test_remove_leading_comments() {
    let temp_dir = tempdir().unwrap();
    let files = write_files(temp_dir.path(), &[("a.py", "# h1\n\n# h2\ncode()\n# trailing\n")]);

    let editor = Editor::new(true, DiffManager::default());
    editor.remove_leading_comments(&files).unwrap();
    assert_eq!(fs::read_to_string(&files[0]).unwrap(), "code()\n# trailing\n");

    let summary = editor.remove_leading_comments(&files).unwrap();
    assert_eq!(summary.modified, 0);
    assert_eq!(fs::read_to_string(&files[0]).unwrap(), "code()\n# trailing\n");
  }

  #[test]
  fn test_update_years_only_writes_changed_files() {
    let temp_dir = tempdir().unwrap();
    let files = write_files(
      temp_dir.path(),
      &[("a.py", "# 2023\nx = 2023\ny = 1\nz = 2023"), ("b.py", "# 2025\n")],
    );

    let editor = Editor::new(true, DiffManager::default());
    let summary = editor.update_years(&files, "2023", "2024", 3).unwrap();

    assert_eq!(summary.inspected, 2);
    assert_eq!(summary.modified, 1);
    assert_eq!(summary.written, 1);
    assert_eq!(
      fs::read_to_string(&files[0]).unwrap(),
      "# 2024\nx = 2024\ny = 1\nz = 2023"
    );
  }

  #[test]
  fn test_update_years_rejects_empty_tokens() {
    let temp_dir = tempdir().unwrap();
    let files = write_files(temp_dir.path(), &[("a.py", "# 2023\n")]);

    let editor = Editor::new(true, DiffManager::default());
    let err = editor.update_years(&files, "", "2024", 20).unwrap_err();

    assert!(matches!(
      err.downcast_ref::<UprightError>(),
      Some(UprightError::EmptyYearToken { .. })
    ));
    assert_eq!(fs::read_to_string(&files[0]).unwrap(), "# 2023\n");
  }

  #[test]
  fn test_insert_text() {
    let temp_dir = tempdir().unwrap();
    let files = write_files(temp_dir.path(), &[("a.py", "a\nb\n"), ("b.py", "")]);

    let editor = Editor::new(true, DiffManager::default());
    let summary = editor.insert_text(&files, "HEADER\n", 0).unwrap();

    assert_eq!(summary.modified, 2);
    assert_eq!(fs::read_to_string(&files[0]).unwrap(), "HEADER\na\nb\n");
    assert_eq!(fs::read_to_string(&files[1]).unwrap(), "HEADER\n");
  }

  #[test]
  fn test_unreadable_file_is_skipped() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("binary.py");
    fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

    let editor = Editor::new(true, DiffManager::default());
    let summary = editor.remove_leading_comments(&[path.clone()]).unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.inspected, 0);
    assert_eq!(fs::read(&path).unwrap(), vec![0xff, 0xfe, 0x00]);
  }
}
