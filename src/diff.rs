//! # Diff Module
//!
//! This module contains functionality for showing what an edit does to a
//! file, line by line. It backs the `--dump` and `--save-diff` options of the
//! mutation commands.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Manages per-line change rendering for edited files.
///
/// This struct handles:
/// - Echoing every line of an edited file to stdout, colored by whether it was
///   kept (green), removed (red) or inserted (cyan)
/// - Appending a plain `-`/`+`/` ` listing to a diff file
#[derive(Debug, Clone, Default)]
pub struct DiffManager {
  /// Whether to echo changes to the console
  pub dump: bool,

  /// File the listing is appended to, if any
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub fn new(dump: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self { dump, save_diff_path }
  }

  /// Whether this manager produces any output at all.
  pub const fn is_active(&self) -> bool {
    self.dump || self.save_diff_path.is_some()
  }

  /// Renders the change from `original` to `new` for `path`.
  ///
  /// Multiple files append to the same diff file, producing one consolidated
  /// listing per run.
  ///
  /// # Errors
  ///
  /// Returns an error if the diff file cannot be opened or written.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_active() {
      return Ok(());
    }

    let diff = TextDiff::from_lines(original, new);
    let mut diff_content = format!("Diff for {}:\n", path.display());

    for change in diff.iter_all_changes() {
      let line = change.to_string_lossy();
      let line = line.trim_end_matches(['\n', '\r']);

      if self.dump {
        match change.tag() {
          ChangeTag::Equal => println!("{}", line.if_supports_color(Stream::Stdout, |s| s.green())),
          ChangeTag::Delete => println!("{}", line.if_supports_color(Stream::Stdout, |s| s.red())),
          ChangeTag::Insert => println!("{}", line.if_supports_color(Stream::Stdout, |s| s.cyan())),
        }
      }

      let sign = match change.tag() {
        ChangeTag::Delete => '-',
        ChangeTag::Insert => '+',
        ChangeTag::Equal => ' ',
      };
      diff_content.push(sign);
      diff_content.push_str(line);
      diff_content.push('\n');
    }
    diff_content.push('\n');

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(diff_content.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}
