//! # Detection Module
//!
//! This module contains the copyright and stale-year detectors used by the
//! classifier. The copyright check sits behind a trait so the classifier can
//! be handed a different notion of "has a copyright notice" without changes.

/// Trait for copyright detectors.
///
/// Implementations decide whether a file's content carries a copyright
/// notice. The result feeds the Copyright Index.
pub trait CopyrightDetector: Send + Sync {
  /// Checks if the content has a copyright notice.
  fn has_copyright(&self, content: &str) -> bool;
}

/// Default copyright detector.
///
/// Searches the *whole* content for the word "copyright", ignoring case. Unlike
/// the stale-year check this is not limited to the header window.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleCopyrightDetector;

impl SimpleCopyrightDetector {
  pub const fn new() -> Self {
    SimpleCopyrightDetector
  }
}

impl CopyrightDetector for SimpleCopyrightDetector {
  fn has_copyright(&self, content: &str) -> bool {
    content.to_lowercase().contains("copyright")
  }
}

/// Flags content whose header window mentions a recent, past year.
///
/// A file is outdated when any year in `[current_year - years_back,
/// current_year - 1]` appears as a substring of its first `header_lines`
/// lines. The range never reaches below year 0.
#[derive(Debug, Clone)]
pub struct StaleYearDetector {
  stale_years: Vec<String>,
  header_lines: usize,
}

impl StaleYearDetector {
  /// Creates a detector for the `years_back` years preceding `current_year`.
  pub fn new(current_year: i32, years_back: u32, header_lines: usize) -> Self {
    let first = current_year
      .saturating_sub(i32::try_from(years_back).unwrap_or(i32::MAX))
      .max(0);
    let stale_years = (first..current_year).map(|year| year.to_string()).collect();
    Self {
      stale_years,
      header_lines,
    }
  }

  /// The year strings considered stale, oldest first.
  pub fn stale_years(&self) -> &[String] {
    &self.stale_years
  }

  /// Checks if the header window mentions any stale year.
  pub fn is_outdated(&self, content: &str) -> bool {
    if self.stale_years.is_empty() {
      return false;
    }
    let header = header_window(content, self.header_lines);
    self.stale_years.iter().any(|year| header.contains(year.as_str()))
  }
}

/// Returns the first `lines` lines of `content`, split on `\n`, without the
/// separator that follows the last kept line.
pub fn header_window(content: &str, lines: usize) -> &str {
  if lines == 0 {
    return "";
  }
  match content.match_indices('\n').nth(lines - 1) {
    Some((idx, _)) => &content[..idx],
    None => content,
  }
}
