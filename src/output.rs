//! # Output Module
//!
//! This module centralizes all user-facing output for upright.
//! It provides consistent formatting and colors for terminal output.
//!
//! ## Design Goals
//!
//! - **Scannable**: Category headings and file banners separate the output
//! - **Colored by state**: Green means a copyright notice is present, yellow or
//!   red means something needs attention
//! - **Scriptable**: With `-q`, only file paths and raw headers are printed

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::category::Category;
use crate::classifier::{CategoryStats, Selection, WorkingSet};
use crate::editor::EditSummary;
use crate::logging::is_quiet;

/// Width of file banners.
const BANNER_WIDTH: usize = 79;

/// How many trailing characters of a path a banner shows.
const BANNER_PATH_CHARS: usize = 50;

/// Colors used for banners and file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
  Green,
  Yellow,
  Red,
  Magenta,
  Cyan,
}

impl Highlight {
  /// Green for files with a copyright notice, `otherwise` for the rest.
  pub const fn for_copyright(has_copyright: bool, otherwise: Highlight) -> Self {
    if has_copyright { Highlight::Green } else { otherwise }
  }

  fn paint(self, text: &str) -> String {
    match self {
      Highlight::Green => text.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
      Highlight::Yellow => text.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string(),
      Highlight::Red => text.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
      Highlight::Magenta => text.if_supports_color(Stream::Stdout, |s| s.magenta()).to_string(),
      Highlight::Cyan => text.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string(),
    }
  }
}

/// Formats a banner line: the last characters of the path, padded with `*`
/// on both sides.
pub fn file_banner(path: &Path) -> String {
  let path = path.to_string_lossy();
  let skip = path.chars().count().saturating_sub(BANNER_PATH_CHARS);
  let tail: String = path.chars().skip(skip).collect();
  format!("{:*^width$}", format!(" {} ", tail), width = BANNER_WIDTH)
}

/// Formats the heading printed above each category list.
pub fn category_heading(category: Category) -> String {
  format!("{} {:>9} {}", "=".repeat(34), category.as_str(), "=".repeat(34))
}

/// Formats one statistics row.
pub fn stats_line(label: &str, files: usize, without_copyright: usize) -> String {
  format!("{:>10} : {:>4} ({:>4} without copyright)", label, files, without_copyright)
}

/// Print a banner for a file (respects quiet mode).
pub fn print_file_banner(path: &Path, highlight: Highlight) {
  if is_quiet() {
    return;
  }

  println!("{}", highlight.paint(&file_banner(path)));
}

/// Print the heading for a category list (respects quiet mode).
pub fn print_category_heading(category: Category) {
  if is_quiet() {
    return;
  }

  println!("{}", Highlight::Cyan.paint(&category_heading(category)));
}

/// Print per-category statistics followed by the total line.
///
/// A row is green when every file in it has a copyright notice, yellow
/// otherwise.
pub fn print_stats(stats: &[CategoryStats], total: (usize, usize)) {
  for row in stats {
    let color = Highlight::for_copyright(row.without_copyright == 0, Highlight::Yellow);
    println!(
      "{}",
      color.paint(&stats_line(row.category.as_str(), row.files, row.without_copyright))
    );
  }

  let (files, without_copyright) = total;
  let color = Highlight::for_copyright(without_copyright == 0, Highlight::Yellow);
  println!("{}", color.paint(&stats_line("total", files, without_copyright)));
}

/// Print every selected category with its files, green when the file has a
/// copyright notice and red otherwise.
///
/// In quiet mode only the file paths are printed.
pub fn print_lists(selection: &Selection, working_set: &WorkingSet) {
  for (category, files) in selection.lists() {
    print_category_heading(category);
    for path in files {
      let color = Highlight::for_copyright(working_set.has_copyright(path), Highlight::Red);
      println!("{}", color.paint(&path.to_string_lossy()));
    }
  }
}

/// Print a file header under its banner.
pub fn print_header(path: &Path, header: &str, highlight: Highlight) {
  print_file_banner(path, highlight);
  println!("{}", header);
}

/// Print the result line of the year updater.
pub fn print_update_summary(summary: &EditSummary) {
  let line = format!("All files: {} Modified files: {}", summary.inspected, summary.modified);
  println!("{}", Highlight::Red.paint(&line));
}

/// Print the result of a removal or insertion command (respects quiet mode).
pub fn print_edit_summary(action: &str, summary: &EditSummary, write: bool) {
  if is_quiet() {
    return;
  }

  let files_word = if summary.inspected == 1 { "file" } else { "files" };
  let mut line = format!(
    "{}: {} {} inspected, {} changed",
    action, summary.inspected, files_word, summary.modified
  );
  if summary.skipped > 0 {
    line.push_str(&format!(", {} unreadable", summary.skipped));
  }
  println!("{}", line);

  if !write && summary.modified > 0 {
    print_hint("Dry run, nothing was written. Use --write to apply the changes.");
  }
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_file_banner_short_path() {
    let banner = file_banner(Path::new("./a.py"));
    assert_eq!(banner.chars().count(), BANNER_WIDTH);
    assert!(banner.contains(" ./a.py "));
    assert!(banner.starts_with('*'));
    assert!(banner.ends_with('*'));
  }

  #[test]
  fn test_file_banner_truncates_from_the_left() {
    let long = format!("./{}/tail.py", "deep/".repeat(20));
    let banner = file_banner(Path::new(&long));
    assert!(banner.contains("tail.py "));
    assert!(!banner.contains("./deep"));
    assert_eq!(banner.chars().count(), BANNER_WIDTH);
  }

  #[test]
  fn test_category_heading() {
    let heading = category_heading(Category::Hash);
    assert_eq!(heading, format!("{}      hash {}", "=".repeat(34), "=".repeat(34)));
    assert_eq!(heading.len(), 79);
  }

  #[test]
  fn test_stats_line() {
    assert_eq!(stats_line("shebang", 12, 3), "   shebang :   12 (   3 without copyright)");
    assert_eq!(stats_line("total", 1234, 0), "     total : 1234 (   0 without copyright)");
  }
}
