//! # Category Module
//!
//! The fixed, closed set of labels a scanned file can carry, and the
//! selection type used by commands to pick one label or all of them.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::UprightError;

/// Classification label assigned to a source file.
///
/// Exactly one *structural* category is assigned per readable file, based on
/// the shape of its leading content. [`Category::Outdated`] is an orthogonal
/// tag and [`Category::Broken`] holds files that could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Shebang,
  Docstring,
  Empty,
  Hash,
  Unknown,
  Imports,
  Broken,
  Comment,
  Outdated,
}

impl Category {
  /// Every category, in canonical order.
  pub const ALL: [Category; 9] = [
    Category::Shebang,
    Category::Docstring,
    Category::Empty,
    Category::Hash,
    Category::Unknown,
    Category::Imports,
    Category::Broken,
    Category::Comment,
    Category::Outdated,
  ];

  /// Returns the lowercase name used on the command line and in reports.
  pub const fn as_str(self) -> &'static str {
    match self {
      Category::Shebang => "shebang",
      Category::Docstring => "docstring",
      Category::Empty => "empty",
      Category::Hash => "hash",
      Category::Unknown => "unknown",
      Category::Imports => "imports",
      Category::Broken => "broken",
      Category::Comment => "comment",
      Category::Outdated => "outdated",
    }
  }

  /// Whether this label partitions the scanned files.
  ///
  /// `outdated` is a tag that co-occurs with a structural category.
  pub const fn is_structural(self) -> bool {
    !matches!(self, Category::Outdated)
  }

  /// Names of all categories, for diagnostics.
  pub fn names() -> Vec<&'static str> {
    Self::ALL.iter().map(|c| c.as_str()).collect()
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Category {
  type Err = UprightError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .iter()
      .copied()
      .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| UprightError::CategoryNotFound(s.to_string()))
  }
}

/// Which category lists a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelection {
  /// Every category list.
  #[default]
  All,
  /// A single category list.
  Only(Category),
}

impl FromStr for CategorySelection {
  type Err = UprightError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.trim().eq_ignore_ascii_case("all") {
      Ok(CategorySelection::All)
    } else {
      s.parse().map(CategorySelection::Only)
    }
  }
}

impl fmt::Display for CategorySelection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CategorySelection::All => f.write_str("all"),
      CategorySelection::Only(category) => category.fmt(f),
    }
  }
}
