//! # File Filter Module
//!
//! This module contains components for deciding which files the classifier
//! looks at: ignore patterns (regular expressions searched in the full path)
//! and the target file-type suffix.

use std::path::Path;

use regex::Regex;
use tracing::trace;

use crate::error::UprightError;

/// Result of a file filtering operation.
#[derive(Debug)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  fn should_process(&self, path: &Path) -> FilterResult;
}

/// Filter that excludes files whose path matches any ignore pattern.
///
/// Patterns are regular expressions and are *searched* in the full path, so
/// `vendor` skips `./vendor/lib.py` as well as `./src/vendored.py`.
pub struct IgnoreFilter {
  patterns: Vec<Regex>,
}

impl IgnoreFilter {
  /// Compiles the given ignore patterns.
  pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, UprightError> {
    let patterns = patterns
      .iter()
      .map(|p| {
        Regex::new(p.as_ref()).map_err(|source| UprightError::InvalidIgnorePattern {
          pattern: p.as_ref().to_string(),
          source,
        })
      })
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Self { patterns })
  }

  /// Returns the first pattern that matches the path, if any.
  pub fn matching_pattern(&self, path: &Path) -> Option<&Regex> {
    let path_str = path.to_string_lossy();
    self.patterns.iter().find(|pattern| pattern.is_match(&path_str))
  }
}

impl FileFilter for IgnoreFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    match self.matching_pattern(path) {
      Some(pattern) => {
        trace!("Ignored: {} (matches {})", path.display(), pattern.as_str());
        FilterResult::skip(format!("Matches ignore pattern: {}", pattern.as_str()))
      }
      None => FilterResult::process(),
    }
  }
}

/// Filter that keeps only files whose name ends with a given suffix.
///
/// The suffix is compared literally against the file name, so `.py` also
/// accepts `setup.py` but not `notes.pyc`.
pub struct SuffixFilter {
  suffix: String,
}

impl SuffixFilter {
  pub fn new(suffix: impl Into<String>) -> Self {
    Self { suffix: suffix.into() }
  }
}

impl FileFilter for SuffixFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    let matches = path
      .file_name()
      .map(|name| name.to_string_lossy().ends_with(&self.suffix))
      .unwrap_or(false);

    if matches {
      FilterResult::process()
    } else {
      FilterResult::skip(format!("Does not end with {}", self.suffix))
    }
  }
}

/// Filter that combines multiple filters. The first filter that skips wins.
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }

  pub fn add_filter(&mut self, filter: Box<dyn FileFilter>) {
    self.filters.push(filter);
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    for filter in &self.filters {
      let result = filter.should_process(path);
      if !result.should_process {
        return result;
      }
    }
    FilterResult::process()
  }
}

/// Builds the classifier's filter chain: ignore patterns first, then the
/// file-type suffix.
pub fn create_default_filter<S: AsRef<str>>(ignore_patterns: &[S], file_type: &str) -> Result<CompositeFilter, UprightError> {
  Ok(CompositeFilter::new(vec![
    Box::new(IgnoreFilter::from_patterns(ignore_patterns)?),
    Box::new(SuffixFilter::new(file_type)),
  ]))
}
