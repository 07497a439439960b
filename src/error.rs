//! # Error Module
//!
//! Typed errors raised at the I/O and parsing seams of upright. Orchestration
//! code wraps these in [`anyhow::Error`] with additional context, so callers
//! that need to branch on the failure kind can `downcast_ref::<UprightError>()`.

use std::path::PathBuf;

/// Errors produced by the classification and header-mutation engine.
#[derive(Debug, thiserror::Error)]
pub enum UprightError {
  /// A file could not be opened or decoded as UTF-8 text.
  ///
  /// During classification this is recovered locally: the file is routed to
  /// the `broken` category and the scan continues.
  #[error("Failed to read file '{path}': {source}")]
  FileRead { path: PathBuf, source: std::io::Error },

  /// A category filter named a category outside the fixed set.
  #[error("Unknown file category '{0}' (expected one of: {valid})", valid = crate::category::Category::names().join(", "))]
  CategoryNotFound(String),

  /// The template references a settings key that is not present, or has
  /// invalid syntax.
  #[error("Failed to render template: {0}")]
  TemplateRender(#[from] minijinja::Error),

  /// The settings or template file is missing or malformed.
  #[error("Failed to load settings from '{path}': {message}")]
  SettingsLoad { path: PathBuf, message: String },

  /// A destination file could not be written during commit.
  #[error("Failed to write file '{path}': {source}")]
  WriteFailure { path: PathBuf, source: std::io::Error },

  /// An ignore pattern is not a valid regular expression.
  #[error("Invalid ignore pattern '{pattern}': {source}")]
  InvalidIgnorePattern { pattern: String, source: regex::Error },

  /// A year token passed to the year updater is empty.
  #[error("Year tokens must not be empty (from: '{from}', to: '{to}')")]
  EmptyYearToken { from: String, to: String },

  /// The configuration file could not be read, parsed, or validated.
  #[error("Invalid configuration in '{path}': {message}")]
  Config { path: PathBuf, message: String },
}
