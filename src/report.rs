//! # Report Module
//!
//! This module provides functionality for exporting the result of a
//! classification pass in machine-readable formats (JSON, CSV).
//!
//! Reports include every scanned file with its category and copyright flags,
//! plus the same per-category statistics the `stats` command prints.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::classifier::{CategoryStats, FileRecord, Selection, WorkingSet};

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON format for machine readability
  Json,
  /// CSV format for spreadsheet compatibility
  Csv,
}

impl std::fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReportFormat::Json => write!(f, "JSON"),
      ReportFormat::Csv => write!(f, "CSV"),
    }
  }
}

/// Totals over the whole scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanTotals {
  /// Readable files
  pub files: usize,
  /// Readable files without a copyright notice
  pub without_copyright: usize,
  /// Files that could not be read
  pub broken: usize,
}

impl ScanTotals {
  pub fn from_working_set(working_set: &WorkingSet) -> Self {
    let (files, without_copyright) = working_set.total_stats();
    Self {
      files,
      without_copyright,
      broken: working_set.files(crate::category::Category::Broken).len(),
    }
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  folder: String,
  totals: ScanTotals,
  categories: Vec<CategoryStats>,
  files: &'a [FileRecord],
}

/// Report Generator for classification reports
pub struct ReportGenerator<'a> {
  /// Format of the report to generate
  format: ReportFormat,
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(format: ReportFormat, output_path: &'a Path) -> Self {
    Self { format, output_path }
  }

  /// Generate a report for a working set and write it to the output path.
  ///
  /// `selection` decides which category statistics are included; the file
  /// list always covers the whole scan.
  pub fn generate(&self, working_set: &WorkingSet, selection: &Selection, folder: &Path) -> Result<()> {
    let content = match self.format {
      ReportFormat::Json => Self::generate_json(working_set, selection, folder)?,
      ReportFormat::Csv => Self::generate_csv(working_set.records()),
    };

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write {} report to {}", self.format, self.output_path.display()))
  }

  fn generate_json(working_set: &WorkingSet, selection: &Selection, folder: &Path) -> Result<String> {
    let report = JsonReport {
      generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
      folder: folder.to_string_lossy().into_owned(),
      totals: ScanTotals::from_working_set(working_set),
      categories: working_set.stats(selection),
      files: working_set.records(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
  }

  fn generate_csv(records: &[FileRecord]) -> String {
    let mut csv = String::from("path,category,has_copyright,outdated\n");

    for record in records {
      let path = record.path.to_string_lossy().replace(',', "%2C"); // Escape commas in path
      csv.push_str(&format!(
        "{},{},{},{}\n",
        path, record.category, record.has_copyright, record.outdated
      ));
    }

    csv
  }
}
