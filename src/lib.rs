//! # upright
//!
//! A source code copyright maintenance tool.
//!
//! `upright` scans a directory tree, classifies every source file by the shape
//! of its first lines, and finds files whose copyright notice is missing or
//! names a past year. It can then rewrite header boilerplate in bulk: strip
//! lines by prefix, strip leading comment blocks, bump copyright years and
//! insert a rendered template.
//!
//! ## Features
//!
//! * One classification pass per run: each file lands in exactly one
//!   structural category (`shebang`, `docstring`, `imports`, `hash`, `comment`,
//!   `empty`, `unknown`, or `broken` when unreadable), and is tagged
//!   `outdated` when its header mentions a recent past year
//! * Dry run by default; `--write` commits, `--dump` shows every line
//! * Idempotent edits: running a command twice changes nothing further
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use upright::category::CategorySelection;
//! use upright::classifier::{Classifier, ScanOptions};
//! use upright::diff::DiffManager;
//! use upright::editor::Editor;
//!
//! fn main() -> anyhow::Result<()> {
//!     let working_set = Classifier::new(ScanOptions::new("src"))?.scan()?;
//!     let selection = working_set.select(CategorySelection::All, None);
//!
//!     // Dry run: report, never write
//!     let editor = Editor::new(false, DiffManager::default());
//!     let summary = editor.update_years(&selection.files(), "2024", "2025", 20)?;
//!
//!     println!("{} of {} files would change", summary.modified, summary.inspected);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`classifier`] - The classification pass and the working set
//! * [`transform`] - Pure text transformations behind the edit commands
//! * [`editor`] - Applies transformations to files with dry-run and write modes
//! * [`templates`] - Settings loading and template rendering
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`classifier`]: crate::classifier
//! [`transform`]: crate::transform
//! [`editor`]: crate::editor
//! [`templates`]: crate::templates
//! [`logging`]: crate::logging

pub mod category;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod detection;
pub mod diff;
pub mod editor;
pub mod error;
pub mod file_filter;
pub mod logging;
pub mod output;
pub mod report;
pub mod templates;
pub mod transform;
