//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the classifier
//! and the editor. Every operation opens, uses and closes its handle within
//! the call, so no file stays open across commands.

use std::fs::File;
use std::io::{BufRead as _, BufReader};
use std::path::Path;

use crate::error::UprightError;

/// Default number of lines shown by the header inspector.
pub const DEFAULT_INSPECT_LINES: usize = 10;

/// File I/O operations.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIO;

impl FileIO {
  /// Read full file content as UTF-8 text.
  ///
  /// # Errors
  ///
  /// Returns [`UprightError::FileRead`] if the file cannot be opened or is
  /// not valid UTF-8.
  pub fn read_full_content(path: &Path) -> Result<String, UprightError> {
    std::fs::read_to_string(path).map_err(|source| UprightError::FileRead {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Reads the first `lines` lines of a file, keeping their line endings.
  ///
  /// Stops early at end of file. Only the requested lines are decoded, so a
  /// file with invalid UTF-8 further down still yields its header.
  pub fn read_header(path: &Path, lines: usize) -> Result<String, UprightError> {
    let read_error = |source| UprightError::FileRead {
      path: path.to_path_buf(),
      source,
    };

    let file = File::open(path).map_err(read_error)?;
    let mut reader = BufReader::new(file);
    let mut header = String::new();

    for _ in 0..lines {
      let read = reader.read_line(&mut header).map_err(read_error)?;
      if read == 0 {
        break;
      }
    }

    Ok(header)
  }

  /// Write file content, replacing whatever was there.
  ///
  /// # Errors
  ///
  /// Returns [`UprightError::WriteFailure`] if the file cannot be opened for
  /// writing.
  pub fn write_file(path: &Path, content: &str) -> Result<(), UprightError> {
    std::fs::write(path, content).map_err(|source| UprightError::WriteFailure {
      path: path.to_path_buf(),
      source,
    })
  }
}
