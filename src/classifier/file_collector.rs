//! # File Collector Module
//!
//! This module provides utilities for collecting candidate files from a
//! directory tree and for normalising paths.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::file_filter::FileFilter;

/// Collects candidate files below a root directory.
pub struct FileCollector<'a> {
  filter: &'a dyn FileFilter,
}

impl<'a> FileCollector<'a> {
  pub const fn new(filter: &'a dyn FileFilter) -> Self {
    Self { filter }
  }

  /// Walks `root` recursively and returns every regular file that passes the
  /// filter. Symlinks to files are included; linked directories are not
  /// descended into. Paths are `root` joined with the relative entry path, matching
  /// what ignore patterns are searched against.
  ///
  /// Entries that cannot be visited (permissions, races with deletion) are
  /// logged and skipped.
  pub fn collect(&self, root: &Path) -> Vec<PathBuf> {
    let start_time = std::time::Instant::now();
    debug!("Scanning directory: {}", root.display());

    let mut files = Vec::new();
    let mut skipped = 0usize;

    for entry in WalkDir::new(root).follow_links(false) {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Error walking {}: {}", root.display(), e);
          continue;
        }
      };

      let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
      if !is_file {
        continue;
      }

      let path = entry.into_path();
      let result = self.filter.should_process(&path);
      if result.should_process {
        files.push(path);
      } else {
        skipped += 1;
        trace!(
          "Skipping: {} ({})",
          path.display(),
          result.reason.as_deref().unwrap_or("filtered")
        );
      }
    }

    debug!(
      "Found {} files ({} skipped) in {}ms",
      files.len(),
      skipped,
      start_time.elapsed().as_millis()
    );

    files
  }
}

/// Normalizes a path by dropping `.` components and resolving `..` lexically.
pub fn normalize_path(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        let can_pop = matches!(normalized.components().next_back(), Some(Component::Normal(_)));
        if can_pop {
          normalized.pop();
        } else {
          normalized.push(component.as_os_str());
        }
      }
      other => normalized.push(other.as_os_str()),
    }
  }

  if normalized.as_os_str().is_empty() {
    PathBuf::from(".")
  } else {
    normalized
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;
  use crate::file_filter::{FilterResult, SuffixFilter};

  #[test]
  fn test_normalize_path() {
    assert_eq!(normalize_path(Path::new("./src/a.py")), PathBuf::from("src/a.py"));
    assert_eq!(normalize_path(Path::new("src/../lib/a.py")), PathBuf::from("lib/a.py"));
    assert_eq!(normalize_path(Path::new("../a.py")), PathBuf::from("../a.py"));
    assert_eq!(normalize_path(Path::new(".")), PathBuf::from("."));
  }

  #[test]
  fn test_collect_applies_filter() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("pkg/sub")).unwrap();
    std::fs::write(dir.path().join("pkg/a.py"), "").unwrap();
    std::fs::write(dir.path().join("pkg/sub/b.py"), "").unwrap();
    std::fs::write(dir.path().join("pkg/sub/c.txt"), "").unwrap();

    let filter = SuffixFilter::new(".py");
    let mut files = FileCollector::new(&filter).collect(dir.path());
    files.sort();

    assert_eq!(
      files,
      vec![dir.path().join("pkg/a.py"), dir.path().join("pkg/sub/b.py")]
    );
  }

  #[test]
  fn test_collect_skips_directories_matching_suffix() {
    struct AcceptAll;
    impl FileFilter for AcceptAll {
      fn should_process(&self, _path: &Path) -> FilterResult {
        FilterResult::process()
      }
    }

    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("looks_like.py")).unwrap();
    std::fs::write(dir.path().join("looks_like.py/real.py"), "").unwrap();

    let files = FileCollector::new(&AcceptAll).collect(dir.path());
    assert_eq!(files, vec![dir.path().join("looks_like.py/real.py")]);
  }

  #[cfg(unix)]
  #[test]
  fn test_collect_follows_file_symlinks_only() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    let outside = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("real")).unwrap();
    std::fs::write(dir.path().join("real/a.txt"), "import os\n").unwrap();
    std::fs::write(outside.path().join("hidden.py"), "").unwrap();
    symlink(dir.path().join("real/a.txt"), dir.path().join("link.py")).unwrap();
    symlink(outside.path(), dir.path().join("linked_dir")).unwrap();

    let filter = SuffixFilter::new(".py");
    let files = FileCollector::new(&filter).collect(dir.path());

    assert_eq!(files, vec![dir.path().join("link.py")]);
  }
}
