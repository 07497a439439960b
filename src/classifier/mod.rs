//! # Classifier Module
//!
//! This module contains the single pass over a directory tree that builds the
//! [`WorkingSet`]: every matching file is read once, assigned exactly one
//! structural [`Category`], tagged `outdated` when its header window mentions
//! a recent past year, and recorded in the Copyright Index when its content
//! mentions "copyright" anywhere.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`file_collector`] - Directory traversal and path normalisation
//!
//! ## Example
//!
//! ```rust,no_run
//! use upright::category::Category;
//! use upright::classifier::{Classifier, ScanOptions};
//!
//! # fn main() -> anyhow::Result<()> {
//! let options = ScanOptions {
//!   ignore_patterns: vec!["vendor".to_string()],
//!   ..ScanOptions::new("src")
//! };
//!
//! let working_set = Classifier::new(options)?.scan()?;
//! for path in working_set.files(Category::Shebang) {
//!   println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod file_collector;
pub mod file_io;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::Datelike;
pub use file_collector::{FileCollector, normalize_path};
pub use file_io::FileIO;
use serde::{Serialize, Serializer};
use tracing::{debug, trace, warn};

use crate::category::{Category, CategorySelection};
use crate::detection::{CopyrightDetector, SimpleCopyrightDetector, StaleYearDetector};
use crate::error::UprightError;
use crate::file_filter::{CompositeFilter, create_default_filter};

/// File-type suffix scanned when none is configured.
pub const DEFAULT_FILE_TYPE: &str = ".py";

/// Size of the header window, in lines, when none is configured.
pub const DEFAULT_HEADER_LINES: usize = 20;

/// How many past years count as stale when none is configured.
pub const DEFAULT_YEARS_BACK: u32 = 5;

/// Structural prefix tests, evaluated first-match-wins. Anything that matches
/// none of them is [`Category::Unknown`].
const STRUCTURAL_RULES: &[(fn(&str) -> bool, Category)] = &[
  (starts_with_docstring, Category::Docstring),
  (starts_with_import, Category::Imports),
  (starts_with_shebang, Category::Shebang),
  (is_blank, Category::Empty),
  (starts_with_hash, Category::Hash),
  (starts_with_block_comment, Category::Comment),
];

fn starts_with_docstring(content: &str) -> bool {
  content.starts_with("\"\"\"")
}

fn starts_with_import(content: &str) -> bool {
  content.starts_with("import") || content.starts_with("from")
}

fn starts_with_shebang(content: &str) -> bool {
  content.starts_with("#!/")
}

fn is_blank(content: &str) -> bool {
  content.chars().all(char::is_whitespace)
}

fn starts_with_hash(content: &str) -> bool {
  content.starts_with('#')
}

fn starts_with_block_comment(content: &str) -> bool {
  content.starts_with("/*")
}

/// Assigns the structural category for a file's content.
///
/// Never returns [`Category::Broken`] or [`Category::Outdated`]; those are
/// decided by the caller.
pub fn classify(content: &str) -> Category {
  STRUCTURAL_RULES
    .iter()
    .find(|(matches, _)| matches(content))
    .map_or(Category::Unknown, |(_, category)| *category)
}

/// Inputs for one classification pass.
#[derive(Debug, Clone)]
pub struct ScanOptions {
  /// Directory to scan recursively
  pub root: PathBuf,
  /// Only files whose name ends with this suffix are scanned
  pub file_type: String,
  /// Regular expressions searched in the full path; any match skips the file
  pub ignore_patterns: Vec<String>,
  /// Size of the header window used for the stale-year check
  pub header_lines: usize,
  /// How many years before `current_year` count as stale
  pub years_back: u32,
  /// The year considered "now"
  pub current_year: i32,
}

impl ScanOptions {
  /// Creates options for `root` with the default file type, window and
  /// staleness range, using the local calendar year.
  ///
  /// Use struct update syntax to override specific fields.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      file_type: DEFAULT_FILE_TYPE.to_string(),
      ignore_patterns: Vec::new(),
      header_lines: DEFAULT_HEADER_LINES,
      years_back: DEFAULT_YEARS_BACK,
      current_year: chrono::Local::now().year(),
    }
  }
}

/// The facts derived for one scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// Structural category, or `broken` when the file could not be read
  pub category: Category,
  pub has_copyright: bool,
  pub outdated: bool,
}

impl FileRecord {
  fn broken(path: PathBuf) -> Self {
    Self {
      path,
      category: Category::Broken,
      has_copyright: false,
      outdated: false,
    }
  }
}

fn serialize_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(&path.to_string_lossy())
}

/// Result of one classification pass.
///
/// Holds the category lists, the Copyright Index, and the list of all
/// successfully read files. It is built fresh on every scan and never
/// persisted.
#[derive(Debug, Clone)]
pub struct WorkingSet {
  lists: BTreeMap<Category, BTreeSet<PathBuf>>,
  copyright: BTreeSet<PathBuf>,
  total: BTreeSet<PathBuf>,
  records: Vec<FileRecord>,
}

impl WorkingSet {
  /// Builds the category lists and indexes from per-file records.
  ///
  /// Broken records land in the `broken` list only; every other record lands
  /// in its structural list, in `total`, and in `outdated` and the Copyright
  /// Index when flagged.
  pub fn from_records(records: Vec<FileRecord>) -> Self {
    let mut lists: BTreeMap<Category, BTreeSet<PathBuf>> =
      Category::ALL.iter().map(|category| (*category, BTreeSet::new())).collect();
    let mut copyright = BTreeSet::new();
    let mut total = BTreeSet::new();

    for record in &records {
      lists.entry(record.category).or_default().insert(record.path.clone());
      if record.category == Category::Broken {
        continue;
      }
      if record.has_copyright {
        copyright.insert(record.path.clone());
      }
      if record.outdated {
        lists.entry(Category::Outdated).or_default().insert(record.path.clone());
      }
      total.insert(record.path.clone());
    }

    Self {
      lists,
      copyright,
      total,
      records,
    }
  }

  /// Files in one category list.
  pub fn files(&self, category: Category) -> &BTreeSet<PathBuf> {
    static EMPTY: BTreeSet<PathBuf> = BTreeSet::new();
    self.lists.get(&category).unwrap_or(&EMPTY)
  }

  /// All category lists, in canonical category order.
  pub fn lists(&self) -> impl Iterator<Item = (Category, &BTreeSet<PathBuf>)> {
    self.lists.iter().map(|(category, files)| (*category, files))
  }

  /// Files whose content mentions "copyright".
  pub const fn copyright_index(&self) -> &BTreeSet<PathBuf> {
    &self.copyright
  }

  pub fn has_copyright(&self, path: &Path) -> bool {
    self.copyright.contains(path)
  }

  /// Every successfully read file. Broken files are not included.
  pub const fn total(&self) -> &BTreeSet<PathBuf> {
    &self.total
  }

  /// Per-file records in scan order.
  pub fn records(&self) -> &[FileRecord] {
    &self.records
  }

  /// Narrows the working set to the selected category lists, optionally
  /// keeping only `file` in each of them.
  pub fn select(&self, selection: CategorySelection, file: Option<&Path>) -> Selection {
    let wanted = file.map(normalize_path);
    let lists = self
      .lists
      .iter()
      .filter(|(category, _)| match selection {
        CategorySelection::All => true,
        CategorySelection::Only(only) => **category == only,
      })
      .map(|(category, files)| {
        let files = files
          .iter()
          .filter(|path| wanted.as_ref().is_none_or(|wanted| normalize_path(path) == *wanted))
          .cloned()
          .collect();
        (*category, files)
      })
      .collect();

    Selection { lists }
  }

  /// Per-category counts over a selection, with how many of those files lack
  /// a copyright notice.
  pub fn stats(&self, selection: &Selection) -> Vec<CategoryStats> {
    selection
      .lists()
      .map(|(category, files)| CategoryStats {
        category,
        files: files.len(),
        without_copyright: files.iter().filter(|path| !self.has_copyright(path)).count(),
      })
      .collect()
  }

  /// Count of all readable files and how many of them lack a copyright
  /// notice.
  pub fn total_stats(&self) -> (usize, usize) {
    let without = self.total.iter().filter(|path| !self.has_copyright(path)).count();
    (self.total.len(), without)
  }
}

/// Count summary for one category list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
  pub category: Category,
  pub files: usize,
  pub without_copyright: usize,
}

/// The category lists a command operates on.
#[derive(Debug, Clone, Default)]
pub struct Selection {
  lists: BTreeMap<Category, BTreeSet<PathBuf>>,
}

impl Selection {
  /// Selected category lists, in canonical category order.
  pub fn lists(&self) -> impl Iterator<Item = (Category, &BTreeSet<PathBuf>)> {
    self.lists.iter().map(|(category, files)| (*category, files))
  }

  /// The union of all selected lists, sorted and without duplicates.
  ///
  /// A file listed under both its structural category and `outdated` appears
  /// once, so mutations touch it once.
  pub fn files(&self) -> Vec<PathBuf> {
    self
      .lists
      .values()
      .flatten()
      .cloned()
      .collect::<BTreeSet<_>>()
      .into_iter()
      .collect()
  }

  pub fn is_empty(&self) -> bool {
    self.lists.values().all(BTreeSet::is_empty)
  }
}

/// Classifies the files of one directory tree.
pub struct Classifier {
  options: ScanOptions,
  filter: CompositeFilter,
  detector: Box<dyn CopyrightDetector>,
  stale: StaleYearDetector,
}

impl Classifier {
  /// Creates a classifier for the given options.
  ///
  /// # Errors
  ///
  /// Returns [`UprightError::InvalidIgnorePattern`] if any ignore pattern is
  /// not a valid regular expression.
  pub fn new(options: ScanOptions) -> Result<Self, UprightError> {
    let filter = create_default_filter(&options.ignore_patterns, &options.file_type)?;
    let stale = StaleYearDetector::new(options.current_year, options.years_back, options.header_lines);

    Ok(Self {
      options,
      filter,
      detector: Box::new(SimpleCopyrightDetector::new()),
      stale,
    })
  }

  /// Replaces the copyright detector.
  pub fn with_detector(mut self, detector: Box<dyn CopyrightDetector>) -> Self {
    self.detector = detector;
    self
  }

  pub const fn options(&self) -> &ScanOptions {
    &self.options
  }

  /// Derives the record for already-read content.
  pub fn classify_content(&self, path: &Path, content: &str) -> FileRecord {
    FileRecord {
      path: path.to_path_buf(),
      category: classify(content),
      has_copyright: self.detector.has_copyright(content),
      outdated: self.stale.is_outdated(content),
    }
  }

  /// Reads and classifies one file. A file that cannot be read or decoded is
  /// recorded as broken; this never fails.
  pub fn classify_file(&self, path: &Path) -> FileRecord {
    match FileIO::read_full_content(path) {
      Ok(content) => {
        let record = self.classify_content(path, &content);
        trace!(
          "Classified {} as {} (copyright: {}, outdated: {})",
          path.display(),
          record.category,
          record.has_copyright,
          record.outdated
        );
        record
      }
      Err(e) => {
        warn!("Could not handle file: {}", e);
        FileRecord::broken(path.to_path_buf())
      }
    }
  }

  /// Runs the classification pass over the configured root.
  ///
  /// # Errors
  ///
  /// Returns an error if the root is not an existing directory. Per-file read
  /// failures never abort the scan.
  pub fn scan(&self) -> Result<WorkingSet> {
    let root = &self.options.root;
    if !root.is_dir() {
      bail!("Folder does not exist or is not a directory: {}", root.display());
    }

    let files = FileCollector::new(&self.filter).collect(root);
    let records: Vec<FileRecord> = files.iter().map(|path| self.classify_file(path)).collect();

    let working_set = WorkingSet::from_records(records);
    debug!(
      "Classified {} files ({} broken, {} with copyright)",
      working_set.total().len(),
      working_set.files(Category::Broken).len(),
      working_set.copyright_index().len()
    );

    Ok(working_set)
  }
}
