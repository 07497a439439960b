//! # Inspection Commands
//!
//! Read-only commands: `stats`, `lists` and `headers`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use tracing::warn;

use super::Session;
use crate::classifier::FileIO;
use crate::classifier::file_io::DEFAULT_INSPECT_LINES;
use crate::info_log;
use crate::output::{self, Highlight};
use crate::report::{ReportFormat, ReportGenerator};

/// Arguments for the stats command
#[derive(Args, Debug, Default)]
pub struct StatsArgs {
  /// Also write a JSON report to this path
  #[arg(long, value_name = "OUTPUT")]
  pub json: Option<PathBuf>,

  /// Also write a CSV report to this path
  #[arg(long, value_name = "OUTPUT")]
  pub csv: Option<PathBuf>,
}

/// Arguments for the headers command
#[derive(Args, Debug)]
pub struct HeadersArgs {
  /// Show only files with missing copyright
  #[arg(long, short = 'f')]
  pub faulty: bool,

  /// Number of lines to show per file
  #[arg(long, short = 'n', value_name = "N", default_value_t = DEFAULT_INSPECT_LINES)]
  pub lines: usize,
}

pub fn run_stats(session: &Session, args: &StatsArgs, folder: &Path) -> Result<()> {
  let working_set = &session.working_set;
  output::print_stats(&working_set.stats(&session.selection), working_set.total_stats());

  let reports = [(ReportFormat::Json, &args.json), (ReportFormat::Csv, &args.csv)];
  for (format, path) in reports {
    if let Some(path) = path {
      ReportGenerator::new(format, path).generate(working_set, &session.selection, folder)?;
      info_log!("{} report written to {}", format, path.display());
    }
  }

  Ok(())
}

pub fn run_lists(session: &Session) -> Result<()> {
  output::print_lists(&session.selection, &session.working_set);
  Ok(())
}

pub fn run_headers(session: &Session, args: &HeadersArgs) -> Result<()> {
  for (category, files) in session.selection.lists() {
    output::print_category_heading(category);

    for path in files {
      let has_copyright = session.working_set.has_copyright(path);
      if has_copyright && args.faulty {
        continue;
      }

      match FileIO::read_header(path, args.lines) {
        Ok(header) => {
          output::print_header(path, &header, Highlight::for_copyright(has_copyright, Highlight::Yellow));
        }
        Err(e) => warn!("Cannot show header: {}", e),
      }
    }
  }

  Ok(())
}
