//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! Global options select and classify the files; subcommands decide what to
//! do with them.

mod edit;
mod inspect;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::category::CategorySelection;
use crate::classifier::{Classifier, DEFAULT_FILE_TYPE, DEFAULT_HEADER_LINES, DEFAULT_YEARS_BACK, ScanOptions, Selection, WorkingSet};
use crate::config::{Config, load_config};
use crate::diff::DiffManager;
use crate::editor::Editor;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::verbose_log;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("GIT_HASH"),
  " ",
  env!("GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "upright",
  author,
  version,
  long_version = LONG_VERSION,
  about = "Upright - a source code copyright maintenance tool",
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Count files per category and how many lack a copyright notice
  upright --folder src stats

  # List every file whose header starts with a shebang
  upright -c shebang lists

  # Show the headers of files that have no copyright notice
  upright headers --faulty

  # Preview, then apply, last year -> this year in the first 20 lines
  upright --dump update
  upright --write update

  # Strip leading comment blocks from files that start with '#'
  upright -c hash --write remove comment

  # Insert a rendered template at the top of every file without a header
  upright -c imports --write template -s settings.json insert --line 0
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub global: GlobalArgs,

  #[command(subcommand)]
  pub command: Command,
}

/// Options shared by every subcommand. They go before the subcommand name.
#[derive(Args, Debug)]
pub struct GlobalArgs {
  /// Folder to operate on
  #[arg(long, value_name = "DIR", default_value = ".")]
  pub folder: PathBuf,

  /// Only act on this file (as listed, e.g. ./pkg/module.py)
  #[arg(long, short = 'f', value_name = "FILE")]
  pub file: Option<PathBuf>,

  /// Suffix of the files to act on [default: .py]
  #[arg(long, short = 't', value_name = "EXT")]
  pub file_type: Option<String>,

  /// Select only one file category (shebang, docstring, empty, hash, unknown,
  /// imports, broken, comment, outdated) or all of them
  #[arg(long, short = 'c', value_name = "CATEGORY", default_value = "all")]
  pub file_category: CategorySelection,

  /// Actually write changes to files
  #[arg(long, short = 'w')]
  pub write: bool,

  /// Dump changes to the console, line by line
  #[arg(long, short = 'd')]
  pub dump: bool,

  /// Append a listing of all changes to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Skip paths matching this regular expression (repeatable)
  #[arg(long, short = 'i', value_name = "REGEX")]
  pub ignore: Vec<String>,

  /// Check this many years back for outdated copyright years [default: 5]
  #[arg(long, short = 'y', value_name = "N")]
  pub years: Option<u32>,

  /// Inspect and replace only up to this line number [default: 20]
  #[arg(long, short = 'l', value_name = "N")]
  pub line: Option<usize>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, visible_alias = "debug", action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except results and errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Path to config file (default: .upright.toml in the folder)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Generate various statistics about source files
  Stats(inspect::StatsArgs),

  /// Generate lists of source files by classification
  Lists,

  /// Show headers of source files by classification
  Headers(inspect::HeadersArgs),

  /// Remove lines or comment blocks from source files
  #[command(subcommand)]
  Remove(edit::RemoveCommand),

  /// Update a copyright year. Without --year-from/--year-to, last year's
  /// number is replaced with the current one.
  Update(edit::UpdateArgs),

  /// Handle template operations
  Template(edit::TemplateArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Everything a subcommand needs: the merged options, the classification
/// result and the selected files.
pub struct Session {
  pub config: Config,
  pub options: ScanOptions,
  pub working_set: WorkingSet,
  pub selection: Selection,
  pub write: bool,
  pub diff_manager: DiffManager,
}

impl Session {
  /// Loads configuration, merges it with the command line and runs the
  /// classification pass.
  pub fn open(args: &GlobalArgs) -> Result<Self> {
    let config = load_config(args.config.as_deref(), &args.folder, args.no_config)?.unwrap_or_default();
    let options = scan_options(args, &config)?;

    verbose_log!("Scanning {} for *{} files", options.root.display(), options.file_type);
    let classifier = Classifier::new(options.clone()).context("Invalid scan options")?;
    let working_set = classifier.scan()?;

    let selection = working_set.select(args.file_category, args.file.as_deref());
    debug!(
      "Selected {} files (category: {}, file: {:?})",
      selection.files().len(),
      args.file_category,
      args.file
    );

    Ok(Self {
      config,
      options,
      working_set,
      selection,
      write: args.write,
      diff_manager: DiffManager::new(args.dump, args.save_diff.clone()),
    })
  }

  pub fn editor(&self) -> Editor {
    Editor::new(self.write, self.diff_manager.clone())
  }
}

/// Merges command-line values over configured ones over defaults.
///
/// Ignore patterns from both sources are combined.
fn scan_options(args: &GlobalArgs, config: &Config) -> Result<ScanOptions> {
  let header_lines = args.line.or(config.line).unwrap_or(DEFAULT_HEADER_LINES);
  if header_lines == 0 {
    bail!("--line must be greater than zero");
  }

  let file_type = args
    .file_type
    .clone()
    .or_else(|| config.file_type.clone())
    .unwrap_or_else(|| DEFAULT_FILE_TYPE.to_string());
  if file_type.is_empty() {
    bail!("--file-type cannot be empty");
  }

  let ignore_patterns = config.ignore.iter().chain(&args.ignore).cloned().collect();

  Ok(ScanOptions {
    file_type,
    ignore_patterns,
    header_lines,
    years_back: args.years.or(config.years).unwrap_or(DEFAULT_YEARS_BACK),
    ..ScanOptions::new(&args.folder)
  })
}

/// Run the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
  let global = &cli.global;

  init_tracing(global.quiet, global.verbose);
  if global.verbose > 0 {
    set_verbose();
  } else if global.quiet {
    set_quiet();
  }
  global.colors.apply();

  let session = Session::open(global)?;

  match &cli.command {
    Command::Stats(args) => inspect::run_stats(&session, args, &global.folder),
    Command::Lists => inspect::run_lists(&session),
    Command::Headers(args) => inspect::run_headers(&session, args),
    Command::Remove(command) => edit::run_remove(&session, command),
    Command::Update(args) => edit::run_update(&session, args),
    Command::Template(args) => edit::run_template(&session, args),
  }
}
