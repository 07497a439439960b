use std::sync::Once;
use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable holding a `tracing` filter directive, e.g.
/// `UPRIGHT_LOG=upright=debug`.
pub const LOG_ENV_VAR: &str = "UPRIGHT_LOG";

/// Global atomic output mode.
///
/// This is initialized to `Normal` by default, meaning verbose logging is
/// disabled until explicitly enabled via [`set_verbose`].
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

static TRACING_INIT: Once = Once::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  /// Convert from u8 to OutputMode
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies this mode to all owo-colors output.
  ///
  /// `Auto` leaves the decision to owo-colors' per-stream terminal detection.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

impl std::fmt::Display for ColorMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ColorMode::Auto => write!(f, "auto"),
      ColorMode::Never => write!(f, "never"),
      ColorMode::Always => write!(f, "always"),
    }
  }
}

/// Sets the global verbose logging flag.
///
/// When verbose logging is enabled, the [`verbose_log!`] macro will output
/// messages to stderr. When disabled, verbose log messages are suppressed.
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

/// Checks if verbose logging is currently enabled.
pub fn is_verbose() -> bool {
  matches!(OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)), OutputMode::Verbose)
}

/// Checks if quiet mode is currently enabled.
pub fn is_quiet() -> bool {
  matches!(OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)), OutputMode::Quiet)
}

/// Maps command-line verbosity to a default filter directive.
pub const fn default_filter(quiet: bool, verbose: u8) -> &'static str {
  if quiet {
    return "error";
  }
  match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

/// Initializes the `tracing` subscriber, writing to stderr.
///
/// The filter comes from [`LOG_ENV_VAR`] when it is set and valid, otherwise
/// from the verbosity flags. Calling this more than once has no effect.
pub fn init_tracing(quiet: bool, verbose: u8) {
  TRACING_INIT.call_once(|| {
    let filter =
      EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_filter(quiet, verbose)));

    let _ = tracing_subscriber::registry()
      .with(
        fmt::layer()
          .with_writer(std::io::stderr)
          .with_target(verbose >= 2),
      )
      .with(filter)
      .try_init();
  });
}
