//! # Logging Module
//!
//! This module provides logging utilities for upright, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - `tracing` subscriber setup for structured diagnostics
//!
//! Verbose logs go to stderr and info logs go to stdout, so the primary
//! output of a command can be piped.
//!
//! ## Example
//!
//! ```rust
//! use upright::logging::{ColorMode, set_verbose};
//! use upright::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! // Goes to stderr
//! verbose_log!("Scanning folder: {}", "src");
//!
//! // Goes to stdout
//! info_log!("Using template: {}", "copyright.tpl");
//! ```

mod modes;

pub use modes::{ColorMode, LOG_ENV_VAR, default_filter, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose mode
/// is enabled via [`set_verbose`]. It uses the same format string syntax as
/// the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// It uses the same format string syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Internal function to print info log messages with formatting.
///
/// This function is used by the [`info_log!`] macro.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
