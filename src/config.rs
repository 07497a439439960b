//! # Configuration Module
//!
//! This module provides configuration support for upright, so a project can
//! pin its file type, ignore patterns, header window and template once instead
//! of repeating them on every invocation.
//!
//! Configuration can be specified in a `.upright.toml` file in the scanned
//! folder, via the `UPRIGHT_CONFIG` environment variable, or with `--config`.
//! Command-line values always win over configured ones.
//!
//! ```toml
//! file-type = ".py"
//! ignore = ["vendor/", "_pb2\\.py$"]
//! years = 5
//! line = 20
//! template = "tools/copyright.tpl"
//! settings = "tools/copyright.json"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::UprightError;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".upright.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "UPRIGHT_CONFIG";

/// Main configuration struct for upright.
///
/// Every key is optional. Relative `template` and `settings` paths are
/// resolved against the directory holding the config file.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
  /// Suffix of the files to scan, e.g. `.py`
  pub file_type: Option<String>,

  /// Regular expressions searched in each path; matches are skipped
  #[serde(default)]
  pub ignore: Vec<String>,

  /// How many years back count as stale
  pub years: Option<u32>,

  /// Size of the header window, in lines
  pub line: Option<usize>,

  /// Template used by `template insert`
  pub template: Option<PathBuf>,

  /// Settings file used by `template insert`
  pub settings: Option<PathBuf>,
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Errors
  ///
  /// Returns [`UprightError::Config`] if the file cannot be read, is not
  /// valid TOML, has unknown keys, or fails validation.
  pub fn load(path: &Path) -> Result<Self, UprightError> {
    verbose_log!("Loading config from: {}", path.display());

    let config_error = |message: String| UprightError::Config {
      path: path.to_path_buf(),
      message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    let config: Config = toml::from_str(&content).map_err(|e| config_error(e.to_string()))?;
    config.validate().map_err(config_error)?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_paths(base))
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - `file-type` is not empty
  /// - `line` is greater than zero
  fn validate(&self) -> Result<(), String> {
    if self.file_type.as_deref().is_some_and(str::is_empty) {
      return Err("file-type cannot be empty".to_string());
    }

    if self.line == Some(0) {
      return Err("line must be greater than zero".to_string());
    }

    Ok(())
  }

  fn resolve_paths(mut self, base: &Path) -> Self {
    let resolve = |path: PathBuf| {
      if path.is_absolute() || path.starts_with("~") {
        path
      } else {
        base.join(path)
      }
    };

    self.template = self.template.map(resolve);
    self.settings = self.settings.map(resolve);
    self
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `UPRIGHT_CONFIG` environment variable
/// 3. `.upright.toml` in the scanned folder
///
/// An explicit path is returned even if it does not exist, so that loading
/// it reports the problem instead of silently falling back to defaults.
pub fn discover_config_path(explicit_path: Option<&Path>, folder: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let folder_config = folder.join(DEFAULT_CONFIG_FILENAME);
  if folder_config.exists() {
    verbose_log!("Using folder config: {}", folder_config.display());
    return Some(folder_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, or return `None`.
///
/// With `no_config` set, discovery is skipped entirely.
pub fn load_config(explicit_path: Option<&Path>, folder: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, folder) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
