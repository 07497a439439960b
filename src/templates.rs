//! # Templates Module
//!
//! This module provides the pieces of the template insertion command:
//! - [`Settings`], the JSON key/value map a template is rendered against
//! - [`TemplateManager`] for loading and rendering the template text
//! - [`resolve_template_path`] for deciding which template file to load
//!
//! Templates are rendered with minijinja and use `{{ key }}` placeholders.
//! Mustache-only syntax such as `{{{key}}}` or `{{#section}}...{{/section}}`
//! is rejected as a syntax error. Rendering is strict: a placeholder naming a
//! key that is not in the settings is an error, never an empty string.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use upright::templates::{Settings, TemplateManager};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut settings = Settings::load(Path::new("~/.config/upright/settings.json"))?;
//! settings.apply_copyright_end_default(2025);
//!
//! let mut manager = TemplateManager::new();
//! manager.load_template(Path::new("copyright.tpl"))?;
//!
//! let header = manager.render(&settings)?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde_json::{Map, Value};

use crate::classifier::normalize_path;
use crate::error::UprightError;
use crate::verbose_log;

/// Template file used when neither the command line, the settings nor the
/// configuration names one.
pub const DEFAULT_TEMPLATE_FILE: &str = "copyright.tpl";

const COPYRIGHT_END: &str = "copyright_end";
const TEMPLATE_KEY: &str = "template";

/// Key/value context for template rendering, loaded from a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
  values: Map<String, Value>,
  /// File the settings were loaded from, if any
  source: Option<PathBuf>,
}

impl Settings {
  /// Creates settings from an in-memory map.
  pub const fn from_map(values: Map<String, Value>) -> Self {
    Self { values, source: None }
  }

  /// Loads settings from a JSON file.
  ///
  /// A leading `~` is expanded to the home directory and `.`/`..` components
  /// are collapsed before the file is opened.
  ///
  /// # Errors
  ///
  /// Returns [`UprightError::SettingsLoad`] if the file cannot be read, is not
  /// valid JSON, or does not hold a JSON object.
  pub fn load(path: &Path) -> Result<Self, UprightError> {
    let path = normalize_path(&expand_home(path));
    let load_error = |message: String| UprightError::SettingsLoad {
      path: path.clone(),
      message,
    };

    let content = fs::read_to_string(&path).map_err(|e| load_error(e.to_string()))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?;

    match value {
      Value::Object(values) => {
        verbose_log!("Loaded {} settings from {}", values.len(), path.display());
        Ok(Self {
          values,
          source: Some(path),
        })
      }
      other => Err(load_error(format!("expected a JSON object, found {}", json_kind(&other)))),
    }
  }

  pub fn source(&self) -> Option<&Path> {
    self.source.as_deref()
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.values.get(key)
  }

  pub const fn values(&self) -> &Map<String, Value> {
    &self.values
  }

  /// The template path named by the settings, if any.
  pub fn template(&self) -> Option<&str> {
    self.values.get(TEMPLATE_KEY).and_then(Value::as_str)
  }

  /// Fills in `copyright_end` with `year` when it is absent, `null`, `false`
  /// or an empty string. Any other value is kept.
  pub fn apply_copyright_end_default(&mut self, year: i32) {
    let missing = match self.values.get(COPYRIGHT_END) {
      None | Some(Value::Null) | Some(Value::Bool(false)) => true,
      Some(Value::String(s)) => s.is_empty(),
      Some(_) => false,
    };

    if missing {
      self.values.insert(COPYRIGHT_END.to_string(), Value::from(year));
    }
  }
}

const fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

/// Expands a leading `~` to the current user's home directory.
///
/// Paths without a leading `~`, or with no resolvable home directory, are
/// returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), dirs::home_dir()) {
    (Ok(rest), Some(home)) => home.join(rest),
    _ => path.to_path_buf(),
  }
}

/// Decides which template file to load.
///
/// Candidates in order: `explicit` (command line), the settings `template`
/// key, `configured` (configuration file), then [`DEFAULT_TEMPLATE_FILE`].
/// A relative path taken from the settings resolves against the settings
/// file's directory; any other relative path resolves against `cwd`.
pub fn resolve_template_path(
  explicit: Option<&Path>,
  settings: &Settings,
  configured: Option<&Path>,
  cwd: &Path,
) -> PathBuf {
  let from_settings = settings.template().map(Path::new);

  let (candidate, base) = match (explicit, from_settings, configured) {
    (Some(path), _, _) => (path, cwd),
    (None, Some(path), _) => {
      let base = settings.source().and_then(Path::parent).unwrap_or(cwd);
      (path, base)
    }
    (None, None, Some(path)) => (path, cwd),
    (None, None, None) => (Path::new(DEFAULT_TEMPLATE_FILE), cwd),
  };

  let candidate = expand_home(candidate);
  if candidate.is_absolute() {
    normalize_path(&candidate)
  } else {
    normalize_path(&base.join(candidate))
  }
}

/// Manager for loading and rendering the insertion template.
#[derive(Debug, Clone, Default)]
pub struct TemplateManager {
  template: String,
}

impl TemplateManager {
  /// Creates a manager with an empty template.
  ///
  /// Call [`load_template`](Self::load_template) or use
  /// [`with_template`](Self::with_template) before rendering.
  pub const fn new() -> Self {
    Self { template: String::new() }
  }

  pub fn with_template(template: impl Into<String>) -> Self {
    Self {
      template: template.into(),
    }
  }

  /// Loads the template text from a file.
  pub fn load_template(&mut self, template_path: &Path) -> Result<()> {
    verbose_log!("Loading template from: {}", template_path.display());

    self.template = fs::read_to_string(template_path)
      .with_context(|| format!("Failed to read template file: {}", template_path.display()))?;

    Ok(())
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  /// Renders the template against the settings.
  ///
  /// The output is not escaped and keeps the template's trailing newline.
  ///
  /// # Errors
  ///
  /// Returns [`UprightError::TemplateRender`] if the template has invalid
  /// syntax or references a key missing from the settings.
  pub fn render(&self, settings: &Settings) -> Result<String, UprightError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    env.add_template("copyright", &self.template)?;

    let template = env.get_template("copyright")?;
    Ok(template.render(settings.values())?)
  }
}
