//! # Edit Commands
//!
//! Commands that rewrite files: `remove`, `update` and `template`. All of them
//! run as a dry run unless `--write` is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::Session;
use crate::output;
use crate::templates::{Settings, TemplateManager, resolve_template_path};
use crate::{info_log, verbose_log};

/// Removal operations
#[derive(Subcommand, Debug)]
pub enum RemoveCommand {
  /// Remove every line that starts with TXT
  Startswith {
    /// Literal text the removed lines start with
    txt: String,
  },

  /// Remove the leading block of '#' and blank lines
  Comment,
}

/// Arguments for the update command
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
  /// Update only this year [default: last year]
  #[arg(long, value_name = "YEAR")]
  pub year_from: Option<String>,

  /// Update to this year [default: current year]
  #[arg(long, value_name = "YEAR")]
  pub year_to: Option<String>,
}

/// Arguments for the template group
#[derive(Args, Debug)]
pub struct TemplateArgs {
  /// Use this template file [default: settings "template" key, then
  /// copyright.tpl]
  #[arg(long, short = 't', value_name = "FILE")]
  pub template_file: Option<PathBuf>,

  /// Use this JSON file as template data
  #[arg(long, short = 's', value_name = "FILE")]
  pub settings_file: Option<PathBuf>,

  #[command(subcommand)]
  pub command: TemplateCommand,
}

/// Template operations
#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
  /// Insert the rendered template into every selected file
  Insert {
    /// Insert before this line (0 inserts at the top)
    #[arg(long, short = 'l', value_name = "N", default_value_t = 0)]
    line: usize,
  },
}

pub fn run_remove(session: &Session, command: &RemoveCommand) -> Result<()> {
  let files = session.selection.files();
  let editor = session.editor();

  let summary = match command {
    RemoveCommand::Startswith { txt } => {
      info_log!("Removing lines starting with {:?}", txt);
      editor.remove_prefixed_lines(&files, txt)?
    }
    RemoveCommand::Comment => editor.remove_leading_comments(&files)?,
  };

  output::print_edit_summary("remove", &summary, session.write);
  Ok(())
}

pub fn run_update(session: &Session, args: &UpdateArgs) -> Result<()> {
  let current_year = session.options.current_year;
  let year_from = args.year_from.clone().unwrap_or_else(|| (current_year - 1).to_string());
  let year_to = args.year_to.clone().unwrap_or_else(|| current_year.to_string());

  let files = session.selection.files();
  let summary = session
    .editor()
    .update_years(&files, &year_from, &year_to, session.options.header_lines)?;

  output::print_update_summary(&summary);
  if !session.write && summary.modified > 0 {
    output::print_hint("Dry run, nothing was written. Use --write to apply the changes.");
  }
  Ok(())
}

pub fn run_template(session: &Session, args: &TemplateArgs) -> Result<()> {
  let settings_path = args.settings_file.as_deref().or(session.config.settings.as_deref());
  let mut settings = match settings_path {
    Some(path) => Settings::load(path)?,
    None => Settings::default(),
  };

  let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
  let template_path = resolve_template_path(
    args.template_file.as_deref(),
    &settings,
    session.config.template.as_deref(),
    &cwd,
  );

  let mut manager = TemplateManager::new();
  manager.load_template(&template_path)?;
  settings.apply_copyright_end_default(session.options.current_year);

  verbose_log!("Template {}:\n{}", template_path.display(), manager.template());
  verbose_log!("Settings: {:?}", settings.values());

  let rendered = manager
    .render(&settings)
    .with_context(|| {
      format!(
        "Cannot render {} (templates use minijinja syntax: `{{{{ key }}}}` placeholders, no Mustache sections or triple braces)",
        template_path.display()
      )
    })?;
  verbose_log!("Rendered template:\n{}", rendered);

  match args.command {
    TemplateCommand::Insert { line } => {
      let files = session.selection.files();
      let summary = session.editor().insert_text(&files, &rendered, line)?;
      output::print_edit_summary("template insert", &summary, session.write);
    }
  }

  Ok(())
}
