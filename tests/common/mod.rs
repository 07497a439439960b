#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::Result;
use assert_cmd::prelude::*;
use chrono::Datelike;

/// The current calendar year, as the binary sees it.
pub fn current_year() -> i32 {
  chrono::Local::now().year()
}

/// Writes a file below `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, content)?;
  Ok(())
}

/// Creates a small Python tree with one file per category.
///
/// | file                  | category  | copyright | outdated |
/// |-----------------------|-----------|-----------|----------|
/// | shebang.py            | shebang   | yes       | yes      |
/// | docstring.py          | docstring | no        | no       |
/// | imports.py            | imports   | no        | no       |
/// | vendor/six.py         | imports   | no        | no       |
/// | hash.py               | hash      | yes       | no       |
/// | empty.py              | empty     | no        | no       |
/// | comment.py            | comment   | no        | no       |
/// | unknown.py            | unknown   | no        | no       |
/// | broken.py             | broken    | -         | -        |
///
/// `notes.txt` is not a Python file and is never scanned.
pub fn create_python_tree(root: &Path) -> Result<()> {
  let now = current_year();
  let previous = now - 1;

  write_file(
    root,
    "shebang.py",
    format!("#!/usr/bin/env python\n# Copyright (C) 2011-{previous} Someone\nprint('hi')\n"),
  )?;
  write_file(root, "docstring.py", "\"\"\"Module docstring.\"\"\"\nimport os\n")?;
  write_file(root, "imports.py", "import os\nimport sys\n")?;
  write_file(root, "vendor/six.py", "import types\n")?;
  write_file(
    root,
    "hash.py",
    format!("# -*- coding: utf-8 -*-\n# Copyright {now} Someone\n\nx = 1\n"),
  )?;
  write_file(root, "empty.py", "")?;
  write_file(root, "comment.py", "/* not really python */\n")?;
  write_file(root, "unknown.py", "x = 1\n")?;
  write_file(root, "broken.py", [0xff, 0xfe, 0x00, 0x41])?;
  write_file(root, "notes.txt", "# Copyright 1999\n")?;
  Ok(())
}

/// Builds an `upright` command running in `dir` with colors off and no
/// configuration picked up from the environment.
pub fn upright(dir: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin("upright")?;
  cmd
    .current_dir(dir)
    .env_remove("UPRIGHT_CONFIG")
    .env_remove("UPRIGHT_LOG")
    .arg("--colors=never");
  Ok(cmd)
}
