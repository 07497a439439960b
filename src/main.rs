//! # upright
//!
//! A source code copyright maintenance tool.

use anyhow::Result;
use upright::cli::{Cli, run};

fn main() -> Result<()> {
  run(Cli::parse_args())
}
