use std::process::Command;

fn main() {
  embed_build_info();
  set_rerun_conditions();
}

fn git_output(args: &[&str]) -> Option<String> {
  let output = Command::new("git").args(args).output().ok()?;
  if !output.status.success() {
    return None;
  }
  let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
  if value.is_empty() { None } else { Some(value) }
}

fn embed_build_info() {
  // Always emit the variables so `env!` lookups in the crate never fail,
  // even when building from a source tarball without git metadata.
  let git_hash = git_output(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
  println!("cargo:rustc-env=GIT_HASH={git_hash}");

  let git_date = git_output(&["log", "-1", "--format=%cs"]).unwrap_or_else(|| "unknown".to_string());
  println!("cargo:rustc-env=GIT_DATE={git_date}");
}

fn set_rerun_conditions() {
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
}
