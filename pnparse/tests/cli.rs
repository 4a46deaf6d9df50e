#![allow(clippy::expect_used, reason = "Expect is acceptable in tests")]

use std::{fs, path::Path, process::Command};

use tempfile::TempDir;

fn pnparse(dir: &Path) -> Command {
  let mut cmd = Command::new(env!("CARGO_BIN_EXE_pnparse"));
  cmd.current_dir(dir).env_remove("XDG_CONFIG_HOME").env("HOME", dir);
  cmd
}

#[test]
fn test_init_writes_config_once() {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");

  let status = pnparse(temp_dir.path())
    .args(["init", "--output", "nested/pnparse.toml"])
    .status()
    .expect("Failed to run pnparse");
  assert!(status.success());

  let written = fs::read_to_string(temp_dir.path().join("nested/pnparse.toml"))
    .expect("config written");
  assert!(written.contains("root_class"));

  let again = pnparse(temp_dir.path())
    .args(["init", "--output", "nested/pnparse.toml"])
    .output()
    .expect("Failed to run pnparse");
  assert!(!again.status.success(), "existing file needs --force");

  let forced = pnparse(temp_dir.path())
    .args(["init", "--output", "nested/pnparse.toml", "--force"])
    .status()
    .expect("Failed to run pnparse");
  assert!(forced.success());
}

#[test]
fn test_designer_add_then_lookup() {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");
  let registry = temp_dir.path().join("designers.json");
  let registry_override = format!("designer_icons={}", registry.display());

  let add = pnparse(temp_dir.path())
    .args(["--config", &registry_override])
    .args(["designer", "add", "Riot Someone", "Someone.png"])
    .status()
    .expect("Failed to run pnparse");
  assert!(add.success());
  assert!(registry.exists());

  let lookup = pnparse(temp_dir.path())
    .args(["--config", &registry_override])
    .args(["designer", "icon", "Riot Someone"])
    .output()
    .expect("Failed to run pnparse");
  assert!(lookup.status.success());
  assert_eq!(String::from_utf8_lossy(&lookup.stdout), "Someone.png\n");

  let duplicate = pnparse(temp_dir.path())
    .args(["--config", &registry_override])
    .args(["designer", "add", "Riot Someone", "Other.png"])
    .output()
    .expect("Failed to run pnparse");
  assert!(!duplicate.status.success(), "replacing needs --force");
}

#[test]
fn test_unknown_designer_fails() {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");

  let output = pnparse(temp_dir.path())
    .args(["designer", "icon", "Riot Nobody At All"])
    .output()
    .expect("Failed to run pnparse");

  assert!(!output.status.success());
}

#[test]
fn test_render_missing_input() {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");

  let output = pnparse(temp_dir.path())
    .args(["render", "missing.html", "--patch", "13.4"])
    .output()
    .expect("Failed to run pnparse");

  assert!(!output.status.success());
  assert!(!temp_dir.path().join("missing.html").exists());
}
