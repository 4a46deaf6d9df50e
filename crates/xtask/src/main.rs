use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;

#[derive(Parser)]
#[command(author, version, about)]
struct Xtask {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build distribution artifacts for the pnparse CLI
  Dist {
    /// Output directory for generated files.
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,

    /// Only generate shell completions.
    #[arg(long, conflicts_with = "manpages_only")]
    completions_only: bool,

    /// Only generate manpages.
    #[arg(long, conflicts_with = "completions_only")]
    manpages_only: bool,
  },
}

fn main() -> Result<()> {
  let Commands::Dist {
    output_dir,
    completions_only,
    manpages_only,
  } = Xtask::parse().command;

  if !manpages_only {
    generate_completions(&output_dir)?;
  }
  if !completions_only {
    generate_manpages(&output_dir)?;
  }
  if !completions_only && !manpages_only {
    generate_configs(&output_dir)?;
  }
  Ok(())
}

fn generate_completions(output_dir: &Path) -> Result<()> {
  let completions_dir = output_dir.join("completions");
  fs::create_dir_all(&completions_dir)?;

  let mut cmd = pnparse::cli::Cli::command();
  for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
    generate_to(shell, &mut cmd, "pnparse", &completions_dir)
      .with_context(|| format!("Failed to generate {shell} completions"))?;
  }
  println!(
    "Shell completions generated in {}",
    completions_dir.display()
  );
  Ok(())
}

/// `pnparse.1` plus one page per subcommand (`pnparse-parse.1`, ...).
fn generate_manpages(output_dir: &Path) -> Result<()> {
  let man_dir = output_dir.join("man");
  fs::create_dir_all(&man_dir)?;

  let cmd = pnparse::cli::Cli::command();
  render_manpage(&man_dir, "pnparse", cmd.clone())?;
  for sub in cmd.get_subcommands() {
    let name = format!("pnparse-{}", sub.get_name());
    render_manpage(&man_dir, &name, sub.clone())?;
  }

  println!("Manpages generated in {}", man_dir.display());
  Ok(())
}

fn render_manpage(man_dir: &Path, name: &str, cmd: Command) -> Result<()> {
  let file_path = man_dir.join(format!("{name}.1"));
  let mut file = fs::File::create(&file_path).with_context(|| {
    format!("Failed to create manpage file at {}", file_path.display())
  })?;
  Man::new(cmd)
    .title(name.to_uppercase())
    .render(&mut file)
    .with_context(|| format!("Failed to render manpage {name}"))
}

/// Example configuration files, the same ones `pnparse init` writes.
fn generate_configs(output_dir: &Path) -> Result<()> {
  let config_dir = output_dir.join("config");
  fs::create_dir_all(&config_dir)?;

  for format in ["toml", "json"] {
    let content = pnparse_config::templates::get_template(format)?;
    let path = config_dir.join(format!("pnparse.{format}"));
    fs::write(&path, content)
      .with_context(|| format!("Failed to write {}", path.display()))?;
  }
  println!("Example configs generated in {}", config_dir.display());
  Ok(())
}
