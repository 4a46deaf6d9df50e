use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for pnparse
#[derive(Parser, Debug)]
#[command(author, version, about = "pnparse: patch notes to wiki markup")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times) Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the pnparse CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Fetch the official notes of a patch and render them as wiki markup.
  Parse {
    /// Patch identifier, e.g. `13.4`, `13,4` or `13-4`.
    patch: String,

    /// Write the markup to this file instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Render a patch notes page saved to disk.
  Render {
    /// Saved HTML page.
    input: PathBuf,

    /// Patch identifier the page belongs to.
    #[arg(short, long)]
    patch: String,

    /// Source URL to credit in the output. Defaults to the official page.
    #[arg(long)]
    url: Option<String>,

    /// Write the markup to this file instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Inspect the reference catalogs.
  Dragon {
    #[command(subcommand)]
    command: DragonCommand,
  },

  /// Manage the designer icon registry.
  Designer {
    #[command(subcommand)]
    command: DesignerCommand,
  },

  /// Initialize a new pnparse configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "pnparse.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(
      short = 'F',
      long,
      default_value = "toml",
      value_parser = ["toml", "json"]
    )]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

#[derive(Subcommand, Debug)]
pub enum DragonCommand {
  /// Fetch the latest catalogs and show their sizes.
  Update,

  /// Show the latest upstream catalog version.
  Version,
}

#[derive(Subcommand, Debug)]
pub enum DesignerCommand {
  /// Show the icon registered for a designer.
  Icon {
    /// Designer username, as quoted in the patch notes.
    username: String,
  },

  /// Register the icon of a designer.
  Add {
    /// Designer username, as quoted in the patch notes.
    username: String,

    /// Wiki file name of the icon.
    icon: String,

    /// Registry file to update. Defaults to the configured `designer_icons`.
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Replace an existing entry
    #[arg(short, long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
