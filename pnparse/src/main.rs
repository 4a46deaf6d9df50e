use std::{
  fs,
  io::{self, Write},
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail, eyre};
use log::{LevelFilter, info};
use pnparse::cli::{Cli, Commands, DesignerCommand, DragonCommand};
use pnparse_config::{Config, DragonConfig, IconRegistry};
use pnparse_core::{HttpFetcher, Parser, PatchVersion, Rendered};
use pnparse_dragon::{Dragon, Endpoints};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .init();

  // Init must work without a valid config on disk
  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    return init(output, format, *force);
  }

  let config = Config::load(&cli.config_files, &cli.config_overrides)
    .wrap_err("Failed to load configuration")?;

  match &cli.command {
    Commands::Parse { patch, output } => {
      let icons = icons(&config)?;
      let dragon = dragon(&config.dragon);
      let rendered = Parser::new(&config, &icons, &dragon, &HttpFetcher)
        .parse(patch)
        .wrap_err_with(|| format!("Failed to parse patch {patch} notes"))?;
      emit(&rendered, output.as_ref().or(config.output.as_ref()))
    },

    Commands::Render {
      input,
      patch,
      url,
      output,
    } => {
      let version = PatchVersion::parse(patch)?;
      let html = fs::read_to_string(input)
        .wrap_err_with(|| format!("Failed to read {}", input.display()))?;
      let url = url
        .clone()
        .unwrap_or_else(|| config.source_url_for(&version.dashed()));

      let icons = icons(&config)?;
      let dragon = dragon(&config.dragon);
      let rendered = Parser::new(&config, &icons, &dragon, &HttpFetcher)
        .parse_html(version, &url, &html)
        .wrap_err_with(|| format!("Failed to parse {}", input.display()))?;
      emit(&rendered, output.as_ref().or(config.output.as_ref()))
    },

    Commands::Dragon { command } => {
      let dragon = dragon(&config.dragon);
      dragon.refresh().wrap_err("Failed to fetch the reference catalogs")?;
      let snapshot = dragon.snapshot();

      match command {
        DragonCommand::Version => {
          write_stdout(&format!("{}\n", snapshot.version()))
        },
        DragonCommand::Update => {
          info!(
            "Catalogs at version {}: {} champions, {} items, {} runes, {} \
             summoner spells",
            snapshot.version(),
            snapshot.champions().len(),
            snapshot.items().len(),
            snapshot.runes().len(),
            snapshot.spells().len()
          );
          Ok(())
        },
      }
    },

    Commands::Designer { command } => designer(&config, command),

    Commands::Init { .. } => Ok(()),
  }
}

fn init(output: &Path, format: &str, force: bool) -> Result<()> {
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  if let Some(parent) = output.parent() {
    if !parent.as_os_str().is_empty() && !parent.exists() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
      info!("Created directory: {}", parent.display());
    }
  }

  Config::generate_default_config(format, output).wrap_err_with(|| {
    format!("Failed to generate configuration file: {}", output.display())
  })?;

  info!("Configuration file created successfully.");
  Ok(())
}

fn designer(config: &Config, command: &DesignerCommand) -> Result<()> {
  match command {
    DesignerCommand::Icon { username } => {
      let icons = icons(config)?;
      let icon = icons.icon(username)?;
      write_stdout(&format!("{icon}\n"))
    },

    DesignerCommand::Add {
      username,
      icon,
      registry,
      force,
    } => {
      let path: PathBuf = registry
        .clone()
        .or_else(|| config.designer_icons.clone())
        .ok_or_else(|| {
          eyre!(
            "No registry file to write to. Pass --registry or set \
             `designer_icons` in the configuration."
          )
        })?;

      let mut icons = IconRegistry::load_or_embedded(&path)?;
      if icons.icon(username).is_ok() && !force {
        bail!("`{username}` already has an icon. Use --force to replace it.");
      }

      icons.insert(username.as_str(), icon.as_str());
      icons
        .save(&path)
        .wrap_err_with(|| format!("Failed to save {}", path.display()))?;
      info!("Registered `{icon}` for `{username}` in {}", path.display());
      Ok(())
    },
  }
}

fn icons(config: &Config) -> Result<IconRegistry> {
  IconRegistry::load(config.designer_icons.as_deref())
    .wrap_err("Failed to load the designer icon registry")
}

fn dragon(config: &DragonConfig) -> Dragon {
  Dragon::new(Endpoints {
    versions:  config.versions_url.clone(),
    champions: config.champions_url.clone(),
    items:     config.items_url.clone(),
    runes:     config.runes_url.clone(),
    spells:    config.spells_url.clone(),
  })
}

/// Write the markup to `output`, or standard output when there is none.
fn emit(rendered: &Rendered, output: Option<&PathBuf>) -> Result<()> {
  info!("Target wiki page: {}", rendered.page);

  match output {
    Some(path) => {
      fs::write(path, &rendered.markup)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
      info!("Wrote {}", path.display());
      Ok(())
    },
    None => write_stdout(&rendered.markup),
  }
}

fn write_stdout(text: &str) -> Result<()> {
  let mut stdout = io::stdout().lock();
  stdout.write_all(text.as_bytes())?;
  stdout.flush()?;
  Ok(())
}
