//! `mapgrid`: replay grid events against a study/variable catalog.
//!
//! # Usage
//!
//! ```
//! mapgrid replay catalog.json events.jsonl
//! mapgrid replay catalog.json events.jsonl --orientation variables-as-rows --value-key unit
//! mapgrid keys catalog.json
//! ```

use std::{
  fs::File,
  io::BufReader,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mapgrid_cli::{Replay, Settings, render};
use mapgrid_core::Catalog;
use mapgrid_grid::Orientation;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "mapgrid", version, about = "Study/variable mapping grid")]
struct Cli {
  /// Path to a TOML settings file.
  #[arg(short, long, value_name = "FILE", default_value = "mapgrid.toml")]
  config: PathBuf,

  /// Log at debug level unless RUST_LOG says otherwise.
  #[arg(short, long)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Load a catalog, replay an event script, and print the resulting grid.
  Replay {
    /// Catalog JSON (`studies`, `variables`, `mappings`).
    catalog: PathBuf,

    /// Event script, one JSON event per line.
    events: PathBuf,

    /// Mapping value key to display and edit.
    #[arg(long, env = "MAPGRID_VALUE_KEY")]
    value_key: Option<String>,

    /// Which entities become rows.
    #[arg(long)]
    orientation: Option<Orientation>,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
  },

  /// List the value keys present in a catalog.
  Keys {
    catalog: PathBuf,
  },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
  /// The projected grid as a table.
  Table,
  /// The final catalog as JSON.
  Json,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let mut settings = Settings::load(&cli.config)?;

  match cli.command {
    Command::Replay {
      catalog,
      events,
      value_key,
      orientation,
      format,
    } => {
      // CLI flags override the settings file, which overrides defaults.
      if let Some(key) = value_key {
        settings.value_key = key;
      }
      if let Some(orientation) = orientation {
        settings.orientation = orientation;
      }

      let mut replay = Replay::new(load_catalog(&catalog)?, &settings)?;
      let script = File::open(&events)
        .with_context(|| format!("opening event script {}", events.display()))?;
      replay.run(BufReader::new(script))?;

      let catalog = replay.session.catalog();
      match format {
        Format::Table => {
          println!("{}", render::frame_table(&replay.adapter.project(catalog)));
        }
        Format::Json => {
          let json = serde_json::to_string_pretty(&catalog.to_import())
            .context("serialising catalog")?;
          println!("{json}");
        }
      }
    }
    Command::Keys { catalog } => {
      let catalog = load_catalog(&catalog)?;
      println!("{}", render::value_keys(&catalog.mappings.available_value_keys()));
    }
  }

  Ok(())
}

fn load_catalog(path: &Path) -> Result<Catalog> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading catalog {}", path.display()))?;
  let catalog = Catalog::from_json(&raw)
    .with_context(|| format!("loading catalog {}", path.display()))?;
  tracing::info!(
    studies = catalog.entities.studies().len(),
    variables = catalog.entities.variables().len(),
    mappings = catalog.mappings.len(),
    "catalog loaded"
  );
  Ok(catalog)
}
