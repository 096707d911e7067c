// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! mlc - pipeline builder CLI for the ML Constructor backend

mod commands;
mod completions;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{aggregate, features, map, models, project, source, status, train};
use mlc_core::{BackendConfig, FileCache, Flow, HttpBackend, ProjectId, Wizard};
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mlc",
    version,
    about = "ML Constructor - build time-series pipelines from the terminal"
)]
struct Cli {
    /// Path to the config file (defaults to ~/.config/mlc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the extended flow (additional files + aggregation)
    #[arg(long, global = true)]
    extended: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project management
    Project(project::ProjectArgs),
    /// Show a project's pipeline position
    Status(status::StatusArgs),
    /// Connect a data source
    Source(source::SourceArgs),
    /// Save the column mapping
    Map(map::MapArgs),
    /// Aggregate the series to a coarser period (extended flow)
    Aggregate(aggregate::AggregateArgs),
    /// Generate time-series features
    Features(features::FeaturesArgs),
    /// Train a model
    Train(train::TrainArgs),
    /// Trained model management
    Models(models::ModelsArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Everything a command needs to talk to the backend
pub struct Context {
    pub backend: HttpBackend,
    pub cache: FileCache,
    pub flow: Flow,
    pub format: OutputFormat,
}

impl Context {
    fn build(cli: &Cli) -> Result<Self> {
        let config_path = cli.config.clone().or_else(default_config_path);
        let config = BackendConfig::load_or_default(config_path.as_deref())?;
        tracing::debug!(base_url = %config.base_url, "connecting to backend");
        let backend = HttpBackend::new(&config)?;
        let cache = FileCache::open(preview_cache_dir())?;
        let flow = if cli.extended {
            Flow::EXTENDED
        } else {
            Flow::STANDARD
        };
        Ok(Self {
            backend,
            cache,
            flow,
            format: cli.format,
        })
    }

    /// Load the wizard for a project; derivation settles before anything
    /// is rendered
    pub async fn wizard(&self, project: i64) -> Result<Wizard<HttpBackend, FileCache>> {
        let wizard = Wizard::load(
            self.backend.clone(),
            self.cache.clone(),
            self.flow,
            ProjectId(project),
        )
        .await
        .map_err(error::CliError::from_wizard)?;
        Ok(wizard)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mlc").join("config.toml"))
}

fn preview_cache_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("mlc")
        .join("previews")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Completions need no backend connection
    if let Commands::Completions(args) = &cli.command {
        completions::handle(args);
        return Ok(());
    }

    let context = Context::build(&cli)?;

    match cli.command {
        Commands::Project(args) => project::handle(&context, args).await,
        Commands::Status(args) => status::handle(&context, args).await,
        Commands::Source(args) => source::handle(&context, args).await,
        Commands::Map(args) => map::handle(&context, args).await,
        Commands::Aggregate(args) => aggregate::handle(&context, args).await,
        Commands::Features(args) => features::handle(&context, args).await,
        Commands::Train(args) => train::handle(&context, args).await,
        Commands::Models(args) => models::handle(&context, args).await,
        Commands::Completions(_) => Ok(()),
    }
}
