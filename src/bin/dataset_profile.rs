//! Dataset Profile CLI
//!
//! Composes dataset profiles, previews and lineage nodes from record JSON.
//!
//! # Usage
//!
//! ```bash
//! # Compose the profile for one record in a fixture
//! dataset_profile profile --file datasets.json --urn 'urn:li:dataset:(...)'
//!
//! # Preview card from stdin
//! cat dataset.json | dataset_profile preview --type hover-card
//!
//! # Search cards for a list of hits
//! dataset_profile search --file hits.json
//!
//! # Lineage node
//! dataset_profile lineage --file dataset.json
//! ```

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use catalog_profile::catalog_types::{Dataset, DatasetSearchEntity, SearchResult};
use catalog_profile::dataset::{DatasetEntity, InMemoryDatasetStore};
use catalog_profile::{
    ComposeOptions, ConfigLoader, Entity, EntityQuery, PreviewType, ProfileSession,
};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(name = "dataset_profile")]
#[command(version = "0.1.0")]
#[command(about = "Compose dataset profiles, previews and lineage nodes from record JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Profile config file (defaults to CATALOG_PROFILE_CONFIG or config/profile.yaml)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "json", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Clone, Copy, ValueEnum)]
enum PreviewKind {
    Preview,
    MiniSearch,
    Browse,
    HoverCard,
}

impl From<PreviewKind> for PreviewType {
    fn from(kind: PreviewKind) -> Self {
        match kind {
            PreviewKind::Preview => PreviewType::Preview,
            PreviewKind::MiniSearch => PreviewType::MiniSearch,
            PreviewKind::Browse => PreviewType::Browse,
            PreviewKind::HoverCard => PreviewType::HoverCard,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the full profile for one dataset
    Profile {
        /// Dataset JSON, one record or an array (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Dataset to compose (defaults to the first urn in sort order)
        #[arg(short, long)]
        urn: Option<String>,

        /// Tab to select
        #[arg(short, long)]
        tab: Option<String>,
    },

    /// Render a compact preview card
    Preview {
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(short, long)]
        urn: Option<String>,

        #[arg(long = "type", default_value = "preview", value_enum)]
        preview_type: PreviewKind,
    },

    /// Render search cards for a JSON array of search hits
    Search {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Describe the dataset as a lineage graph node
    Lineage {
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(short, long)]
        urn: Option<String>,
    },
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let loader = match cli.config {
        Some(path) => ConfigLoader::new(path),
        None => ConfigLoader::from_env(),
    };
    let entity = DatasetEntity::with_config(loader.load()?)?;
    let format = cli.format;

    match cli.command {
        Commands::Profile { file, urn, tab } => {
            cmd_profile(&entity, file, urn, tab.as_deref(), format).await
        }
        Commands::Preview {
            file,
            urn,
            preview_type,
        } => cmd_preview(&entity, file, urn, preview_type.into(), format).await,
        Commands::Search { file } => cmd_search(&entity, file, format),
        Commands::Lineage { file, urn } => cmd_lineage(&entity, file, urn, format).await,
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

async fn cmd_profile(
    entity: &DatasetEntity,
    file: Option<PathBuf>,
    urn: Option<String>,
    tab: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let (store, urn) = open_store(file, urn).await?;
    let mut session = ProfileSession::new(store, urn);
    session.load().await;

    let profile = session.compose_checked(
        entity,
        ComposeOptions {
            selected_tab: tab,
            default_tab: None,
        },
    )?;

    match format {
        OutputFormat::Json => print_json(&profile),
        OutputFormat::Pretty => {
            let title = profile.header.title.as_deref().unwrap_or(profile.urn);
            println!("{} {}", "Dataset".bold(), title.cyan());
            for panel in &profile.tabs {
                let name = panel.name.unwrap_or("?");
                let marker = if profile.selected_tab == panel.name { "*" } else { " " };
                if panel.enabled {
                    println!(" {marker} {}", name.green());
                } else {
                    println!(" {marker} {}", name.dimmed());
                }
            }
            for section in &profile.sidebar {
                println!("   [{}]", section.component);
            }
            Ok(())
        }
    }
}

async fn cmd_preview(
    entity: &DatasetEntity,
    file: Option<PathBuf>,
    urn: Option<String>,
    preview_type: PreviewType,
    format: OutputFormat,
) -> Result<()> {
    let dataset = load_one(file, urn).await?;
    let summary = entity.render_preview(preview_type, &dataset);

    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Pretty => {
            println!(
                "{} ({})",
                summary.name.cyan(),
                summary.platform_name.as_deref().unwrap_or("unknown platform")
            );
            if let Some(description) = &summary.description {
                println!("  {description}");
            }
            Ok(())
        }
    }
}

fn cmd_search(entity: &DatasetEntity, file: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let source = read_input(file)?;
    let hits: Vec<SearchResult<DatasetSearchEntity>> =
        serde_json::from_str(&source).context("Failed to parse search hits")?;
    debug!(hits = hits.len(), "Rendering search cards");

    let cards: Vec<_> = hits.iter().map(|hit| entity.render_search(hit)).collect();

    match format {
        OutputFormat::Json => print_json(&cards),
        OutputFormat::Pretty => {
            for card in &cards {
                println!("{}", card.name.cyan());
                if let Some(snippet) = &card.snippet {
                    println!("  matched {}: {}", snippet.field_label, snippet.value);
                }
            }
            Ok(())
        }
    }
}

async fn cmd_lineage(
    entity: &DatasetEntity,
    file: Option<PathBuf>,
    urn: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let dataset = load_one(file, urn).await?;
    let node = entity.lineage_viz_config(&dataset);

    match format {
        OutputFormat::Json => print_json(&node),
        OutputFormat::Pretty => {
            println!(
                "{} {}",
                node.name.as_deref().unwrap_or(&node.urn).cyan(),
                node.expanded_name.as_deref().unwrap_or_default().dimmed()
            );
            Ok(())
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

async fn open_store(
    file: Option<PathBuf>,
    urn: Option<String>,
) -> Result<(Arc<InMemoryDatasetStore>, String)> {
    let store = InMemoryDatasetStore::from_json_str(&read_input(file)?)?;
    let urn = match urn {
        Some(urn) => urn,
        None => match store.urns().await.into_iter().next() {
            Some(first) => first,
            None => bail!("No dataset records in input"),
        },
    };
    Ok((Arc::new(store), urn))
}

async fn load_one(
    file: Option<PathBuf>,
    urn: Option<String>,
) -> Result<Dataset> {
    let (store, urn) = open_store(file, urn).await?;
    match store.fetch(&urn).await? {
        Some(dataset) => Ok(dataset),
        None => bail!("Dataset {urn} not found in input"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}
