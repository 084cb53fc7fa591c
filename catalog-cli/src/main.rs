//! Catalog browser command line.
//!
//! Usage:
//!   catalog list --query saur --category grass
//!   catalog show 25
//!   catalog favorites add 25

use anyhow::{Context, Result, bail};
use catalog_cli::{CatalogConfig, render};
use catalog_engine::{
    CatalogBrowser, CatalogPipeline, CategoryFilter, EntityCache, FilterCriteria, LoadOutcome,
};
use catalog_favorites::{FavoritesStore, KeyValueStore, SqliteKeyValueStore};
use catalog_source::HttpCatalogSource;
use catalog_types::EntityId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(about = "Browse, search and bookmark a remote entity catalog")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, env = "CATALOG_API_URL")]
    api_url: Option<String>,

    /// Override the favorites database path
    #[arg(long, env = "CATALOG_FAVORITES")]
    favorites_path: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load one page of the catalog and filter it
    List {
        /// Cursor returned by a previous page
        #[arg(long)]
        cursor: Option<String>,

        /// Entries per page
        #[arg(short, long)]
        limit: Option<usize>,

        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        query: String,

        /// Category to keep, or "all"
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Show the full record of one entry
    Show {
        /// Catalog number
        id: String,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// List the known categories
    Categories,
}

#[derive(Subcommand, Debug)]
enum FavoritesAction {
    /// Show all favorites
    List,
    /// Add an entry to favorites
    Add { id: String },
    /// Remove an entry from favorites
    Remove { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = CatalogConfig::load(args.config.as_deref())?;
    if let Some(url) = args.api_url {
        config.source.api_base_url = url;
    }
    if let Some(path) = args.favorites_path {
        config.favorites_path = Some(path);
    }

    match args.command {
        Command::List {
            cursor,
            limit,
            query,
            category,
        } => {
            if let Some(limit) = limit {
                if limit == 0 {
                    bail!("--limit must be a positive number");
                }
                config.source.page_size = limit;
            }
            list(&config, cursor.as_deref(), query, &category).await
        }
        Command::Show { id } => show(&config, &id).await,
        Command::Favorites { action } => favorites(&config, action),
        Command::Categories => {
            print!("{}", render::categories(config.categories.categories()));
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn build_pipeline(config: &CatalogConfig) -> Result<CatalogPipeline> {
    let source = Arc::new(
        HttpCatalogSource::new(config.source.clone()).context("Failed to set up catalog source")?,
    );
    let cache = Arc::new(EntityCache::new(source.clone()));
    Ok(CatalogPipeline::with_page_size(source, cache, config.source.page_size))
}

fn open_favorites(config: &CatalogConfig) -> FavoritesStore {
    let storage: Arc<dyn KeyValueStore> = match config
        .favorites_path()
        .and_then(|path| SqliteKeyValueStore::open(&path).map_err(Into::into))
    {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Favorites storage unavailable, using a session-only store: {e:#}");
            Arc::new(catalog_favorites::MemoryKeyValueStore::new())
        }
    };
    FavoritesStore::open(storage)
}

async fn list(
    config: &CatalogConfig,
    cursor: Option<&str>,
    query: String,
    category: &str,
) -> Result<()> {
    let category: CategoryFilter = config.categories.parse_filter(category).with_context(|| {
        format!("Unknown category {category:?}; run `catalog categories` for the list")
    })?;
    let criteria = FilterCriteria::new(query, category);

    let browser = CatalogBrowser::new(Arc::new(build_pipeline(config)?));
    let outcome = browser
        .load(cursor)
        .await
        .context("Could not load the catalog; try again later")?;

    let page = match outcome {
        LoadOutcome::Applied(page) => page,
        LoadOutcome::Superseded { ticket, latest } => {
            debug!(ticket, latest, "Page load superseded");
            return Ok(());
        }
    };

    let favorites = open_favorites(config);
    print!("{}", render::page(&page, &criteria, &favorites));
    Ok(())
}

async fn show(config: &CatalogConfig, raw_id: &str) -> Result<()> {
    // Validate before touching the network.
    let id = EntityId::parse(raw_id)?;
    let pipeline = build_pipeline(config)?;
    let record = pipeline.resolve_id(&id.to_string()).await?;
    let favorites = open_favorites(config);
    print!("{}", render::detail(&record, favorites.contains(record.id())));
    Ok(())
}

fn favorites(config: &CatalogConfig, action: FavoritesAction) -> Result<()> {
    let mut favorites = open_favorites(config);

    match action {
        FavoritesAction::List => {
            print!("{}", render::favorites(&favorites.list()));
        }
        FavoritesAction::Add { id } => {
            let id = EntityId::parse(&id)?;
            if favorites.add(id) {
                println!("Added {} to favorites.", id.padded());
            } else {
                println!("{} is already a favorite.", id.padded());
            }
        }
        FavoritesAction::Remove { id } => {
            let id = EntityId::parse(&id)?;
            if favorites.remove(id) {
                println!("Removed {} from favorites.", id.padded());
            } else {
                println!("{} was not a favorite.", id.padded());
            }
        }
    }

    if let Some(cause) = favorites.last_error() {
        eprintln!("Note: favorites will not persist this session ({cause}).");
    }
    Ok(())
}
