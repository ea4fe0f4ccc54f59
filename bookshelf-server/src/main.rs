//! # Bookshelf Server
//!
//! Serves the Bookshelf catalogue API.
//!
//! Books live in PostgreSQL (or in memory when `DEV_MODE` is set and no
//! database is configured). Book covers are pulled concurrently from the
//! external cover service on every `/api/books/{id}/covers` request.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use bookshelf_config::{Config, ConfigLoad, ConfigLoader, EnvConfig};
use bookshelf_core::database::{
    InMemoryBooksRepository, PostgresDatabase, ports::books::BooksRepository,
};
use bookshelf_server::{
    AppState, create_app, infra::covers::orchestrator_from_config,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "bookshelf-server")]
#[command(about = "Book catalogue API with concurrent cover downloads")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "BOOKSHELF_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Cover service base URL (overrides config)
    #[arg(long)]
    covers_url: Option<String>,

    /// Run without a database, keeping books in memory
    #[arg(long, default_value_t = false)]
    dev: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_runtime_config(&cli.serve)?;

    match cli.command {
        Some(Command::Db(DbCommand::Migrate)) => run_db_migrate(&config).await,
        None => run_server(config).await,
    }
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let overrides = EnvConfig {
        config_path: args.config.clone(),
        server_host: args.host.clone(),
        server_port: args.port.map(|port| port.to_string()),
        covers_base_url: args.covers_url.clone(),
        dev_mode: args.dev.then_some(true),
        ..EnvConfig::default()
    };
    let ConfigLoad { config, warnings } = ConfigLoader::new()
        .with_overrides(overrides)
        .load()
        .context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(
                    message = %warning.message,
                    hint = %hint,
                    "configuration warning"
                )
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    info!(
        covers.base_url = %config.covers.base_url,
        covers.count = config.covers.cover_count,
        covers.fault_target = ?config.covers.fault_target,
        covers.request_timeout = ?config.covers.request_timeout,
        "cover service configuration in effect"
    );

    Ok(config)
}

async fn connect_database(
    database_url: &str,
) -> anyhow::Result<PostgresDatabase> {
    if !(database_url.starts_with("postgres://")
        || database_url.starts_with("postgresql://"))
    {
        error!("Only PostgreSQL database URLs are supported");
        return Err(anyhow::anyhow!(
            "Invalid database URL: must start with postgres:// or postgresql://"
        ));
    }

    let database = PostgresDatabase::new(database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    match database.initialize_schema().await {
        Ok(()) => info!("Database schema initialized successfully"),
        Err(e) => {
            error!("Failed to initialize database schema: {}", e);
            return Err(anyhow::anyhow!("Database migration failed: {}", e));
        }
    }

    Ok(database)
}

async fn run_db_migrate(config: &Config) -> anyhow::Result<()> {
    let database_url = config
        .database
        .primary_url
        .as_deref()
        .context("DATABASE_URL is required to run migrations")?;
    connect_database(database_url).await?;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let books: Arc<dyn BooksRepository> =
        match config.database.primary_url.as_deref() {
            Some(database_url) => {
                Arc::new(connect_database(database_url).await?.books())
            }
            None => {
                warn!(
                    "No database configured; serving the seeded in-memory catalogue"
                );
                Arc::new(InMemoryBooksRepository::seeded())
            }
        };

    let covers = orchestrator_from_config(&config.covers)
        .context("failed to build the cover service client")?;

    let addr = config.server.bind_address();
    let state = AppState::new(books, Arc::new(covers), Arc::new(config));
    let router = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Starting Bookshelf server on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
