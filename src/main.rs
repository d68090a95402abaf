use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use validator::Validate;

use antiquarian::config::ServerConfig;
use antiquarian::server::{AppState, create_router};
use antiquarian::store::{SqliteStore, Store};
use antiquarian::types::{DEFAULT_CONTACT_EMAIL, DEFAULT_STORE_NAME, StoreSettingsUpdate};

#[derive(Parser)]
#[command(name = "antiquarian")]
#[command(about = "Catalog and content backend for an antique store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// TOML file with server settings; flags take precedence
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short, env = "SERVER_PORT")]
        port: Option<u16>,

        /// Data directory for the database
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Browser origin allowed by CORS (repeatable)
        #[arg(long = "allow-origin")]
        allowed_origins: Vec<String>,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Initialize the server (create database and store settings)
    Init {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,

        /// Store name to seed the settings with
        #[arg(long)]
        store_name: Option<String>,

        /// Contact email to seed the settings with
        #[arg(long)]
        contact_email: Option<String>,
    },
}

fn run_init(
    data_dir: PathBuf,
    non_interactive: bool,
    store_name: Option<String>,
    contact_email: Option<String>,
) -> anyhow::Result<()> {
    fs::create_dir_all(&data_dir)?;

    let config = ServerConfig {
        data_dir,
        ..ServerConfig::default()
    };
    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;

    if let Some(existing) = store.get_store_settings()? {
        println!(
            "Database already initialized for '{}' at {}",
            existing.store_name,
            config.db_path().display()
        );
        return Ok(());
    }

    let (store_name, contact_email) = if non_interactive {
        (store_name, contact_email)
    } else {
        prompt_settings(store_name, contact_email)?
    };

    let update = StoreSettingsUpdate {
        store_name,
        contact_email,
        ..Default::default()
    };
    if let Err(errors) = update.validate() {
        bail!("Invalid store settings: {errors}");
    }

    let settings = store.upsert_store_settings(&update)?;

    println!();
    println!("========================================");
    println!("Database created at: {}", config.db_path().display());
    println!("Store name:    {}", settings.store_name);
    println!("Contact email: {}", settings.contact_email);
    println!("========================================");
    println!();

    Ok(())
}

fn prompt_settings(
    store_name: Option<String>,
    contact_email: Option<String>,
) -> anyhow::Result<(Option<String>, Option<String>)> {
    let store_name = match store_name {
        Some(name) => name,
        None => inquire::Text::new("Store name:")
            .with_default(DEFAULT_STORE_NAME)
            .with_validator(|input: &str| {
                if input.trim().is_empty() {
                    Ok(inquire::validator::Validation::Invalid(
                        "Store name cannot be empty".into(),
                    ))
                } else {
                    Ok(inquire::validator::Validation::Valid)
                }
            })
            .prompt()?,
    };

    let contact_email = match contact_email {
        Some(email) => email,
        None => inquire::Text::new("Contact email:")
            .with_default(DEFAULT_CONTACT_EMAIL)
            .prompt()?,
    };

    Ok((Some(store_name), Some(contact_email)))
}

fn resolve_config(
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    data_dir: Option<PathBuf>,
    allowed_origins: Vec<String>,
) -> anyhow::Result<ServerConfig> {
    let mut resolved = match config {
        Some(path) => ServerConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ServerConfig::default(),
    };

    if let Some(host) = host {
        resolved.host = host;
    }
    if let Some(port) = port {
        resolved.port = port;
    }
    if let Some(data_dir) = data_dir {
        resolved.data_dir = data_dir;
    }
    if !allowed_origins.is_empty() {
        resolved.allowed_origins = allowed_origins;
    }

    Ok(resolved)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("antiquarian=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Init {
                data_dir,
                non_interactive,
                store_name,
                contact_email,
            } => {
                run_init(data_dir, non_interactive, store_name, contact_email)?;
            }
        },
        Commands::Serve {
            config,
            host,
            port,
            data_dir,
            allowed_origins,
        } => {
            let config = resolve_config(config, host, port, data_dir, allowed_origins)?;

            if !config.db_path().exists() {
                bail!(
                    "Server not initialized. Run 'antiquarian admin init' first to create the database."
                );
            }

            let store = SqliteStore::new(config.db_path())?;
            store.initialize()?;

            let state = Arc::new(
                AppState::new(Arc::new(store))
                    .with_allowed_origins(config.allowed_origins.clone()),
            );

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
