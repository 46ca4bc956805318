use std::fs;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use roomboard::auth::session::SessionKeys;
use roomboard::config::ServerConfig;
use roomboard::server::{AppState, create_router};
use roomboard::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "roomboard")]
#[command(about = "A meeting room booking server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "4000")]
        port: u16,

        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },
}

/// The session cookie signing secret. Startup refuses to continue without it
/// rather than fall back to a guessable default.
fn signing_secret() -> anyhow::Result<String> {
    match std::env::var("SECRET_KEY") {
        Ok(secret) if !secret.trim().is_empty() => Ok(secret),
        _ => bail!("SECRET_KEY must be set to a non-empty value to sign session cookies"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("roomboard=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
        } => {
            let secret = signing_secret()?;
            let session_keys = SessionKeys::from_secret(&secret)?;

            let config = ServerConfig {
                host,
                port,
                data_dir: data_dir.into(),
            };

            fs::create_dir_all(&config.data_dir)?;

            let store = SqliteStore::new(config.db_path())?;
            store.initialize()?;

            let state = Arc::new(AppState::new(Arc::new(store), session_keys));
            state.credentials.ensure_seed_admin()?;

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
