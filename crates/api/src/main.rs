//! User API - HTTP REST API for user management.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_api_lib::config::ApiConfig;

#[derive(Parser)]
#[command(name = "user-api")]
#[command(author, version, about = "User management HTTP API", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Env file to load instead of `.env`
    #[arg(long, global = true, env = "ENV_FILE")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides API_HOST)
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Port to listen on (overrides API_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load environment variables
    let env_loaded = match &cli.env_file {
        Some(path) => dotenvy::from_path(path).map_err(|e| (path.clone(), e)),
        None => {
            dotenvy::dotenv().ok();
            Ok(())
        }
    };

    init_tracing(cli.verbose);

    if let Err((path, e)) = env_loaded {
        tracing::error!("Could not load env file {}: {}", path.display(), e);
        std::process::exit(1);
    }

    let mut config = ApiConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            user_api_lib::run_server(config).await
        }
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
