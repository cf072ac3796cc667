use clap::Parser;
use colored::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error_common::{Result, ScribeError};
use extraction_engine::EngineConfig;
use scribe_server::{create_app, ScribeServer};

/// Scribe Engine HTTP/WebSocket server
#[derive(Parser, Debug)]
#[command(name = "scribe-server")]
#[command(about = "Live clinical dictation server: heuristic + AI extraction over WebSocket")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env is optional; real deployments set the environment directly
    dotenvy::dotenv().ok();

    init_tracing(args.verbose);

    info!("🩺 {}", "Starting Scribe Engine server".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());
    info!(
        "🌐 Bind address: {}",
        format!("{}:{}", args.host, args.port).bright_yellow()
    );

    let engine = EngineConfig::from_env().map_err(|e| ScribeError::ConfigError(e.to_string()))?;
    let server = ScribeServer::new(engine)?;
    info!(
        "🤖 AI provider: {}",
        server.provider_name().bright_green()
    );

    let app = create_app(server);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ScribeError::InternalError(format!("failed to bind {}: {}", addr, e)))?;

    info!("✅ {}", "Scribe Engine server ready".bright_green());

    axum::serve(listener, app)
        .await
        .map_err(|e| ScribeError::InternalError(format!("server error: {}", e)))?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "scribe_server=debug,extraction_engine=debug,tower_http=debug"
    } else {
        "scribe_server=info,extraction_engine=info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
