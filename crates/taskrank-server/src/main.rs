//! TaskRank HTTP Server

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskrank_server::{create_router, AppState, Config};

/// TaskRank task prioritization server.
#[derive(Parser, Debug)]
#[command(name = "taskrank-server", about = "TaskRank task prioritization server")]
struct Args {
    /// HTTP server address
    #[arg(long, env = "TASKRANK_HTTP_ADDR", default_value = "127.0.0.1:8000")]
    http_addr: String,

    /// Number of tasks returned by the suggest endpoint
    #[arg(long, env = "TASKRANK_SUGGESTION_LIMIT", default_value_t = taskrank_core::DEFAULT_SUGGESTION_LIMIT)]
    suggestion_limit: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskrank=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    let config = Config {
        http_bind_addr: args.http_addr,
        suggestion_limit: args.suggestion_limit,
    };
    let http_addr: SocketAddr = config.http_bind_addr.parse()?;

    info!(
        http_addr = %http_addr,
        suggestion_limit = config.suggestion_limit,
        "Starting TaskRank server"
    );

    let state = AppState::new(config);
    let http_router = create_router(state);

    let http_listener = TcpListener::bind(http_addr).await?;
    let http_server = axum::serve(http_listener, http_router);

    info!("HTTP server listening on {}", http_addr);

    tokio::select! {
        result = http_server => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server error");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
