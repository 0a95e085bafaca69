use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use hl_api::{create_router, AppConfig, AppState};
use hl_common::logging::{init_tracing_subscriber, install_tracing_panic_hook};
use hl_common::store::{CandidateStore, VacancyStore};

#[derive(Debug, Clone, Parser)]
#[command(name = "hl-api", about = "HTTP API for the hirelens recruiting dashboard")]
struct Cli {
    /// Server port
    #[arg(long, env = "PORT", default_value_t = 3010)]
    port: u16,

    /// API key for X-API-Key authentication; unset runs the API open
    #[arg(long, env = "HL_API_KEY")]
    api_key: Option<String>,

    /// Comma separated list of allowed CORS origins
    #[arg(long, env = "HL_CORS_ORIGINS", default_value = "http://localhost:3000")]
    cors_origins: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing_subscriber("hl-api");
    install_tracing_panic_hook("hl-api");

    let cli = Cli::parse();
    let config = AppConfig {
        port: cli.port,
        cors_origins: cli
            .cors_origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect(),
        api_key: cli.api_key,
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        candidates: CandidateStore::new(),
        vacancies: VacancyStore::new(),
        // Wire a real chat-completion backend here when one is deployed;
        // without it the analyze endpoint answers 503.
        completion: None,
    });

    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, auth = config.api_key.is_some(), "hl-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install ctrl-c handler");
        return;
    }
    info!("shutdown signal received");
}
