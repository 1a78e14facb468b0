use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use pdfchat_llm::PdfChat;
use pdfchat_server::{build_router, logging, AppState};

fn load_config() -> pdfchat_core::Config {
    pdfchat_core::config::load_dotenv();
    pdfchat_core::Config::from_env()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config();
    let _log_guard = logging::init(&config.logging)?;
    config.log_summary();

    let chat = match PdfChat::from_config(&config.llm) {
        Ok(chat) => {
            info!("LLM chat ready (model: {})", config.llm.model);
            Some(chat)
        }
        Err(e) => {
            warn!("LLM chat not available: {}. Chat requests will fail until it is configured.", e);
            None
        }
    };

    let state = Arc::new(AppState::new(chat));
    let app = build_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);
    info!("API docs at http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
