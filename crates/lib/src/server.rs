//! HTTP server wiring: health route and the LINE webhook endpoint.

use crate::config::{Config, ServerConfig};
use crate::handler::{TranslateBot, WebhookResponse};
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Shared server state. `bot` is None when required configuration was missing
/// at startup; the server still answers every webhook call with a
/// configuration error instead of refusing to start.
#[derive(Clone)]
pub struct AppState {
    bot: Option<Arc<TranslateBot>>,
}

impl AppState {
    pub fn new(bot: Option<Arc<TranslateBot>>) -> Self {
        Self { bot }
    }

    /// Build state from the environment. A missing variable is logged and
    /// leaves the bot unconfigured rather than failing startup.
    pub fn from_env() -> (Self, ServerConfig) {
        match Config::from_env() {
            Ok(config) => {
                let server = config.server.clone();
                let bot = Arc::new(TranslateBot::from_config(&config));
                (Self::new(Some(bot)), server)
            }
            Err(e) => {
                log::error!("bot not configured: {}", e);
                (Self::new(None), ServerConfig::from_env())
            }
        }
    }
}

/// Routes: health on `/`, webhook on `/line/webhook`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/line/webhook", post(line_webhook))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "runtime": "running",
        "configured": state.bot.is_some(),
    }))
}

/// POST /line/webhook — extract the signature header and raw body, dispatch to
/// the bot, map its HTTP-style response straight through.
async fn line_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    let res = match state.bot {
        Some(ref bot) => bot.handle(signature, &body).await,
        None => {
            log::error!("webhook rejected: bot is not configured");
            WebhookResponse::not_configured()
        }
    };
    let status = StatusCode::from_u16(res.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, res.body)
}

/// Bind and serve until SIGINT/SIGTERM.
pub async fn run_server(server: &ServerConfig, state: AppState) -> Result<()> {
    let bind_addr = format!("{}:{}", server.bind, server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("transline listening on {}", bind_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited")?;
    log::info!("transline stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received");
}
