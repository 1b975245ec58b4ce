//! Webhook routes: health check and activity intake. Each POST is one turn.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use handler_chain::TurnDispatcher;
use handlers::{ApologyErrorHandler, EchoHandler, LoggingHandler, WelcomeHandler};
use serde::{Deserialize, Serialize};
use tracing::info;
use turnbot_core::{Activity, OutboundActivity};

use crate::config::ServerConfig;
use crate::sender::BufferedSender;

pub const HEALTH_TEXT: &str = "Bot is running!";

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<TurnDispatcher>,
}

/// Response body of `POST /api/messages`: the turn's replies in send order.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpectedReplies {
    pub activities: Vec<OutboundActivity>,
}

/// Echo bot wiring: logging around every turn, echo for messages, welcome for new members.
pub fn build_dispatcher(config: &ServerConfig) -> TurnDispatcher {
    TurnDispatcher::new(Arc::new(ApologyErrorHandler::default()))
        .on_any_turn(Arc::new(LoggingHandler))
        .on_message(Arc::new(EchoHandler))
        .on_members_added(Arc::new(WelcomeHandler::new(config.welcome_text.clone())))
}

pub fn create_router(dispatcher: Arc<TurnDispatcher>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/messages", post(handle_activity))
        .with_state(AppState { dispatcher })
}

async fn health() -> &'static str {
    info!("Received GET request on /");
    HEALTH_TEXT
}

async fn handle_activity(
    State(state): State<AppState>,
    Json(activity): Json<Activity>,
) -> Json<ExpectedReplies> {
    info!(
        activity_type = %activity.activity_type,
        activity_id = ?activity.id,
        "Received a message on /api/messages"
    );

    let sender = Arc::new(BufferedSender::default());
    let outcome = state.dispatcher.dispatch(activity, sender.clone()).await;
    let activities = sender.take().await;

    info!(outcome = ?outcome, replies = activities.len(), "Message processed");
    Json(ExpectedReplies { activities })
}

/// Binds `config.socket_addr()` and serves until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let dispatcher = Arc::new(build_dispatcher(config));
    let (any_turn, message, members_added) = dispatcher.handler_counts();
    info!(any_turn, message, members_added, "Dispatcher ready");

    let app = create_router(dispatcher);
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(addr = %addr, "turnbot listening; POST activities to /api/messages");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("turnbot stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
