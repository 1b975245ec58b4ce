//! # turnbot-server
//!
//! Webhook transport for the turn dispatcher: env config, axum router (`GET /`,
//! `POST /api/messages`), a reply sender that buffers each turn's replies into the HTTP
//! response, and the `turnbot` CLI.

pub mod cli;
mod config;
mod sender;
mod webhook;

pub use config::ServerConfig;
pub use sender::BufferedSender;
pub use webhook::{build_dispatcher, create_router, serve, AppState, ExpectedReplies};
