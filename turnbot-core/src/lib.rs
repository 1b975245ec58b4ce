//! # turnbot-core
//!
//! Core types and traits for the turn-based bot: [`Activity`], [`TurnContext`], the [`ReplySender`]
//! send capability, the [`TurnHandler`] / [`TurnErrorHandler`] traits, and tracing initialization.
//! Transport-agnostic; used by handler-chain, handlers and turnbot-server.

pub mod context;
pub mod error;
pub mod logger;
pub mod sender;
pub mod types;

pub use context::{TurnContext, TurnState};
pub use error::{BotError, HandlerError, Result};
pub use logger::{init_tracing, open_log_file};
pub use sender::{OutboundActivity, OutboundKind, ReplySender};
pub use types::{
    panic_message, Activity, ActivityKind, ChannelAccount, ConversationAccount, Next, TurnErrorHandler,
    TurnHandler, TurnOutcome,
};
