//! Shared fixtures for dispatcher integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use turnbot_core::{
    BotError, Next, OutboundActivity, ReplySender, Result, TurnContext, TurnErrorHandler,
    TurnHandler,
};

/// Sender that records every reply.
#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<OutboundActivity>>,
}

impl RecordingSender {
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r.text.clone())
            .collect()
    }
}

#[async_trait]
impl ReplySender for RecordingSender {
    async fn send(&self, reply: &OutboundActivity) -> Result<()> {
        self.sent.lock().unwrap().push(reply.clone());
        Ok(())
    }
}

pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Pushes `before_NAME` / `after_NAME` around `next`.
pub struct WrapHandler {
    pub name: String,
    pub log: EventLog,
}

#[async_trait]
impl TurnHandler for WrapHandler {
    async fn on_turn(&self, ctx: &TurnContext, next: Next<'_>) -> Result<()> {
        self.log.lock().unwrap().push(format!("before_{}", self.name));
        let result = next.run(ctx).await;
        self.log.lock().unwrap().push(format!("after_{}", self.name));
        result
    }
}

/// Pushes `NAME`, sends `NAME` as a reply, then continues.
pub struct StepHandler {
    pub name: String,
    pub log: EventLog,
}

#[async_trait]
impl TurnHandler for StepHandler {
    async fn on_turn(&self, ctx: &TurnContext, next: Next<'_>) -> Result<()> {
        self.log.lock().unwrap().push(self.name.clone());
        ctx.send_activity(self.name.clone()).await?;
        next.run(ctx).await
    }
}

/// Records the error message of every call.
#[derive(Default)]
pub struct RecordingErrorHandler {
    pub errors: Mutex<Vec<String>>,
}

#[async_trait]
impl TurnErrorHandler for RecordingErrorHandler {
    async fn on_turn_error(&self, ctx: &TurnContext, error: &BotError) -> Result<()> {
        self.errors.lock().unwrap().push(error.to_string());
        ctx.send_activity("sorry").await
    }
}
