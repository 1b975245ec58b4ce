//! Error handler for failed turns: log, trace, apologize.

use async_trait::async_trait;
use tracing::{error, warn};
use turnbot_core::{BotError, Result, TurnContext, TurnErrorHandler};

pub const DEFAULT_APOLOGY_TEXT: &str = "The bot encountered an error or bug.";
pub const TRACE_NAME: &str = "OnTurnError Trace";
pub const TRACE_VALUE_TYPE: &str = "https://www.botframework.com/schemas/error";
pub const TRACE_LABEL: &str = "TurnError";

/// Logs the full error, sends a trace activity carrying it, then one generic apology message.
/// Send failures are logged and not returned; the error text never reaches the apology.
pub struct ApologyErrorHandler {
    apology: String,
}

impl ApologyErrorHandler {
    pub fn new(apology: impl Into<String>) -> Self {
        Self {
            apology: apology.into(),
        }
    }
}

impl Default for ApologyErrorHandler {
    fn default() -> Self {
        Self::new(DEFAULT_APOLOGY_TEXT)
    }
}

#[async_trait]
impl TurnErrorHandler for ApologyErrorHandler {
    async fn on_turn_error(&self, ctx: &TurnContext, err: &BotError) -> Result<()> {
        error!(
            turn_id = %ctx.turn_id(),
            activity_type = %ctx.activity().activity_type,
            error = %err,
            details = ?err,
            "[on_turn_error] unhandled error"
        );

        let detail = err.to_string();
        if let Err(e) = ctx
            .send_trace_activity(TRACE_NAME, &detail, TRACE_VALUE_TYPE, TRACE_LABEL)
            .await
        {
            warn!(turn_id = %ctx.turn_id(), error = %e, "Failed to send error trace");
        }

        if let Err(e) = ctx.send_activity(self.apology.clone()).await {
            warn!(turn_id = %ctx.turn_id(), error = %e, "Failed to send apology");
        }
        Ok(())
    }
}
