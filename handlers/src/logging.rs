//! Any-turn logging handler.

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};
use turnbot_core::{Next, Result, TurnContext, TurnHandler};

/// Logs each activity before the kind chain and the result after it; always continues.
pub struct LoggingHandler;

#[async_trait]
impl TurnHandler for LoggingHandler {
    #[instrument(skip(self, ctx, next))]
    async fn on_turn(&self, ctx: &TurnContext, next: Next<'_>) -> Result<()> {
        let activity = ctx.activity();
        info!(
            turn_id = %ctx.turn_id(),
            activity_type = %activity.activity_type,
            kind = activity.kind().as_str(),
            text = %activity.text.as_deref().unwrap_or(""),
            members_added = activity.members_added.len(),
            "Received activity"
        );

        let result = next.run(ctx).await;

        match &result {
            Ok(()) => debug!(
                turn_id = %ctx.turn_id(),
                replies_sent = ctx.replies_sent(),
                "Processed activity"
            ),
            Err(e) => warn!(
                turn_id = %ctx.turn_id(),
                replies_sent = ctx.replies_sent(),
                error = %e,
                "Activity processing failed"
            ),
        }
        result
    }
}
