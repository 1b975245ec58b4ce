use async_trait::async_trait;
use tracing::{info, instrument};
use turnbot_core::{Next, Result, TurnContext, TurnHandler};

/// Reply text for an inbound message.
pub fn echo_text(text: &str) -> String {
    format!("Echo: {}", text)
}

/// Replies to every message with [`echo_text`] of its text, then continues.
pub struct EchoHandler;

#[async_trait]
impl TurnHandler for EchoHandler {
    #[instrument(skip(self, ctx, next))]
    async fn on_turn(&self, ctx: &TurnContext, next: Next<'_>) -> Result<()> {
        let text = ctx.activity().text.as_deref().unwrap_or("");
        info!(turn_id = %ctx.turn_id(), message_content = %text, "Echoing message");
        ctx.send_activity(echo_text(text)).await?;
        next.run(ctx).await
    }
}
