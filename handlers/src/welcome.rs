use async_trait::async_trait;
use tracing::{debug, info, instrument};
use turnbot_core::{Next, Result, TurnContext, TurnHandler};

pub const DEFAULT_WELCOME_TEXT: &str = "Hello and welcome!";

/// Sends one welcome per added member, in order, skipping the bot itself.
pub struct WelcomeHandler {
    text: String,
}

impl WelcomeHandler {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for WelcomeHandler {
    fn default() -> Self {
        Self::new(DEFAULT_WELCOME_TEXT)
    }
}

#[async_trait]
impl TurnHandler for WelcomeHandler {
    #[instrument(skip(self, ctx, next))]
    async fn on_turn(&self, ctx: &TurnContext, next: Next<'_>) -> Result<()> {
        let activity = ctx.activity();
        let bot_id = activity.recipient_id();

        for member in &activity.members_added {
            if Some(member.id.as_str()) == bot_id {
                debug!(turn_id = %ctx.turn_id(), member_id = %member.id, "Skipping bot's own join");
                continue;
            }
            info!(turn_id = %ctx.turn_id(), member_id = %member.id, "Welcoming member");
            ctx.send_activity(self.text.clone()).await?;
        }

        next.run(ctx).await
    }
}
