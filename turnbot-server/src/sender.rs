//! Collects a turn's replies so the webhook can return them in its response body.

use async_trait::async_trait;
use tokio::sync::Mutex;
use turnbot_core::{OutboundActivity, ReplySender, Result};

/// [`ReplySender`] that buffers replies in send order. One per turn.
#[derive(Default)]
pub struct BufferedSender {
    replies: Mutex<Vec<OutboundActivity>>,
}

impl BufferedSender {
    /// Drains the buffered replies.
    pub async fn take(&self) -> Vec<OutboundActivity> {
        std::mem::take(&mut *self.replies.lock().await)
    }
}

#[async_trait]
impl ReplySender for BufferedSender {
    async fn send(&self, reply: &OutboundActivity) -> Result<()> {
        self.replies.lock().await.push(reply.clone());
        Ok(())
    }
}
