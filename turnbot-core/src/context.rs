//! Per-turn context: the inbound activity, the send capability, and the turn's progress.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::sender::{OutboundActivity, ReplySender};
use crate::types::Activity;

/// Where a turn is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TurnState {
    Received = 0,
    AnyTurnBefore = 1,
    KindDispatch = 2,
    AnyTurnAfter = 3,
    Completed = 4,
    ErrorHandled = 5,
}

impl TurnState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => TurnState::Received,
            1 => TurnState::AnyTurnBefore,
            2 => TurnState::KindDispatch,
            3 => TurnState::AnyTurnAfter,
            4 => TurnState::Completed,
            _ => TurnState::ErrorHandled,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnState::Completed | TurnState::ErrorHandled)
    }
}

/// Handle for one turn. Created by the dispatcher for each inbound activity and dropped when
/// the turn reaches a terminal state; handlers only ever see a borrow.
pub struct TurnContext {
    turn_id: String,
    activity: Activity,
    sender: Arc<dyn ReplySender>,
    state: AtomicU8,
    replies_sent: AtomicUsize,
}

impl TurnContext {
    pub fn new(activity: Activity, sender: Arc<dyn ReplySender>) -> Self {
        Self {
            turn_id: Uuid::new_v4().to_string(),
            activity,
            sender,
            state: AtomicU8::new(TurnState::Received as u8),
            replies_sent: AtomicUsize::new(0),
        }
    }

    pub fn turn_id(&self) -> &str {
        &self.turn_id
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn state(&self) -> TurnState {
        TurnState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Moves the turn to `state`. Driven by the dispatcher and [`crate::Next`].
    pub fn set_state(&self, state: TurnState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// Number of replies the sender accepted so far.
    pub fn replies_sent(&self) -> usize {
        self.replies_sent.load(Ordering::SeqCst)
    }

    /// Sends a text message back to the conversation.
    pub async fn send_activity(&self, text: impl Into<String>) -> Result<()> {
        let reply = OutboundActivity::message(&self.activity, text);
        self.send_reply(&reply).await
    }

    /// Sends a trace activity (diagnostics; hidden from most channels).
    pub async fn send_trace_activity(
        &self,
        name: &str,
        value: &str,
        value_type: &str,
        label: &str,
    ) -> Result<()> {
        let reply = OutboundActivity::trace(&self.activity, name, value, value_type, label);
        self.send_reply(&reply).await
    }

    /// Hands `reply` to the sender and logs the result.
    pub async fn send_reply(&self, reply: &OutboundActivity) -> Result<()> {
        match self.sender.send(reply).await {
            Ok(()) => {
                self.replies_sent.fetch_add(1, Ordering::SeqCst);
                info!(
                    turn_id = %self.turn_id,
                    reply_kind = ?reply.kind,
                    reply_len = reply.text.as_ref().map(|t| t.len()),
                    "step: reply sent"
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    turn_id = %self.turn_id,
                    reply_kind = ?reply.kind,
                    error = %e,
                    "step: reply send failed"
                );
                Err(e)
            }
        }
    }
}
