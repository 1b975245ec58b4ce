//! Core types: activity, accounts, activity kind, turn outcome, and the handler traits.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use serde::{Deserialize, Deserializer, Serialize};

use crate::context::{TurnContext, TurnState};
use crate::error::{BotError, HandlerError, Result};

/// A user or bot identity on the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChannelAccount {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

/// Conversation the activity belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationAccount {
    pub id: String,
}

/// One inbound conversational event. Fields not used by the bot are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub members_added: Vec<ChannelAccount>,
    #[serde(default)]
    pub recipient: Option<ChannelAccount>,
    #[serde(default)]
    pub from: Option<ChannelAccount>,
    #[serde(default)]
    pub conversation: Option<ConversationAccount>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<ChannelAccount>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ChannelAccount>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Activity {
    /// Bare activity of the given type with every optional field empty.
    pub fn new(activity_type: impl Into<String>) -> Self {
        Self {
            activity_type: activity_type.into(),
            id: None,
            text: None,
            members_added: Vec::new(),
            recipient: None,
            from: None,
            conversation: None,
        }
    }

    /// A `message` activity carrying `text`.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new("message")
        }
    }

    /// A `membersAdded` activity; `recipient_id` is the bot's own id.
    pub fn members_added<I, S>(member_ids: I, recipient_id: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members_added: member_ids.into_iter().map(ChannelAccount::new).collect(),
            recipient: Some(ChannelAccount::new(recipient_id)),
            ..Self::new("membersAdded")
        }
    }

    /// Routing kind derived from `type` and `membersAdded`.
    pub fn kind(&self) -> ActivityKind {
        let t = self.activity_type.as_str();
        if t.eq_ignore_ascii_case("message") {
            ActivityKind::Message
        } else if (t.eq_ignore_ascii_case("membersAdded")
            || t.eq_ignore_ascii_case("conversationUpdate"))
            && !self.members_added.is_empty()
        {
            ActivityKind::MembersAdded
        } else {
            ActivityKind::Other
        }
    }

    /// Id of the bot itself, if the channel sent one.
    pub fn recipient_id(&self) -> Option<&str> {
        self.recipient.as_ref().map(|r| r.id.as_str())
    }
}

/// Which kind-specific chain an activity is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Message,
    MembersAdded,
    /// No kind chain runs; the any-turn chain still wraps the turn.
    Other,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Message => "message",
            ActivityKind::MembersAdded => "membersAdded",
            ActivityKind::Other => "other",
        }
    }
}

/// Terminal result of one dispatched turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Completed,
    ErrorHandled,
}

/// A handler in a chain. Call `next.run(ctx)` to pass control on; returning without calling it
/// ends the turn early without signaling a failure.
#[async_trait]
pub trait TurnHandler: Send + Sync {
    async fn on_turn(&self, ctx: &TurnContext, next: Next<'_>) -> Result<()>;
}

/// Receives the error that aborted a turn. Registered once per dispatcher.
#[async_trait]
pub trait TurnErrorHandler: Send + Sync {
    async fn on_turn_error(&self, ctx: &TurnContext, error: &BotError) -> Result<()>;
}

/// Continuation over the rest of a chain. `run` consumes it, so it runs at most once.
///
/// When `then` is set (the any-turn chain), exhausting `chain` dispatches into `then`
/// (the kind chain) and moves the turn through `KindDispatch` and `AnyTurnAfter`.
pub struct Next<'a> {
    chain: &'a [Arc<dyn TurnHandler>],
    then: Option<&'a [Arc<dyn TurnHandler>]>,
}

impl<'a> Next<'a> {
    pub fn new(
        chain: &'a [Arc<dyn TurnHandler>],
        then: Option<&'a [Arc<dyn TurnHandler>]>,
    ) -> Self {
        Self { chain, then }
    }

    pub async fn run(self, ctx: &TurnContext) -> Result<()> {
        if let Some((head, rest)) = self.chain.split_first() {
            let next = Next {
                chain: rest,
                then: self.then,
            };
            return guarded(head.on_turn(ctx, next)).await;
        }

        let Some(kind_chain) = self.then else {
            return Ok(());
        };

        ctx.set_state(TurnState::KindDispatch);
        let result = match kind_chain.split_first() {
            Some((head, rest)) => {
                let next = Next {
                    chain: rest,
                    then: None,
                };
                guarded(head.on_turn(ctx, next)).await
            }
            None => Ok(()),
        };
        ctx.set_state(TurnState::AnyTurnAfter);
        result
    }
}

/// Turns a panic inside one handler into [`HandlerError::Panicked`], so it unwinds through the
/// enclosing handlers as an ordinary `Err`.
async fn guarded<F>(handler: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    match AssertUnwindSafe(handler).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => Err(HandlerError::Panicked(panic_message(panic.as_ref())).into()),
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
