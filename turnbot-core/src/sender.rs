//! Reply payloads and the send capability.
//!
//! [`ReplySender`] is transport-agnostic; the server's buffered sender and test mocks implement it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Activity, ChannelAccount, ConversationAccount};

/// Abstraction for delivering replies. Implementations map to a transport.
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Delivers one outbound activity. An `Err` is a send failure.
    async fn send(&self, reply: &OutboundActivity) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutboundKind {
    Message,
    Trace,
}

/// One reply produced during a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundActivity {
    #[serde(rename = "type")]
    pub kind: OutboundKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    /// The bot (inbound recipient).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    /// The user (inbound sender).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    pub timestamp: DateTime<Utc>,
}

impl OutboundActivity {
    /// Empty reply of `kind` addressed back along `inbound`.
    pub fn reply_to(inbound: &Activity, kind: OutboundKind) -> Self {
        Self {
            kind,
            text: None,
            name: None,
            label: None,
            value_type: None,
            value: None,
            reply_to_id: inbound.id.clone(),
            conversation: inbound.conversation.clone(),
            from: inbound.recipient.clone(),
            recipient: inbound.from.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Text message reply.
    pub fn message(inbound: &Activity, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::reply_to(inbound, OutboundKind::Message)
        }
    }

    /// Diagnostic trace reply; not shown to users by most channels.
    pub fn trace(
        inbound: &Activity,
        name: impl Into<String>,
        value: impl Into<String>,
        value_type: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
            value_type: Some(value_type.into()),
            label: Some(label.into()),
            ..Self::reply_to(inbound, OutboundKind::Trace)
        }
    }

    pub fn is_message(&self) -> bool {
        self.kind == OutboundKind::Message
    }
}
