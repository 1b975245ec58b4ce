//! Unit tests for ApologyErrorHandler.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use turnbot_core::{Activity, BotError, HandlerError, OutboundKind, TurnContext, TurnErrorHandler};

use super::MockSender;
use crate::{ApologyErrorHandler, DEFAULT_APOLOGY_TEXT, TRACE_LABEL, TRACE_NAME, TRACE_VALUE_TYPE};

fn boom() -> BotError {
    HandlerError::Failed("boom".to_string()).into()
}

#[tokio::test]
async fn test_sends_trace_then_single_apology() {
    let sender = Arc::new(MockSender::default());
    let ctx = TurnContext::new(Activity::message("hi"), sender.clone());

    ApologyErrorHandler::default()
        .on_turn_error(&ctx, &boom())
        .await
        .unwrap();

    let sent = sender.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);

    assert_eq!(sent[0].kind, OutboundKind::Trace);
    assert_eq!(sent[0].name.as_deref(), Some(TRACE_NAME));
    assert_eq!(sent[0].label.as_deref(), Some(TRACE_LABEL));
    assert_eq!(sent[0].value_type.as_deref(), Some(TRACE_VALUE_TYPE));
    assert!(sent[0].value.as_deref().unwrap_or("").contains("boom"));

    assert_eq!(sent[1].kind, OutboundKind::Message);
    assert_eq!(sent[1].text.as_deref(), Some(DEFAULT_APOLOGY_TEXT));
}

#[tokio::test]
async fn test_apology_does_not_leak_error_detail() {
    let sender = Arc::new(MockSender::default());
    let ctx = TurnContext::new(Activity::message("hi"), sender.clone());

    ApologyErrorHandler::new("Sorry!")
        .on_turn_error(&ctx, &boom())
        .await
        .unwrap();

    let apologies: Vec<String> = sender
        .sent
        .lock()
        .unwrap()
        .iter()
        .filter(|r| r.is_message())
        .filter_map(|r| r.text.clone())
        .collect();
    assert_eq!(apologies, vec!["Sorry!"]);
}

#[tokio::test]
async fn test_send_failures_are_swallowed() {
    let sender = Arc::new(MockSender::failing());
    let ctx = TurnContext::new(Activity::message("hi"), sender.clone());

    let result = ApologyErrorHandler::default().on_turn_error(&ctx, &boom()).await;

    assert!(result.is_ok());
    assert_eq!(sender.attempts.load(Ordering::SeqCst), 2);
}
