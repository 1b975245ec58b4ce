//! Unit test module
//!
//! Handler unit tests live here, separate from source files.
//! Each handler is driven directly with a hand-built [`turnbot_core::Next`].

mod turn_error_handler_test;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use turnbot_core::{
    BotError, Next, OutboundActivity, ReplySender, Result, TurnContext, TurnHandler,
};

/// Records replies; fails every send when `fail` is set.
#[derive(Default)]
pub(crate) struct MockSender {
    pub sent: Mutex<Vec<OutboundActivity>>,
    pub attempts: AtomicUsize,
    pub fail: AtomicBool,
}

impl MockSender {
    pub fn failing() -> Self {
        let sender = Self::default();
        sender.fail.store(true, Ordering::SeqCst);
        sender
    }

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
impl ReplySender for MockSender {
    async fn send(&self, reply: &OutboundActivity) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(BotError::Send("mock send failure".to_string()));
        }
        self.sent.lock().unwrap().push(reply.clone());
        Ok(())
    }
}

/// Counts how often the continuation reached it.
#[derive(Default)]
pub(crate) struct NextProbe {
    pub reached: AtomicUsize,
}

#[async_trait]
impl TurnHandler for NextProbe {
    async fn on_turn(&self, ctx: &TurnContext, next: Next<'_>) -> Result<()> {
        self.reached.fetch_add(1, Ordering::SeqCst);
        next.run(ctx).await
    }
}

/// Runs `handler` with a chain containing only `probe` after it.
pub(crate) async fn run_with_probe(
    handler: &dyn TurnHandler,
    ctx: &TurnContext,
    probe: Arc<NextProbe>,
) -> Result<()> {
    let rest: Vec<Arc<dyn TurnHandler>> = vec![probe];
    handler.on_turn(ctx, Next::new(&rest, None)).await
}
