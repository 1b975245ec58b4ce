//! # Handler chain
//!
//! [`TurnDispatcher`] runs one turn per inbound activity: the any-turn chain wraps the
//! kind-specific chain (message or members-added), every handler receives a [`Next`]
//! continuation, and any handler error or panic is isolated to its turn and handed to the
//! injected [`TurnErrorHandler`].

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info, instrument, warn};
use turnbot_core::{
    panic_message, Activity, ActivityKind, BotError, HandlerError, Next, ReplySender,
    TurnContext, TurnErrorHandler, TurnHandler, TurnOutcome, TurnState,
};

/// Ordered handler lists per activity kind plus the turn error handler.
#[derive(Clone)]
pub struct TurnDispatcher {
    any_turn: Vec<Arc<dyn TurnHandler>>,
    message: Vec<Arc<dyn TurnHandler>>,
    members_added: Vec<Arc<dyn TurnHandler>>,
    error_handler: Arc<dyn TurnErrorHandler>,
}

impl TurnDispatcher {
    /// Creates a dispatcher with empty chains that reports failed turns to `error_handler`.
    pub fn new(error_handler: Arc<dyn TurnErrorHandler>) -> Self {
        Self {
            any_turn: Vec::new(),
            message: Vec::new(),
            members_added: Vec::new(),
            error_handler,
        }
    }

    /// Appends a handler that wraps every turn (runs before and after the kind chain).
    pub fn on_any_turn(mut self, handler: Arc<dyn TurnHandler>) -> Self {
        self.any_turn.push(handler);
        self
    }

    /// Appends a handler for `message` activities.
    pub fn on_message(mut self, handler: Arc<dyn TurnHandler>) -> Self {
        self.message.push(handler);
        self
    }

    /// Appends a handler for member-added activities.
    pub fn on_members_added(mut self, handler: Arc<dyn TurnHandler>) -> Self {
        self.members_added.push(handler);
        self
    }

    /// Registered handler counts: (any-turn, message, members-added).
    pub fn handler_counts(&self) -> (usize, usize, usize) {
        (
            self.any_turn.len(),
            self.message.len(),
            self.members_added.len(),
        )
    }

    fn kind_chain(&self, kind: ActivityKind) -> &[Arc<dyn TurnHandler>] {
        match kind {
            ActivityKind::Message => &self.message,
            ActivityKind::MembersAdded => &self.members_added,
            ActivityKind::Other => &[],
        }
    }

    /// Runs one turn for `activity`, sending replies through `sender`. Never fails: a handler
    /// error ends in [`TurnOutcome::ErrorHandled`] after the error handler ran.
    #[instrument(skip(self, activity, sender), fields(activity_type = %activity.activity_type))]
    pub async fn dispatch(&self, activity: Activity, sender: Arc<dyn ReplySender>) -> TurnOutcome {
        let ctx = TurnContext::new(activity, sender);
        self.run_turn(&ctx).await
    }

    /// Runs the chains against `ctx`. A context that already left `Received` is not run again.
    async fn run_turn(&self, ctx: &TurnContext) -> TurnOutcome {
        let activity = ctx.activity();
        let kind = activity.kind();

        let state = ctx.state();
        if state != TurnState::Received {
            warn!(
                turn_id = %ctx.turn_id(),
                state = ?state,
                "step: turn already started, not dispatching again"
            );
            return match state {
                TurnState::Completed => TurnOutcome::Completed,
                _ => TurnOutcome::ErrorHandled,
            };
        }

        info!(
            turn_id = %ctx.turn_id(),
            activity_type = %activity.activity_type,
            kind = kind.as_str(),
            members_added = activity.members_added.len(),
            "step: activity received"
        );

        ctx.set_state(TurnState::AnyTurnBefore);
        let next = Next::new(&self.any_turn, Some(self.kind_chain(kind)));
        // Handler panics already surface as errors inside `Next::run`.
        let result = match AssertUnwindSafe(next.run(ctx)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => Err(HandlerError::Panicked(panic_message(panic.as_ref())).into()),
        };

        match result {
            Ok(()) => {
                ctx.set_state(TurnState::Completed);
                info!(
                    turn_id = %ctx.turn_id(),
                    activity_type = %activity.activity_type,
                    kind = kind.as_str(),
                    replies_sent = ctx.replies_sent(),
                    outcome = "completed",
                    "step: turn finished"
                );
                TurnOutcome::Completed
            }
            Err(e) => {
                self.handle_error(ctx, &e).await;
                ctx.set_state(TurnState::ErrorHandled);
                info!(
                    turn_id = %ctx.turn_id(),
                    activity_type = %activity.activity_type,
                    kind = kind.as_str(),
                    replies_sent = ctx.replies_sent(),
                    outcome = "error_handled",
                    "step: turn finished"
                );
                TurnOutcome::ErrorHandled
            }
        }
    }

    async fn handle_error(&self, ctx: &TurnContext, e: &BotError) {
        error!(
            turn_id = %ctx.turn_id(),
            state = ?ctx.state(),
            error = %e,
            "step: turn aborted, invoking error handler"
        );

        let handled = AssertUnwindSafe(self.error_handler.on_turn_error(ctx, e))
            .catch_unwind()
            .await;
        match handled {
            Ok(Ok(())) => {}
            Ok(Err(secondary)) => {
                warn!(
                    turn_id = %ctx.turn_id(),
                    error = %secondary,
                    "Error handler failed; ignoring"
                );
            }
            Err(panic) => {
                warn!(
                    turn_id = %ctx.turn_id(),
                    panic = %panic_message(panic.as_ref()),
                    "Error handler panicked; ignoring"
                );
            }
        }
    }
}
