//! # Handlers for turnbot
//!
//! Stock handlers: turn logging (any-turn), echo (message), welcome (members added), and the
//! apology error handler.

mod echo;
mod logging;
mod turn_error;
mod welcome;

#[cfg(test)]
mod test;

pub use echo::{echo_text, EchoHandler};
pub use logging::LoggingHandler;
pub use turn_error::{
    ApologyErrorHandler, DEFAULT_APOLOGY_TEXT, TRACE_LABEL, TRACE_NAME, TRACE_VALUE_TYPE,
};
pub use welcome::{WelcomeHandler, DEFAULT_WELCOME_TEXT};
