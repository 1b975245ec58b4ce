use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Send error: {0}")]
    Send(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Handler failed: {0}")]
    Failed(String),

    #[error("Handler panicked: {0}")]
    Panicked(String),
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_converts_and_keeps_message() {
        let err: BotError = HandlerError::Failed("boom".to_string()).into();
        assert!(matches!(err, BotError::Handler(HandlerError::Failed(_))));
        assert_eq!(err.to_string(), "Handler error: Handler failed: boom");
    }
}
