use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors surfaced through the bridge. The `Display` strings are the exact
/// messages delivered to the caller's error callback.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid arguments")]
    InvalidArguments,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("Unable to present the payment sheet: {0}")]
    Presentation(String),
    #[error("Payment cancelled")]
    Cancelled,
    #[error("Failed to parse payment result")]
    ResultEncoding(#[source] serde_json::Error),
    #[error("Malformed command: {0}")]
    MalformedCommand(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Callback channel closed")]
    ChannelClosed,
}
