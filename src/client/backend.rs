use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while talking to the chat server.
#[derive(Debug)]
pub enum BackendError {
    /// Server answered with a non-2xx status.
    Rejected { status: u16, message: String },
    /// No response at all (connection refused, DNS, broken pipe).
    Transport(String),
    /// 2xx response whose body is not the expected JSON.
    Parse(String),
    /// Request refused locally before anything was sent.
    InvalidInput(String),
    /// Local file problem while uploading or downloading.
    Io(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Rejected { status, message } => {
                write!(f, "server rejected request (HTTP {status}): {message}")
            }
            BackendError::Transport(msg) => write!(f, "transport error: {msg}"),
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
            BackendError::InvalidInput(msg) => write!(f, "{msg}"),
            BackendError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(e: std::io::Error) -> Self {
        BackendError::Io(e.to_string())
    }
}

/// One message in, one reply out.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns a short identifier for logs.
    fn name(&self) -> &str;

    /// Sends a single user message and waits for the bot's reply text.
    async fn send(&self, message: &str) -> Result<String, BackendError>;
}
