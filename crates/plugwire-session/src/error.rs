use std::time::Duration;

use plugwire_frame::FrameError;
use plugwire_transport::TransportError;

/// Classified failure of a single exchange.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Connection establishment failed.
    #[error("connect failed: {0}")]
    Connect(#[from] TransportError),

    /// The idle window elapsed before a complete response frame arrived.
    #[error("no data from device for {0:?}")]
    Timeout(Duration),

    /// Low-level I/O failure on an established connection.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The device closed the connection before a complete frame arrived.
    #[error("connection closed before a complete response frame")]
    ConnectionClosed,

    /// A complete frame arrived but does not hold a response object.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The exchange was cancelled through its cancellation token.
    #[error("exchange cancelled")]
    Cancelled,

    /// The session already carried its one exchange.
    #[error("session already used")]
    AlreadyUsed,
}

impl From<FrameError> for SessionError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Io(io) => Self::Transport(io),
            FrameError::ConnectionClosed => Self::ConnectionClosed,
            FrameError::PayloadTooLarge { .. } => Self::MalformedResponse(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
