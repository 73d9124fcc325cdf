use serde_json::Value;

use plugwire_command::CommandError;
use plugwire_session::SessionError;
use plugwire_transport::TransportError;

/// Failure of a device operation.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The exchange itself failed (connect, timeout, I/O, framing, cancellation).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Command arguments were rejected before anything was sent.
    #[error("invalid parameter: {0}")]
    Parameter(#[from] CommandError),

    /// The device answered with a nonzero `err_code`.
    #[error("device reported err_code {code}")]
    Protocol { code: i64, response: Value },

    /// The response parsed but lacks the expected sub-tree or field.
    #[error("malformed response: missing or invalid {path}")]
    MalformedResponse { path: String, response: Value },

    /// Local address discovery failed.
    #[error(transparent)]
    Address(#[from] TransportError),
}

impl DeviceError {
    /// Protocol status code, if the device reported one.
    pub fn protocol_code(&self) -> Option<i64> {
        match self {
            Self::Protocol { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeviceError>;
