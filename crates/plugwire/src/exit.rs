use std::fmt;
use std::io;

use plugwire_device::DeviceError;
use plugwire_session::SessionError;
use plugwire_transport::TransportError;

// Exit code constants aligned with the sysexits/timeout(1) conventions.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        _ => TRANSPORT_ERROR,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Connect { source, .. } if source.kind() == io::ErrorKind::TimedOut => {
            CliError::new(TIMEOUT, format!("{context}: {source}"))
        }
        TransportError::AddressUnresolved(_) => CliError::new(TIMEOUT, format!("{context}: {err}")),
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn session_error(context: &str, err: SessionError) -> CliError {
    match err {
        SessionError::Connect(err) => transport_error(context, err),
        SessionError::Transport(err) => io_error(context, err),
        SessionError::Timeout(_) => CliError::new(TIMEOUT, format!("{context}: {err}")),
        SessionError::ConnectionClosed => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
        }
        SessionError::MalformedResponse(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        SessionError::Cancelled => CliError::new(FAILURE, format!("{context}: {err}")),
        SessionError::AlreadyUsed => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}

pub fn device_error(context: &str, err: DeviceError) -> CliError {
    match err {
        DeviceError::Session(err) => session_error(context, err),
        DeviceError::Address(err) => transport_error(context, err),
        DeviceError::Parameter(_) => CliError::new(USAGE, format!("{context}: {err}")),
        DeviceError::MalformedResponse { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        DeviceError::Protocol { .. } => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    #[test]
    fn timeouts_map_to_124() {
        let err = device_error(
            "get failed",
            DeviceError::Session(SessionError::Timeout(Duration::from_millis(100))),
        );
        assert_eq!(err.code, TIMEOUT);

        let err = device_error(
            "local-ip failed",
            DeviceError::Address(TransportError::AddressUnresolved(Duration::from_secs(1))),
        );
        assert_eq!(err.code, TIMEOUT);
    }

    #[test]
    fn refused_connection_is_transport_error() {
        let err = device_error(
            "get failed",
            DeviceError::Session(SessionError::Connect(TransportError::Connect {
                addr: "127.0.0.1:9999".into(),
                source: io::Error::from(io::ErrorKind::ConnectionRefused),
            })),
        );
        assert_eq!(err.code, TRANSPORT_ERROR);
        assert!(err.message.contains("127.0.0.1:9999"));
    }

    #[test]
    fn response_problems_are_data_invalid_or_failure() {
        let malformed = DeviceError::MalformedResponse {
            path: "system.get_sysinfo".into(),
            response: json!({}),
        };
        assert_eq!(device_error("x", malformed).code, DATA_INVALID);

        let protocol = DeviceError::Protocol {
            code: -3,
            response: json!({"err_code": -3}),
        };
        assert_eq!(device_error("x", protocol).code, FAILURE);
    }
}
