use std::time::Duration;

/// Errors that can occur while establishing a connection or probing the local network.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The host name could not be resolved to any socket address.
    #[error("failed to resolve {addr}: {source}")]
    Resolve {
        addr: String,
        source: std::io::Error,
    },

    /// Failed to connect to the specified address.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    /// The local network address could not be determined in time.
    #[error("could not retrieve own ip within {0:?}")]
    AddressUnresolved(Duration),
}

pub type Result<T> = std::result::Result<T, TransportError>;
