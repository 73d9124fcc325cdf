//! Connection-oriented transport for smart-plug control.
//!
//! This is the lowest layer of plugwire. It only knows how to open a TCP
//! connection to a device (keep-alive disabled, one connection per request)
//! and how to find the caller's own address on the local network.
//! Everything else builds on the [`tokio::net::TcpStream`] returned here.

pub mod error;
pub mod local;
pub mod tcp;

pub use error::{Result, TransportError};
pub use local::{local_address, local_address_with_timeout, DEFAULT_ADDRESS_TIMEOUT};
pub use tcp::{connect, DEFAULT_PORT};
