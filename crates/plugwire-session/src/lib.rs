//! One connection, one request, one outcome.
//!
//! A [`Session`] connects to a plug, writes a single framed command, then
//! reassembles and parses the single response frame. Every way the exchange
//! can end (response, idle timeout, peer close, I/O failure, cancellation)
//! is a terminal state of an explicit state machine, and every terminal
//! transition releases the connection.

pub mod config;
pub mod error;
pub mod response;
pub mod session;
pub mod state;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use response::Response;
pub use session::{exchange, Session};
pub use state::SessionState;
