//! Local-network client for smart plugs.
//!
//! plugwire talks to plugs over their proprietary TCP protocol: a JSON
//! request, enciphered with a key-chained XOR transform and prefixed with
//! its length, answered by a single response frame on the same connection.
//!
//! # Crate Structure
//!
//! - [`transport`] — TCP connection setup and local address discovery
//! - [`frame`] — XOR cipher and length-prefixed framing codec
//! - [`command`] — Catalog of request trees and parameterized builders
//! - [`session`] — One-connection, one-exchange state machine
//! - [`device`] — Typed plug operations (`Plug`)

/// Re-export transport types.
pub mod transport {
    pub use plugwire_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use plugwire_frame::*;
}

/// Re-export command catalog types.
pub mod command {
    pub use plugwire_command::*;
}

/// Re-export session types.
pub mod session {
    pub use plugwire_session::*;
}

/// Re-export device types.
pub mod device {
    pub use plugwire_device::*;
}

pub use plugwire_device::{DeviceError, DeviceInfo, DeviceSnapshot, Plug, PlugConfig};
