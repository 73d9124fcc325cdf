//! Smart-plug operations.
//!
//! [`Plug`] maps each public operation onto exactly one session: build the
//! request, run the exchange, check `err_code` and extract the relevant
//! sub-tree. Operations take `&self` and may run concurrently; the only
//! shared state is the last-seen [`DeviceSnapshot`].

pub mod config;
pub mod error;
pub mod plug;
pub mod snapshot;

pub use config::PlugConfig;
pub use error::{DeviceError, Result};
pub use plug::{DeviceInfo, Plug};
pub use snapshot::DeviceSnapshot;
