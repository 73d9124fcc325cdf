//! Catalog of remote-procedure requests understood by the plug.
//!
//! Every request is a JSON tree of the shape `module → method → parameters`.
//! Parameterless requests live in a process-wide immutable table
//! ([`catalog::lookup`]); the rest are produced by builders that validate
//! their arguments and serialize them through `serde_json`.

pub mod catalog;
pub mod command;
pub mod error;

pub use catalog::{
    lookup, scan_info, set_dev_alias, set_led_off, set_relay_state, ScanOptions,
    DEFAULT_SCAN_TIMEOUT_SECS, STATIC_COMMANDS,
};
pub use command::{Command, CommandId};
pub use error::{CommandError, Result};
