use std::time::Duration;

use plugwire_frame::{FrameConfig, PlugCodec, DEFAULT_MAX_PAYLOAD, REQUEST_KEY, RESPONSE_KEY};

/// Per-session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Longest silence tolerated while connecting, sending or awaiting the
    /// response. `Duration::ZERO` disables the idle window.
    pub idle_timeout: Duration,
    /// Initial cipher key for the request body.
    pub request_key: u8,
    /// Initial cipher key for the response body.
    pub response_key: u8,
    /// Largest response body accepted, in bytes.
    pub max_payload_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::ZERO,
            request_key: REQUEST_KEY,
            response_key: RESPONSE_KEY,
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

impl SessionConfig {
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_keys(mut self, request_key: u8, response_key: u8) -> Self {
        self.request_key = request_key;
        self.response_key = response_key;
        self
    }

    /// Idle window, or `None` when disabled.
    pub fn idle_window(&self) -> Option<Duration> {
        (!self.idle_timeout.is_zero()).then_some(self.idle_timeout)
    }

    pub(crate) fn codec(&self) -> PlugCodec {
        PlugCodec::new(self.request_key, self.response_key).with_config(FrameConfig {
            max_payload_size: self.max_payload_size,
        })
    }
}
