use std::time::Duration;

use plugwire_session::SessionConfig;
use plugwire_transport::DEFAULT_PORT;

/// Where a plug lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlugConfig {
    /// Host name or IP address of the plug.
    pub host: String,
    /// TCP port. Default: 9999.
    pub port: u16,
    /// Settings applied to every session the plug opens.
    pub session: SessionConfig,
    /// Device id, when known from discovery.
    pub device_id: Option<String>,
    /// Discovery timestamp in milliseconds since the Unix epoch.
    pub seen_on_discovery: Option<u64>,
}

impl Default for PlugConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            session: SessionConfig::default(),
            device_id: None,
            seen_on_discovery: None,
        }
    }
}

impl PlugConfig {
    /// Config for `host` on the default port.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    /// Shorthand for setting the session idle window.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.session.idle_timeout = idle_timeout;
        self
    }

    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn with_seen_on_discovery(mut self, millis: u64) -> Self {
        self.seen_on_discovery = Some(millis);
        self
    }
}
