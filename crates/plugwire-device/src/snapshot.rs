use serde::Serialize;
use serde_json::Value;

/// Last values seen from the device.
///
/// Each field is refreshed by the getter that fetches it; `get_info`
/// refreshes all four at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    pub sys_info: Option<Value>,
    pub cloud_info: Option<Value>,
    pub consumption: Option<Value>,
    pub schedule_next_action: Option<Value>,
}

impl DeviceSnapshot {
    /// True until the first successful refresh of any field.
    pub fn is_empty(&self) -> bool {
        self.sys_info.is_none()
            && self.cloud_info.is_none()
            && self.consumption.is_none()
            && self.schedule_next_action.is_none()
    }
}
