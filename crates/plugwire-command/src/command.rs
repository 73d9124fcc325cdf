use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CommandError;

/// Identifier of every request the catalog can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandId {
    Search,
    #[serde(rename = "sysinfo", alias = "sys_info")]
    SysInfo,
    Info,
    CloudInfo,
    ScheduleNextAction,
    ScheduleRules,
    AwayRules,
    TimerRules,
    Consumption,
    Time,
    #[serde(rename = "timezone", alias = "time_zone")]
    TimeZone,
    ScanInfo,
    SetPowerState,
    SetLedState,
    SetName,
}

impl CommandId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::SysInfo => "sysinfo",
            Self::Info => "info",
            Self::CloudInfo => "cloud_info",
            Self::ScheduleNextAction => "schedule_next_action",
            Self::ScheduleRules => "schedule_rules",
            Self::AwayRules => "away_rules",
            Self::TimerRules => "timer_rules",
            Self::Consumption => "consumption",
            Self::Time => "time",
            Self::TimeZone => "timezone",
            Self::ScanInfo => "scan_info",
            Self::SetPowerState => "set_power_state",
            Self::SetLedState => "set_led_state",
            Self::SetName => "set_name",
        }
    }

    /// True for ids whose request tree takes no arguments.
    pub const fn is_static(&self) -> bool {
        !matches!(
            self,
            Self::ScanInfo | Self::SetPowerState | Self::SetLedState | Self::SetName
        )
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandId {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(Self::Search),
            "sysinfo" | "sys_info" => Ok(Self::SysInfo),
            "info" => Ok(Self::Info),
            "cloud_info" => Ok(Self::CloudInfo),
            "schedule_next_action" => Ok(Self::ScheduleNextAction),
            "schedule_rules" => Ok(Self::ScheduleRules),
            "away_rules" => Ok(Self::AwayRules),
            "timer_rules" => Ok(Self::TimerRules),
            "consumption" => Ok(Self::Consumption),
            "time" => Ok(Self::Time),
            "timezone" | "time_zone" => Ok(Self::TimeZone),
            "scan_info" => Ok(Self::ScanInfo),
            "set_power_state" => Ok(Self::SetPowerState),
            "set_led_state" => Ok(Self::SetLedState),
            "set_name" => Ok(Self::SetName),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// One remote-procedure request: `module → method → parameters`.
///
/// Immutable once built. The tree is always a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    id: CommandId,
    tree: Value,
}

impl Command {
    /// Wrap a request tree. Callers inside the crate guarantee `tree` is an object.
    pub(crate) fn new(id: CommandId, tree: Value) -> Self {
        debug_assert!(tree.is_object(), "command tree must be a JSON object");
        Self { id, tree }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    /// The full request tree.
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// The `(module, method)` pairs this request targets.
    pub fn targets(&self) -> Vec<(&str, &str)> {
        let Some(modules) = self.tree.as_object() else {
            return Vec::new();
        };
        modules
            .iter()
            .flat_map(|(module, methods)| {
                methods
                    .as_object()
                    .into_iter()
                    .flat_map(move |m| m.keys().map(move |method| (module.as_str(), method.as_str())))
            })
            .collect()
    }

    /// Parameters object sent to `module.method`, if targeted.
    pub fn params(&self, module: &str, method: &str) -> Option<&Value> {
        self.tree.get(module)?.get(method)
    }

    /// Serialized JSON request body.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.tree.to_string().into_bytes()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn id_string_roundtrip() {
        for id in [
            CommandId::Search,
            CommandId::SysInfo,
            CommandId::Info,
            CommandId::ScheduleNextAction,
            CommandId::TimeZone,
            CommandId::SetName,
        ] {
            assert_eq!(id.as_str().parse::<CommandId>().unwrap(), id);
        }
        assert_eq!("sys_info".parse::<CommandId>().unwrap(), CommandId::SysInfo);
        assert_eq!("time_zone".parse::<CommandId>().unwrap(), CommandId::TimeZone);
        assert!(matches!(
            "reboot".parse::<CommandId>(),
            Err(CommandError::UnknownCommand(s)) if s == "reboot"
        ));
    }

    #[test]
    fn serde_uses_snake_case() {
        let text = serde_json::to_string(&CommandId::ScheduleNextAction).unwrap();
        assert_eq!(text, "\"schedule_next_action\"");
    }

    #[test]
    fn sysinfo_and_timezone_print_without_underscore() {
        assert_eq!(CommandId::SysInfo.to_string(), "sysinfo");
        assert_eq!(CommandId::TimeZone.to_string(), "timezone");
        assert_eq!(serde_json::to_string(&CommandId::SysInfo).unwrap(), "\"sysinfo\"");
        assert_eq!(serde_json::to_string(&CommandId::TimeZone).unwrap(), "\"timezone\"");
        let parsed: CommandId = serde_json::from_str("\"sys_info\"").unwrap();
        assert_eq!(parsed, CommandId::SysInfo);
    }

    #[test]
    fn targets_lists_every_module_method_pair() {
        let cmd = Command::new(
            CommandId::Info,
            json!({"emeter": {"get_realtime": {}}, "system": {"get_sysinfo": {}}}),
        );
        let mut targets = cmd.targets();
        targets.sort_unstable();
        assert_eq!(
            targets,
            vec![("emeter", "get_realtime"), ("system", "get_sysinfo")]
        );
    }

    #[test]
    fn to_bytes_is_compact_json() {
        let cmd = Command::new(CommandId::SysInfo, json!({"system": {"get_sysinfo": {}}}));
        assert_eq!(cmd.to_bytes(), br#"{"system":{"get_sysinfo":{}}}"#.to_vec());
        assert_eq!(cmd.to_string(), r#"{"system":{"get_sysinfo":{}}}"#);
    }
}
