use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::json;

use crate::command::{Command, CommandId};
use crate::error::{CommandError, Result};

/// Scan timeout used when the caller does not pick one, in seconds.
pub const DEFAULT_SCAN_TIMEOUT_SECS: i64 = 17;

/// Ids served from the static table.
pub const STATIC_COMMANDS: [CommandId; 11] = [
    CommandId::Search,
    CommandId::SysInfo,
    CommandId::Info,
    CommandId::CloudInfo,
    CommandId::ScheduleNextAction,
    CommandId::ScheduleRules,
    CommandId::AwayRules,
    CommandId::TimerRules,
    CommandId::Consumption,
    CommandId::Time,
    CommandId::TimeZone,
];

static CATALOG: LazyLock<HashMap<CommandId, Command>> = LazyLock::new(|| {
    STATIC_COMMANDS
        .iter()
        .filter_map(|&id| static_tree(id).map(|tree| (id, Command::new(id, tree))))
        .collect()
});

fn static_tree(id: CommandId) -> Option<serde_json::Value> {
    let tree = match id {
        CommandId::Search | CommandId::SysInfo => json!({"system": {"get_sysinfo": {}}}),
        CommandId::Info => json!({
            "emeter": {"get_realtime": {}},
            "schedule": {"get_next_action": {}},
            "system": {"get_sysinfo": {}},
            "cnCloud": {"get_info": {}},
        }),
        CommandId::CloudInfo => json!({"cnCloud": {"get_info": {}}}),
        CommandId::ScheduleNextAction => json!({"schedule": {"get_next_action": {}}}),
        CommandId::ScheduleRules => json!({"schedule": {"get_rules": {}}}),
        CommandId::AwayRules => json!({"anti_theft": {"get_rules": {}}}),
        CommandId::TimerRules => json!({"count_down": {"get_rules": {}}}),
        CommandId::Consumption => json!({"emeter": {"get_realtime": {}}}),
        CommandId::Time => json!({"time": {"get_time": {}}}),
        CommandId::TimeZone => json!({"time": {"get_timezone": {}}}),
        CommandId::ScanInfo
        | CommandId::SetPowerState
        | CommandId::SetLedState
        | CommandId::SetName => return None,
    };
    Some(tree)
}

/// Shared, immutable request for a parameterless id.
pub fn lookup(id: CommandId) -> Result<&'static Command> {
    CATALOG
        .get(&id)
        .ok_or(CommandError::RequiresParameters(id.as_str()))
}

/// Arguments of the Wi-Fi scan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Ask the device to rescan instead of returning its cached list.
    pub refresh: bool,
    /// Scan duration the device may take, in seconds. Must be positive.
    pub timeout_secs: i64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            refresh: false,
            timeout_secs: DEFAULT_SCAN_TIMEOUT_SECS,
        }
    }
}

impl ScanOptions {
    pub fn new(refresh: bool, timeout_secs: i64) -> Self {
        Self {
            refresh,
            timeout_secs,
        }
    }
}

/// `netif.get_scaninfo` request.
pub fn scan_info(options: ScanOptions) -> Result<Command> {
    if options.timeout_secs <= 0 {
        return Err(CommandError::InvalidParameter {
            name: "timeout",
            reason: format!("must be a positive number of seconds, got {}", options.timeout_secs),
        });
    }
    Ok(Command::new(
        CommandId::ScanInfo,
        json!({"netif": {"get_scaninfo": {
            "refresh": u8::from(options.refresh),
            "timeout": options.timeout_secs,
        }}}),
    ))
}

/// `system.set_relay_state` request.
pub fn set_relay_state(on: bool) -> Command {
    Command::new(
        CommandId::SetPowerState,
        json!({"system": {"set_relay_state": {"state": u8::from(on)}}}),
    )
}

/// `system.set_led_off` request.
///
/// The device field is inverted: lighting the LED sends `off: 0`.
pub fn set_led_off(led_on: bool) -> Command {
    Command::new(
        CommandId::SetLedState,
        json!({"system": {"set_led_off": {"off": u8::from(!led_on)}}}),
    )
}

/// `system.set_dev_alias` request.
pub fn set_dev_alias(alias: &str) -> Command {
    Command::new(
        CommandId::SetName,
        json!({"system": {"set_dev_alias": {"alias": alias}}}),
    )
}
