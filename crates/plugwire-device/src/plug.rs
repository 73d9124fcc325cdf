use std::net::IpAddr;
use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use plugwire_command::{
    lookup, scan_info, set_dev_alias, set_led_off, set_relay_state, Command, CommandId,
    ScanOptions,
};
use plugwire_session::{Response, Session};

use crate::config::PlugConfig;
use crate::error::{DeviceError, Result};
use crate::snapshot::DeviceSnapshot;

const SYSINFO: (&str, &str) = ("system", "get_sysinfo");
const CLOUD: (&str, &str) = ("cnCloud", "get_info");
const SCHEDULE_NEXT: (&str, &str) = ("schedule", "get_next_action");
const CONSUMPTION: (&str, &str) = ("emeter", "get_realtime");

/// The four sub-trees returned by the combined info request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceInfo {
    pub sys_info: Value,
    pub cloud_info: Value,
    pub consumption: Value,
    pub schedule_next_action: Value,
}

/// Typed operations against one plug.
///
/// Every call opens its own session; nothing is pipelined or cached in
/// place of a round trip.
#[derive(Debug)]
pub struct Plug {
    config: PlugConfig,
    cancel: Option<CancellationToken>,
    snapshot: RwLock<DeviceSnapshot>,
}

impl Plug {
    pub fn new(config: PlugConfig) -> Self {
        Self {
            config,
            cancel: None,
            snapshot: RwLock::new(DeviceSnapshot::default()),
        }
    }

    /// Plug at `host` on the default port with default session settings.
    pub fn at(host: impl Into<String>) -> Self {
        Self::new(PlugConfig::new(host))
    }

    /// Abort in-flight and future exchanges when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &PlugConfig {
        &self.config
    }

    /// Copy of the last-seen device fields.
    pub fn snapshot(&self) -> DeviceSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run `command` and return the whole response once the top-level
    /// `err_code` has been checked.
    pub async fn send_command(&self, command: &Command) -> Result<Response> {
        let mut session = Session::new(
            self.config.host.as_str(),
            self.config.port,
            self.config.session.clone(),
        );
        if let Some(token) = &self.cancel {
            session = session.with_cancellation(token.clone());
        }

        let response = session.exchange(command).await?;
        check_code(response.err_code(), "err_code", &response)?;
        debug!(
            host = %self.config.host,
            command = %command.id(),
            "exchange completed"
        );
        Ok(response)
    }

    pub async fn get_sys_info(&self) -> Result<Value> {
        let info = self.fetch(CommandId::SysInfo, SYSINFO).await?;
        self.update(|s| s.sys_info = Some(info.clone()));
        Ok(info)
    }

    /// Combined system, cloud, consumption and schedule query in one exchange.
    ///
    /// A module the device does not implement comes back as its error object
    /// instead of failing the whole call.
    pub async fn get_info(&self) -> Result<DeviceInfo> {
        let response = self.send_command(lookup(CommandId::Info)?).await?;
        let info = DeviceInfo {
            sys_info: module_result(&response, SYSINFO)?,
            cloud_info: module_result(&response, CLOUD)?,
            consumption: module_result(&response, CONSUMPTION)?,
            schedule_next_action: module_result(&response, SCHEDULE_NEXT)?,
        };
        self.update(|s| {
            s.sys_info = Some(info.sys_info.clone());
            s.cloud_info = Some(info.cloud_info.clone());
            s.consumption = Some(info.consumption.clone());
            s.schedule_next_action = Some(info.schedule_next_action.clone());
        });
        Ok(info)
    }

    pub async fn get_cloud_info(&self) -> Result<Value> {
        let info = self.fetch(CommandId::CloudInfo, CLOUD).await?;
        self.update(|s| s.cloud_info = Some(info.clone()));
        Ok(info)
    }

    pub async fn get_schedule_next_action(&self) -> Result<Value> {
        let next = self
            .fetch(CommandId::ScheduleNextAction, SCHEDULE_NEXT)
            .await?;
        self.update(|s| s.schedule_next_action = Some(next.clone()));
        Ok(next)
    }

    pub async fn get_schedule_rules(&self) -> Result<Value> {
        self.fetch(CommandId::ScheduleRules, ("schedule", "get_rules"))
            .await
    }

    pub async fn get_away_rules(&self) -> Result<Value> {
        self.fetch(CommandId::AwayRules, ("anti_theft", "get_rules"))
            .await
    }

    pub async fn get_timer_rules(&self) -> Result<Value> {
        self.fetch(CommandId::TimerRules, ("count_down", "get_rules"))
            .await
    }

    pub async fn get_time(&self) -> Result<Value> {
        self.fetch(CommandId::Time, ("time", "get_time")).await
    }

    pub async fn get_time_zone(&self) -> Result<Value> {
        self.fetch(CommandId::TimeZone, ("time", "get_timezone"))
            .await
    }

    /// Wi-Fi networks visible to the plug.
    pub async fn get_scan_info(&self, options: ScanOptions) -> Result<Value> {
        let command = scan_info(options)?;
        let response = self.send_command(&command).await?;
        method_result(&response, ("netif", "get_scaninfo"))
    }

    pub async fn get_consumption(&self) -> Result<Value> {
        let realtime = self.fetch(CommandId::Consumption, CONSUMPTION).await?;
        self.update(|s| s.consumption = Some(realtime.clone()));
        Ok(realtime)
    }

    pub async fn get_model(&self) -> Result<String> {
        let info = self.get_sys_info().await?;
        info.get("model")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| malformed_field("model", &info))
    }

    /// True when the relay is closed.
    pub async fn get_power_state(&self) -> Result<bool> {
        let info = self.get_sys_info().await?;
        info.get("relay_state")
            .and_then(Value::as_i64)
            .map(|state| state == 1)
            .ok_or_else(|| malformed_field("relay_state", &info))
    }

    /// True when the status LED is lit (`led_off == 0`).
    pub async fn get_led_state(&self) -> Result<bool> {
        let info = self.get_sys_info().await?;
        info.get("led_off")
            .and_then(Value::as_i64)
            .map(|off| off == 0)
            .ok_or_else(|| malformed_field("led_off", &info))
    }

    pub async fn set_power_state(&self, on: bool) -> Result<bool> {
        self.apply(&set_relay_state(on), ("system", "set_relay_state"))
            .await
    }

    pub async fn set_led_state(&self, on: bool) -> Result<bool> {
        self.apply(&set_led_off(on), ("system", "set_led_off"))
            .await
    }

    pub async fn set_name(&self, alias: &str) -> Result<bool> {
        self.apply(&set_dev_alias(alias), ("system", "set_dev_alias"))
            .await
    }

    /// The caller's own address on the local network.
    pub async fn local_address() -> Result<IpAddr> {
        Ok(plugwire_transport::local_address().await?)
    }

    async fn fetch(&self, id: CommandId, target: (&str, &str)) -> Result<Value> {
        let response = self.send_command(lookup(id)?).await?;
        method_result(&response, target)
    }

    /// Setters succeed only on an explicit method-level sub-tree whose
    /// `err_code` is absent or zero.
    async fn apply(&self, command: &Command, target: (&str, &str)) -> Result<bool> {
        let response = self.send_command(command).await?;
        method_result(&response, target)?;
        Ok(true)
    }

    fn update(&self, apply: impl FnOnce(&mut DeviceSnapshot)) {
        let mut snapshot = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        apply(&mut snapshot);
    }
}

/// `module.method` sub-tree, with status checks at both levels.
fn method_result(response: &Response, (module, method): (&str, &str)) -> Result<Value> {
    let Some(tree) = response.module(module) else {
        return Err(malformed(module.to_owned(), response));
    };
    check_code(tree.get("err_code"), &format!("{module}.err_code"), response)?;

    let path = format!("{module}.{method}");
    let Some(result) = tree.get(method) else {
        return Err(malformed(path, response));
    };
    if !result.is_object() {
        return Err(malformed(path, response));
    }
    check_code(result.get("err_code"), &format!("{path}.err_code"), response)?;
    Ok(result.clone())
}

/// Sub-tree for one part of the combined info reply, returned verbatim.
///
/// A nonzero `err_code` on the method, or on a module that answers without
/// the method (typically "module not support"), is kept in the returned
/// value rather than failing the other parts. Only a missing sub-tree is
/// malformed.
fn module_result(response: &Response, (module, method): (&str, &str)) -> Result<Value> {
    let Some(tree) = response.module(module) else {
        return Err(malformed(module.to_owned(), response));
    };
    match tree.get(method) {
        Some(result) if result.is_object() => Ok(result.clone()),
        None if has_error(tree) => Ok(tree.clone()),
        _ => Err(malformed(format!("{module}.{method}"), response)),
    }
}

fn has_error(node: &Value) -> bool {
    node.get("err_code")
        .and_then(Value::as_i64)
        .is_some_and(|code| code != 0)
}

/// `err_code` absent or zero is success; nonzero is a protocol error;
/// anything but an integer is malformed.
fn check_code(code: Option<&Value>, path: &str, response: &Response) -> Result<()> {
    let Some(code) = code else {
        return Ok(());
    };
    match code.as_i64() {
        Some(0) => Ok(()),
        Some(code) => {
            warn!(path, code, "device reported an error");
            Err(DeviceError::Protocol {
                code,
                response: response.clone().into_value(),
            })
        }
        None => Err(malformed(path.to_owned(), response)),
    }
}

fn malformed(path: String, response: &Response) -> DeviceError {
    warn!(path = %path, "response is missing an expected field");
    DeviceError::MalformedResponse {
        path,
        response: response.clone().into_value(),
    }
}

fn malformed_field(field: &str, sys_info: &Value) -> DeviceError {
    DeviceError::MalformedResponse {
        path: format!("system.get_sysinfo.{field}"),
        response: sys_info.clone(),
    }
}
