use serde_json::Value;
use tokio_util::sync::CancellationToken;

use plugwire_device::{Plug, Result};

use crate::cmd::{GetArgs, GetTarget};
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_value, OutputFormat};

pub async fn run(args: GetArgs, format: OutputFormat, cancel: CancellationToken) -> CliResult<i32> {
    let plug = args.conn.plug(cancel);
    let value = fetch(&plug, args.target)
        .await
        .map_err(|err| device_error("get failed", err))?;
    print_value(&value, format);
    Ok(SUCCESS)
}

async fn fetch(plug: &Plug, target: GetTarget) -> Result<Value> {
    match target {
        GetTarget::Sysinfo => plug.get_sys_info().await,
        GetTarget::Cloud => plug.get_cloud_info().await,
        GetTarget::ScheduleNext => plug.get_schedule_next_action().await,
        GetTarget::ScheduleRules => plug.get_schedule_rules().await,
        GetTarget::AwayRules => plug.get_away_rules().await,
        GetTarget::TimerRules => plug.get_timer_rules().await,
        GetTarget::Time => plug.get_time().await,
        GetTarget::Timezone => plug.get_time_zone().await,
        GetTarget::Consumption => plug.get_consumption().await,
        GetTarget::Model => plug.get_model().await.map(Value::String),
        GetTarget::Power => plug.get_power_state().await.map(Value::Bool),
        GetTarget::Led => plug.get_led_state().await.map(Value::Bool),
    }
}
