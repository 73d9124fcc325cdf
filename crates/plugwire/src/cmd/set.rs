use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cmd::{RenameArgs, SwitchArgs};
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_output, OutputFormat};

#[derive(Serialize)]
struct SetOutput<'a> {
    operation: &'static str,
    host: &'a str,
    value: serde_json::Value,
    ok: bool,
}

pub async fn power(args: SwitchArgs, format: OutputFormat, cancel: CancellationToken) -> CliResult<i32> {
    let plug = args.conn.plug(cancel);
    let ok = plug
        .set_power_state(args.state.is_on())
        .await
        .map_err(|err| device_error("power failed", err))?;
    report("power", &args.conn.host, args.state.is_on().into(), ok, format)
}

pub async fn led(args: SwitchArgs, format: OutputFormat, cancel: CancellationToken) -> CliResult<i32> {
    let plug = args.conn.plug(cancel);
    let ok = plug
        .set_led_state(args.state.is_on())
        .await
        .map_err(|err| device_error("led failed", err))?;
    report("led", &args.conn.host, args.state.is_on().into(), ok, format)
}

pub async fn rename(args: RenameArgs, format: OutputFormat, cancel: CancellationToken) -> CliResult<i32> {
    let plug = args.conn.plug(cancel);
    let ok = plug
        .set_name(&args.alias)
        .await
        .map_err(|err| device_error("rename failed", err))?;
    report("rename", &args.conn.host, args.alias.into(), ok, format)
}

fn report(
    operation: &'static str,
    host: &str,
    value: serde_json::Value,
    ok: bool,
    format: OutputFormat,
) -> CliResult<i32> {
    let out = SetOutput {
        operation,
        host,
        value,
        ok,
    };
    print_output(&out, format);
    Ok(SUCCESS)
}
