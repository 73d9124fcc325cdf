use plugwire_command::lookup;
use plugwire_device::DeviceError;
use tokio_util::sync::CancellationToken;

use crate::cmd::SendArgs;
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_output, OutputFormat};

pub async fn run(args: SendArgs, format: OutputFormat, cancel: CancellationToken) -> CliResult<i32> {
    let command = lookup(args.command)
        .map_err(|err| device_error("send failed", DeviceError::from(err)))?;
    tracing::debug!(request = %command, "sending catalog command");

    let plug = args.conn.plug(cancel);
    let response = plug
        .send_command(command)
        .await
        .map_err(|err| device_error("send failed", err))?;
    print_output(&response, format);
    Ok(SUCCESS)
}
