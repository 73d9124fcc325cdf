use tokio_util::sync::CancellationToken;

use crate::cmd::InfoArgs;
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_output, OutputFormat};

pub async fn run(args: InfoArgs, format: OutputFormat, cancel: CancellationToken) -> CliResult<i32> {
    let plug = args.conn.plug(cancel);
    let info = plug
        .get_info()
        .await
        .map_err(|err| device_error("info failed", err))?;
    print_output(&info, format);
    Ok(SUCCESS)
}
