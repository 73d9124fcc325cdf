use plugwire_command::ScanOptions;
use tokio_util::sync::CancellationToken;

use crate::cmd::ScanArgs;
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_value, OutputFormat};

pub async fn run(args: ScanArgs, format: OutputFormat, cancel: CancellationToken) -> CliResult<i32> {
    let plug = args.conn.plug(cancel);
    let options = ScanOptions::new(args.refresh, args.scan_timeout);
    let networks = plug
        .get_scan_info(options)
        .await
        .map_err(|err| device_error("scan failed", err))?;
    print_value(&networks, format);
    Ok(SUCCESS)
}
