use serde::Serialize;

use plugwire_transport::local_address_with_timeout;

use crate::cmd::LocalIpArgs;
use crate::exit::{transport_error, CliResult, SUCCESS};
use crate::output::{print_output, OutputFormat};

#[derive(Serialize)]
struct LocalIpOutput {
    address: String,
}

pub async fn run(args: LocalIpArgs, format: OutputFormat) -> CliResult<i32> {
    let address = local_address_with_timeout(args.timeout)
        .await
        .map_err(|err| transport_error("local-ip failed", err))?;
    let out = LocalIpOutput {
        address: address.to_string(),
    };
    match format {
        OutputFormat::Raw => crate::output::print_raw(format!("{}\n", out.address).as_bytes()),
        _ => print_output(&out, format),
    }
    Ok(SUCCESS)
}
