use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};
use plugwire_command::{CommandId, DEFAULT_SCAN_TIMEOUT_SECS};
use plugwire_device::{Plug, PlugConfig};
use plugwire_transport::DEFAULT_PORT;
use tokio_util::sync::CancellationToken;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod get;
pub mod info;
pub mod local_ip;
pub mod scan;
pub mod send;
pub mod set;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query system, cloud, consumption and schedule info in one exchange.
    Info(InfoArgs),
    /// Query a single device value.
    Get(GetArgs),
    /// List Wi-Fi networks visible to the plug.
    Scan(ScanArgs),
    /// Switch the relay on or off.
    Power(SwitchArgs),
    /// Switch the status LED on or off.
    Led(SwitchArgs),
    /// Set the device alias.
    Rename(RenameArgs),
    /// Send a catalog command and print the whole response.
    Send(SendArgs),
    /// Print this host's address on the local network.
    LocalIp(LocalIpArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub async fn run(command: Command, format: OutputFormat, cancel: CancellationToken) -> CliResult<i32> {
    match command {
        Command::Info(args) => info::run(args, format, cancel).await,
        Command::Get(args) => get::run(args, format, cancel).await,
        Command::Scan(args) => scan::run(args, format, cancel).await,
        Command::Power(args) => set::power(args, format, cancel).await,
        Command::Led(args) => set::led(args, format, cancel).await,
        Command::Rename(args) => set::rename(args, format, cancel).await,
        Command::Send(args) => send::run(args, format, cancel).await,
        Command::LocalIp(args) => local_ip::run(args, format).await,
        Command::Version(args) => version::run(args),
    }
}

/// Where to reach the plug.
#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
    /// Plug host name or IP address.
    #[arg(long, env = "PLUGWIRE_HOST")]
    pub host: String,
    /// Plug TCP port.
    #[arg(long, env = "PLUGWIRE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Idle timeout per connect, write and read (e.g. 5s, 500ms; 0 disables).
    #[arg(long, env = "PLUGWIRE_TIMEOUT", default_value = "5s", value_parser = parse_duration)]
    pub timeout: Duration,
}

impl ConnectArgs {
    pub fn plug(&self, cancel: CancellationToken) -> Plug {
        let config = PlugConfig::new(self.host.clone())
            .with_port(self.port)
            .with_idle_timeout(self.timeout);
        Plug::new(config).with_cancellation(cancel)
    }
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub conn: ConnectArgs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GetTarget {
    Sysinfo,
    Cloud,
    ScheduleNext,
    ScheduleRules,
    AwayRules,
    TimerRules,
    Time,
    Timezone,
    Consumption,
    Model,
    Power,
    Led,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Value to query.
    pub target: GetTarget,
    #[command(flatten)]
    pub conn: ConnectArgs,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Ask the plug to rescan instead of returning its cached list.
    #[arg(long)]
    pub refresh: bool,
    /// Seconds the plug may spend scanning.
    #[arg(long, default_value_t = DEFAULT_SCAN_TIMEOUT_SECS, allow_negative_numbers = true)]
    pub scan_timeout: i64,
    #[command(flatten)]
    pub conn: ConnectArgs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// Desired state.
    pub state: Switch,
    #[command(flatten)]
    pub conn: ConnectArgs,
}

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// New device alias.
    pub alias: String,
    #[command(flatten)]
    pub conn: ConnectArgs,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Catalog command id (e.g. sysinfo, timezone, info).
    pub command: CommandId,
    #[command(flatten)]
    pub conn: ConnectArgs,
}

#[derive(Args, Debug)]
pub struct LocalIpArgs {
    /// How long to wait for the address (e.g. 1s, 250ms).
    #[arg(long, default_value = "1s", value_parser = parse_duration)]
    pub timeout: Duration,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse `500ms`, `5s` or bare seconds. Zero is allowed and disables the window.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("duration must not be empty".to_string());
    }

    let (number, millis) = if let Some(num) = input.strip_suffix("ms") {
        (num, true)
    } else if let Some(num) = input.strip_suffix('s') {
        (num, false)
    } else {
        (input, false)
    };

    let value: u64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration value: {input}"))?;

    Ok(if millis {
        Duration::from_millis(value)
    } else {
        Duration::from_secs(value)
    })
}
