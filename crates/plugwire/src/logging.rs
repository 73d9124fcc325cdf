use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Crates whose events follow `--log-level`. Everything else stays at WARN.
const PLUGWIRE_TARGETS: &[&str] = &[
    "plugwire",
    "plugwire_transport",
    "plugwire_frame",
    "plugwire_command",
    "plugwire_session",
    "plugwire_device",
];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Scope `level` to the plugwire crates; tokio and friends only surface warnings.
pub fn target_filter(level: LogLevel) -> Targets {
    let quiet = LevelFilter::WARN.min(level.as_filter());
    PLUGWIRE_TARGETS
        .iter()
        .fold(Targets::new().with_default(quiet), |targets, crate_name| {
            targets.with_target(*crate_name, level.as_filter())
        })
}

/// Install the stderr subscriber. Library crates only emit events.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);
    let registry = tracing_subscriber::registry().with(target_filter(level));

    match format {
        LogFormat::Text => {
            let _ = registry.with(fmt).try_init();
        }
        LogFormat::Json => {
            let _ = registry.with(fmt.json()).try_init();
        }
    }
}
