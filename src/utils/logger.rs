use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Shape of the log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One short line per event, for people at a terminal.
    #[default]
    Compact,
    /// JSON lines, for log shippers next to the lead webhook.
    Json,
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(format: LogFormat, verbose: bool) -> &'static str {
    match (format, verbose) {
        (_, true) => "crocodile_savings=debug,info",
        (LogFormat::Json, false) => "crocodile_savings=info",
        (LogFormat::Compact, false) => "crocodile_savings=warn",
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `verbose`.
pub fn init(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(format, verbose)));

    let base = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Json => base.json().boxed(),
    };

    tracing_subscriber::registry().with(layer).with(filter).init();
}
