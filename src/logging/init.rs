use color_eyre::eyre::Result;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::{self, format::FmtSpan, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use super::{LogConfig, LOG_FILENAME};

/// An output layer, boxed so plain and JSON layers share one type.
pub(super) type OutputLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// `RUST_LOG` if set, otherwise `level` for this crate only.
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("one_list={level}")))
}

/// One filtered output. Span close events are included so request spans
/// report their duration.
pub(super) fn output_layer<W>(writer: W, json: bool, ansi: bool, level: Level) -> OutputLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true);
    if json {
        layer
            .json()
            .with_current_span(true)
            .with_filter(env_filter(level))
            .boxed()
    } else {
        layer
            .with_ansi(ansi)
            .with_filter(env_filter(level))
            .boxed()
    }
}

/// Install the global subscriber: a rolling file under `log_dir` plus
/// stdout, both in the configured format.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init_logging(config: LogConfig) -> Result<()> {
    let LogConfig {
        log_dir,
        log_level,
        json_format,
        rotation,
    } = config;

    std::fs::create_dir_all(&log_dir)?;
    let file = RollingFileAppender::new(rotation, &log_dir, LOG_FILENAME);

    let outputs = vec![
        output_layer(file, json_format, false, log_level),
        output_layer(std::io::stdout, json_format, true, log_level),
    ];
    tracing_subscriber::registry()
        .with(outputs)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

/// `hourly` or `never`; anything else rotates daily.
#[must_use]
pub fn parse_rotation(s: &str) -> Rotation {
    match s.to_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}
