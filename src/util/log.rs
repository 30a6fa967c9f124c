use crate::util::config::LoggingConfig;
use crate::util::logging::standards::events;
use std::io;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::fmt::format::Format;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter::EnvFilter, Layer, Registry};

/// Install the global subscriber: stderr always, plus a daily file when enabled.
///
/// `RUST_LOG` takes precedence over the configured level. The returned guard
/// must be held for as long as file output is wanted.
pub fn log_init_with_config(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let level_filter = parse_level(&config.level);
    let filter_expression = std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| level_filter_to_str(level_filter).to_string());

    let make_filter = || {
        EnvFilter::try_new(filter_expression.as_str())
            .unwrap_or_else(|_| EnvFilter::new(level_filter_to_str(level_filter)))
    };

    let (file_writer, guard) = if config.file.enabled {
        std::fs::create_dir_all(&config.file.directory)?;
        let file_appender = daily(&config.file.directory, format!("{}.log", config.file.prefix));
        let (no_blocking, guard) = tracing_appender::non_blocking(file_appender);
        (Some(no_blocking), Some(guard))
    } else {
        (None, None)
    };

    if config.structured {
        let stderr_layer = layer()
            .json()
            .with_target(false)
            .with_writer(io::stderr)
            .with_filter(make_filter());

        let file_layer = file_writer.map(|writer| {
            layer()
                .json()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(make_filter())
        });

        Registry::default()
            .with(stderr_layer)
            .with(file_layer)
            .try_init()?;
    } else {
        let console_format = Format::default()
            .without_time()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false);

        let stderr_layer = layer()
            .event_format(console_format)
            .with_writer(io::stderr)
            .with_filter(make_filter());

        let file_layer = file_writer.map(|writer| {
            layer()
                .event_format(Format::default().with_target(false))
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(make_filter())
        });

        Registry::default()
            .with(stderr_layer)
            .with(file_layer)
            .try_init()?;
    }

    tracing::debug!(
        event = events::LOG_INIT,
        level = %config.level,
        structured = config.structured,
        file = config.file.enabled,
        directory = %config.file.directory
    );

    Ok(guard)
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::WARN,
    }
}

fn level_filter_to_str(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::OFF => "off",
        LevelFilter::ERROR => "error",
        LevelFilter::WARN => "warn",
        LevelFilter::INFO => "info",
        LevelFilter::DEBUG => "debug",
        LevelFilter::TRACE => "trace",
    }
}
