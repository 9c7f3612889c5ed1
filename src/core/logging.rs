//! Structured logging
//!
//! One global `tracing` subscriber: `RUST_LOG` wins over the configured
//! level, events go out as text or JSON through a non-blocking writer, either
//! to stdout or to a time-rolled file that keeps `max_backups` old files.

use crate::core::config::LoggingConfig;
use anyhow::{Context, Result};
use std::io;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Keeps the background log writer alive; drop it to flush
pub struct Logger {
    _guard: WorkerGuard,
}

impl Logger {
    pub fn init(config: &LoggingConfig) -> Result<Self> {
        let level = parse_log_level(&config.level)?;
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

        let (writer, guard) = make_writer(config)?;

        // Spans close once per request, which logs its duration
        let fmt_layer = if config.format == "json" {
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(writer)
                .boxed()
        } else {
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(writer)
                .boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;

        tracing::info!(
            level = %config.level,
            format = %config.format,
            output = %config.output,
            "Logging initialized"
        );

        Ok(Logger { _guard: guard })
    }
}

fn make_writer(config: &LoggingConfig) -> Result<(NonBlocking, WorkerGuard)> {
    if config.output == "stdout" {
        return Ok(tracing_appender::non_blocking(io::stdout()));
    }

    let appender = file_appender(config)?;
    Ok(tracing_appender::non_blocking(appender))
}

fn file_appender(config: &LoggingConfig) -> Result<RollingFileAppender> {
    let log_file = config.log_file.as_deref().context("No log_file configured")?;
    let prefix = log_file
        .file_name()
        .and_then(|name| name.to_str())
        .context("log_file must end in a UTF-8 file name")?;
    let directory = match log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => std::path::Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(parse_rotation(&config.rotation)?)
        .filename_prefix(prefix)
        .max_log_files(config.max_backups)
        .build(directory)
        .with_context(|| format!("Cannot open log file in {}", directory.display()))
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {}", level),
    }
}

fn parse_rotation(rotation: &str) -> Result<Rotation> {
    match rotation {
        "hourly" => Ok(Rotation::HOURLY),
        "daily" => Ok(Rotation::DAILY),
        "never" => Ok(Rotation::NEVER),
        other => anyhow::bail!("Invalid log rotation: {}", other),
    }
}
