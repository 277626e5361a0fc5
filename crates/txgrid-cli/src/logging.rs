// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! File logging. The terminal belongs to the grid while it runs, so every
//! event goes to a daily-rolling file under the configured log directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_PREFIX: &str = "txgrid.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    /// Used when `RUST_LOG` is unset or unparseable.
    pub default_filter: String,
}

/// Builds the filter, letting `RUST_LOG` take precedence.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// or buffered lines are lost.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
    fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("create log directory {}", config.log_dir.display()))?;

    let (writer, guard) = file_writer(&config.log_dir);
    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(env_filter(&config.default_filter));

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("install tracing subscriber")?;

    tracing::info!(log_dir = %config.log_dir.display(), "logging initialized");
    Ok(guard)
}

fn file_writer(log_dir: &Path) -> (tracing_appender::non_blocking::NonBlocking, WorkerGuard) {
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    tracing_appender::non_blocking(appender)
}

#[cfg(test)]
mod tests {
    use super::{LOG_FILE_PREFIX, file_writer};
    use anyhow::Result;
    use std::io::Write;

    #[test]
    fn file_writer_lands_in_log_dir() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let (mut writer, guard) = file_writer(temp.path());
        writer.write_all(b"hello\n")?;
        drop(guard);

        let names = std::fs::read_dir(temp.path())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        assert!(
            names.iter().any(|name| name.starts_with(LOG_FILE_PREFIX)),
            "files: {names:?}"
        );
        Ok(())
    }
}
