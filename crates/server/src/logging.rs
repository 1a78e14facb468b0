//! Tracing setup: human-readable stdout plus a size-rotated, compressed
//! JSON log file.

use anyhow::Context;
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use pdfchat_core::config::LoggingConfig;

/// Name of the active log file inside the log directory. Rotated files get a
/// numeric suffix and are gzipped: `app.log.1.gz`, `app.log.2.gz`, ...
pub const LOG_FILE_NAME: &str = "app.log";

/// Our own crates log at debug level to the file, everything else at info.
const FILE_FILTER: &str =
    "info,pdfchat_core=debug,pdfchat_ingest=debug,pdfchat_llm=debug,pdfchat_server=debug";

/// Open the rotating log file described by `config`. Every rotated file is
/// compressed immediately; at most `max_files` of them are kept.
pub fn rotating_file(config: &LoggingConfig) -> anyhow::Result<FileRotate<AppendCount>> {
    std::fs::create_dir_all(&config.dir)
        .with_context(|| format!("creating log directory {}", config.dir.display()))?;

    Ok(FileRotate::new(
        config.dir.join(LOG_FILE_NAME),
        AppendCount::new(config.max_files.max(1)),
        ContentLimit::Bytes(config.max_file_bytes.max(1) as usize),
        Compression::OnRotate(0),
        #[cfg(unix)]
        None,
    ))
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process; dropping it flushes and stops the file writer.
pub fn init(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    let (file_writer, guard) = tracing_appender::non_blocking(rotating_file(config)?);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(file_writer)
        .with_filter(EnvFilter::new(FILE_FILTER));

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(guard)
}
