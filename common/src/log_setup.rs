use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where log records go besides the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput<'a> {
    ConsoleOnly,
    /// Daily-rotated `<prefix>.<date>.log` files inside the given directory.
    RollingFile { dir: &'a Path, prefix: &'a str },
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides `base_level` when set. Warnings and errors go to
/// stderr, everything else to stdout.
pub fn setup_logging(base_level: &str, output: LogOutput<'_>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(base_level))
        .with_context(|| format!("invalid log filter '{base_level}'"))?;

    let console_writer = std::io::stdout.and(std::io::stderr.with_min_level(Level::WARN));
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_writer(console_writer);

    let file_layer = match output {
        LogOutput::ConsoleOnly => None,
        LogOutput::RollingFile { dir, prefix } => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::Builder::new()
                .rotation(tracing_appender::rolling::Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .max_log_files(5)
                .build(dir)
                .context("failed to create log file appender")?;

            let (file_writer, guard) = tracing_appender::non_blocking(appender);
            if LOG_GUARD.set(guard).is_err() {
                anyhow::bail!("logging already initialized");
            }

            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(file_writer),
            )
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("logger initialization failed")
}
