// 📝 Logging - tracing subscriber set-up for the binary

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go
#[derive(Debug, Clone, Copy)]
pub enum LogOutput<'a> {
    /// Line-oriented modes (list, import, export)
    Stderr,
    /// Appended to a file while the terminal UI owns the screen
    File(&'a Path),
}

pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "tuition_book=debug"
    } else {
        "tuition_book=info"
    }
}

/// Install the global subscriber. RUST_LOG overrides the default filter.
pub fn init_logger(verbose: bool, output: LogOutput<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    match output {
        LogOutput::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init()
            .context("Failed to install logger")?,
        LogOutput::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false)
                        .compact(),
                )
                .try_init()
                .context("Failed to install logger")?
        }
    }

    Ok(())
}
