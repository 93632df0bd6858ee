use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Create the log directory if it doesn't exist.
fn prepare_log_dir(log_dir: &str) -> Result<Utf8PathBuf> {
    let log_path = Utf8PathBuf::from(log_dir);
    if !log_path.exists() {
        fs::create_dir_all(&log_path)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(log_path)
}

/// Setup logging with an optional rotating file and optional console output.
///
/// Standard output carries the progress notices, so console logging always
/// goes to stderr.
///
/// # Arguments
/// * `log_dir` - Directory for daily rotated log files; `None` disables file logging
/// * `log_prefix` - Prefix for log files (e.g., "colornorm")
/// * `debug_mode` - If true, use debug level; otherwise use info level
/// * `console_output` - If true, also log to stderr
///
/// # Returns
/// A guard that must be held for the duration of the program to keep file
/// logging active, or `None` when file logging is disabled
pub fn setup_logging(
    log_dir: Option<&str>,
    log_prefix: &str,
    debug_mode: bool,
    console_output: bool,
) -> Result<Option<WorkerGuard>> {
    let env_filter = if debug_mode {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let log_path = prepare_log_dir(dir)?;
            let file_appender = rolling::daily(&log_path, log_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false) // No ANSI codes in log files
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true);

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = console_output.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        "Logging initialized: dir={}, prefix={}, debug={}, console={}",
        log_dir.unwrap_or("<none>"),
        log_prefix,
        debug_mode,
        console_output
    );

    Ok(guard)
}
