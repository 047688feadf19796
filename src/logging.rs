// Structured logging
// The terminal UI owns stdout, so log lines go to `config.log_file`.

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info,kredi_kart_takip=debug";

/// Install the global tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kredi_kart_takip=trace` - Trace this crate only
/// - Default: [`DEFAULT_FILTER`]
pub fn init_tracing(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .map_err(|e| {
            AppError::Logging(format!("cannot open {}: {}", config.log_file.display(), e))
        })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
