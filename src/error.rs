// Application error type
// Every failure during startup is fatal: these propagate up to the launcher.

use std::io;
use thiserror::Error;

/// Errors raised while bootstrapping and running the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// The OS did not report a home directory (filesystem resolution failure)
    #[error("could not resolve the user's home directory")]
    HomeDirUnresolved,

    /// The directory containing the executable could not be determined
    #[error("could not resolve the install root: {0}")]
    InstallRootUnresolved(#[source] io::Error),

    /// The UI toolkit could not initialize (e.g. no terminal attached)
    #[error("UI toolkit failed to initialize: {0}")]
    Toolkit(String),

    /// Terminal or filesystem I/O failed after startup checks
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Connection descriptor does not name a supported storage engine
    #[error("unsupported connection descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
