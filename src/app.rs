// Application entry point
// Order is fixed: toolkit → storage → login window → event loop.

use crate::config::AppConfig;
use crate::db::{SqliteStorage, Storage};
use crate::error::Result;
use crate::login::LoginView;
use crate::ui::{TerminalApplication, Toolkit, Window};
use std::fmt;
use tracing::info;

/// Lifecycle of a single `run` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Initializing,
    Running,
    Terminated(i32),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::NotStarted => f.write_str("not-started"),
            Phase::Initializing => f.write_str("initializing"),
            Phase::Running => f.write_str("running"),
            Phase::Terminated(code) => write!(f, "terminated({})", code),
        }
    }
}

/// Boot the application with the given collaborators and return the exit code.
///
/// 1. `open_toolkit` creates the UI application object
/// 2. `storage.ensure_ready()` runs exactly once
/// 3. `open_login` builds the first window, which is then shown
/// 4. the toolkit's event loop runs until the window asks to exit
///
/// Any error aborts immediately. The window is never built if storage fails.
pub fn run<T, S, W>(
    open_toolkit: impl FnOnce() -> Result<T>,
    storage: &S,
    open_login: impl FnOnce() -> W,
) -> Result<i32>
where
    T: Toolkit,
    S: Storage + ?Sized,
    W: Window,
{
    let mut phase = Phase::NotStarted;
    info!(%phase, "Starting application");

    let mut toolkit = open_toolkit()?;

    phase = Phase::Initializing;
    info!(%phase, "Preparing storage");
    storage.ensure_ready()?;

    let mut window = open_login();
    window.show();

    phase = Phase::Running;
    info!(%phase, window = window.title(), "Window shown");
    let code = toolkit.exec(&mut window)?;

    phase = Phase::Terminated(code);
    info!(%phase, "Application finished");

    Ok(code)
}

/// Run the application with the terminal toolkit, SQLite storage and login view.
pub fn main(config: &AppConfig) -> Result<i32> {
    let storage = SqliteStorage::from_config(config)?;

    run(
        || TerminalApplication::new(std::env::args().collect(), config),
        &storage,
        || LoginView::new(config),
    )
}
