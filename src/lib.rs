// Kredi Kartı Takip Programı - Core Library
// Configuration, bootstrap and the terminal UI shell of the credit-card tracker.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod login;
pub mod ui;

// Re-export commonly used types
pub use app::{run, Phase};
pub use config::{AppConfig, Theme};
pub use db::{SqliteStorage, Storage};
pub use error::AppError;
pub use login::LoginView;
pub use ui::{Palette, TerminalApplication, Toolkit, Window};
