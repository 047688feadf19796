// Configuration provider
// Immutable application settings, computed once at process start and passed by reference.

use crate::error::{AppError, Result};
use chrono::{Datelike, NaiveDate};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ============================================================================
// STATIC VALUES
// ============================================================================

pub const APP_NAME: &str = "Kredi Kartı Takip Programı";
pub const APP_VERSION: &str = "1.0.0";
pub const APP_AUTHOR: &str = "Kredi Kart Takip Projesi";

pub const ASSETS_DIR_NAME: &str = "assets";
pub const DATABASE_EXTENSION: &str = "db";
pub const LOG_EXTENSION: &str = "log";
pub const SQLITE_SCHEME: &str = "sqlite:///";

pub const WINDOW_MIN_WIDTH: u32 = 1200;
pub const WINDOW_MIN_HEIGHT: u32 = 800;
pub const START_MAXIMIZED: bool = true;

pub const DATE_FORMAT: &str = "dd.MM.yyyy";
pub const CURRENCY_FORMAT: &str = "#,##0.00";
pub const CURRENCY_SYMBOL: &str = "₺";

/// Pixel size of one terminal cell, used to translate window hints
const CELL_WIDTH_PX: u32 = 8;
const CELL_HEIGHT_PX: u32 = 16;

// ============================================================================
// THEME
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

// ============================================================================
// APP CONFIG
// ============================================================================

/// Process-wide application configuration.
///
/// All paths are derived from `install_root` and the user's home directory
/// exactly once, in [`AppConfig::from_roots`]. Nothing mutates the struct
/// afterwards; callers share it by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_version: String,
    pub app_author: String,

    /// Directory containing the launcher executable
    pub install_root: PathBuf,
    /// `install_root/assets` (existence is not checked)
    pub assets_dir: PathBuf,
    /// `home/<normalized-app-name>.db`
    pub database_file: PathBuf,
    /// `sqlite:///<database_file>`
    pub db_connection: String,
    /// `home/<normalized-app-name>.log`
    pub log_file: PathBuf,

    pub window_min_width: u32,
    pub window_min_height: u32,
    pub start_maximized: bool,
    pub default_theme: Theme,

    pub date_format: String,
    pub currency_format: String,
    pub currency_symbol: String,
}

impl AppConfig {
    /// Resolve the install root and home directory from the OS and build the config.
    ///
    /// The install root is the directory of the running executable.
    pub fn load() -> Result<Self> {
        let install_root = install_root()?;
        let home = home_dir()?;

        Ok(Self::from_roots(install_root, home))
    }

    /// Deterministic constructor: same roots in, same config out.
    pub fn from_roots(install_root: impl Into<PathBuf>, home: impl AsRef<Path>) -> Self {
        let install_root = install_root.into();
        let home = home.as_ref();

        let assets_dir = install_root.join(ASSETS_DIR_NAME);
        let database_file = home.join(database_file_name(APP_NAME));
        let db_connection = connection_descriptor(&database_file);
        let log_file = home.join(format!("{}.{}", normalize_app_name(APP_NAME), LOG_EXTENSION));

        Self {
            app_name: APP_NAME.to_string(),
            app_version: APP_VERSION.to_string(),
            app_author: APP_AUTHOR.to_string(),
            install_root,
            assets_dir,
            database_file,
            db_connection,
            log_file,
            window_min_width: WINDOW_MIN_WIDTH,
            window_min_height: WINDOW_MIN_HEIGHT,
            start_maximized: START_MAXIMIZED,
            default_theme: Theme::default(),
            date_format: DATE_FORMAT.to_string(),
            currency_format: CURRENCY_FORMAT.to_string(),
            currency_symbol: CURRENCY_SYMBOL.to_string(),
        }
    }

    /// JSON dump for logging. Falls back to `Debug` when a path is not UTF-8.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }

    /// Minimum window size expressed in terminal cells (columns, rows).
    pub fn min_terminal_size(&self) -> (u16, u16) {
        let cols = (self.window_min_width / CELL_WIDTH_PX).min(u16::MAX as u32) as u16;
        let rows = (self.window_min_height / CELL_HEIGHT_PX).min(u16::MAX as u32) as u16;
        (cols, rows)
    }

    /// Render a date using `date_format` (`dd`, `d`, `MM`, `M`, `yyyy`, `yy`).
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        let mut chars = self.date_format.chars().peekable();

        while let Some(c) = chars.next() {
            let mut run = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                run += 1;
            }

            match c {
                'd' if run == 1 => out.push_str(&date.day().to_string()),
                'd' => out.push_str(&format!("{:02}", date.day())),
                'M' if run == 1 => out.push_str(&date.month().to_string()),
                'M' => out.push_str(&format!("{:02}", date.month())),
                'y' if run <= 2 => out.push_str(&format!("{:02}", date.year().rem_euclid(100))),
                'y' => out.push_str(&format!("{:04}", date.year())),
                literal => {
                    for _ in 0..run {
                        out.push(literal);
                    }
                }
            }
        }

        out
    }

    /// Render an amount using `currency_format` followed by `currency_symbol`.
    ///
    /// Example: `1234.5` with `#,##0.00` and `₺` → `"1,234.50 ₺"`
    pub fn format_currency(&self, amount: f64) -> String {
        let (int_pattern, frac_pattern) = match self.currency_format.split_once('.') {
            Some((i, f)) => (i, f),
            None => (self.currency_format.as_str(), ""),
        };
        let decimals = frac_pattern.chars().filter(|c| *c == '0').count();
        let grouped = int_pattern.contains(',');

        let rounded = format!("{:.*}", decimals, amount.abs());
        let (whole, frac) = match rounded.split_once('.') {
            Some((w, f)) => (w.to_string(), Some(f.to_string())),
            None => (rounded.clone(), None),
        };

        let whole = if grouped { group_thousands(&whole) } else { whole };
        let negative = amount < 0.0 && rounded.chars().any(|c| c.is_ascii_digit() && c != '0');

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&whole);
        if let Some(frac) = frac {
            out.push('.');
            out.push_str(&frac);
        }
        out.push(' ');
        out.push_str(&self.currency_symbol);
        out
    }
}

// ============================================================================
// DERIVATION HELPERS
// ============================================================================

/// Spaces become underscores, then everything is lowercased.
/// Non-ASCII letters are kept (only their case changes).
pub fn normalize_app_name(name: &str) -> String {
    name.replace(' ', "_").to_lowercase()
}

/// `Kredi Kartı Takip Programı` → `kredi_kartı_takip_programı.db`
pub fn database_file_name(app_name: &str) -> String {
    format!("{}.{}", normalize_app_name(app_name), DATABASE_EXTENSION)
}

/// Connection descriptor for a file-backed SQLite store.
pub fn connection_descriptor(database_file: &Path) -> String {
    format!("{}{}", SQLITE_SCHEME, database_file.display())
}

/// Directory containing the running executable.
pub fn install_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(AppError::InstallRootUnresolved)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        AppError::InstallRootUnresolved(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("executable has no parent directory: {}", exe.display()),
        ))
    })
}

pub fn home_dir() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(AppError::HomeDirUnresolved)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
