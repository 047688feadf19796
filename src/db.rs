use crate::config::{AppConfig, SQLITE_SCHEME};
use crate::error::{AppError, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Bookkeeping schema version stored in `app_meta`
pub const SCHEMA_VERSION: &str = "1";

/// Storage capability required by the entry point.
///
/// `ensure_ready` must leave the backing store existing and usable.
/// Repeated calls (and repeated process starts) are harmless.
pub trait Storage {
    fn ensure_ready(&self) -> Result<()>;
}

/// File-backed SQLite store identified by a `sqlite:///<path>` descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteStorage {
    path: PathBuf,
}

impl SqliteStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a connection descriptor. Only `sqlite:///` is supported.
    pub fn from_descriptor(descriptor: &str) -> Result<Self> {
        match descriptor.strip_prefix(SQLITE_SCHEME) {
            Some(path) if !path.is_empty() => Ok(Self::new(path)),
            _ => Err(AppError::InvalidDescriptor(descriptor.to_string())),
        }
    }

    /// Storage for `config.database_file`. The descriptor only selects the engine;
    /// the path is taken as-is so non-UTF-8 home directories survive.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if !config.db_connection.starts_with(SQLITE_SCHEME) {
            return Err(AppError::InvalidDescriptor(config.db_connection.clone()));
        }
        Ok(Self::new(&config.database_file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection to the database file (created if missing)
    pub fn open(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }
}

impl Storage for SqliteStorage {
    fn ensure_ready(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                debug!(dir = %parent.display(), "Created database directory");
            }
        }

        let conn = self.open()?;
        setup_database(&conn)?;

        info!(path = %self.path.display(), "Database ready");
        Ok(())
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO app_meta (key, value) VALUES (?1, ?2)",
        params!["schema_version", SCHEMA_VERSION],
    )?;

    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<Option<String>> {
    let version = conn
        .query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params!["schema_version"],
            |row| row.get(0),
        )
        .optional()?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_descriptor() {
        let storage = SqliteStorage::from_descriptor("sqlite:////home/ayse/kkt.db").unwrap();
        assert_eq!(storage.path(), Path::new("/home/ayse/kkt.db"));

        assert!(matches!(
            SqliteStorage::from_descriptor("postgres://localhost/kkt"),
            Err(AppError::InvalidDescriptor(_))
        ));
        assert!(matches!(
            SqliteStorage::from_descriptor("sqlite:///"),
            Err(AppError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn test_from_config_uses_database_file() {
        let config = AppConfig::from_roots("/opt/kkt", "/home/ayse");
        let storage = SqliteStorage::from_config(&config).unwrap();
        assert_eq!(storage.path(), config.database_file.as_path());
    }

    #[test]
    fn test_from_config_rejects_other_engines() {
        let mut config = AppConfig::from_roots("/opt/kkt", "/home/ayse");
        config.db_connection = "postgres://localhost/kkt".to_string();
        assert!(matches!(
            SqliteStorage::from_config(&config),
            Err(AppError::InvalidDescriptor(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_home_keeps_database_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join(OsStr::from_bytes(b"ay\xFFse"));
        std::fs::create_dir(&home).unwrap();

        let config = AppConfig::from_roots("/opt/kkt", &home);
        let storage = SqliteStorage::from_config(&config).unwrap();
        assert_eq!(storage.path(), config.database_file.as_path());

        storage.ensure_ready().unwrap();
        assert!(config.database_file.exists());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_ensure_ready_creates_file_in_fresh_home() {
        let home = tempfile::tempdir().unwrap();
        let config = AppConfig::from_roots("/opt/kkt", home.path());
        assert!(!config.database_file.exists());

        let storage = SqliteStorage::from_config(&config).unwrap();
        storage.ensure_ready().unwrap();

        assert!(config.database_file.exists());
        let conn = storage.open().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), Some(SCHEMA_VERSION.to_string()));
    }

    #[test]
    fn test_ensure_ready_is_idempotent() {
        let home = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::new(home.path().join("kkt.db"));

        storage.ensure_ready().unwrap();
        storage.ensure_ready().unwrap();

        let conn = storage.open().unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM app_meta", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_ensure_ready_creates_missing_parent() {
        let home = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::new(home.path().join("nested").join("dir").join("kkt.db"));

        storage.ensure_ready().unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn test_schema_version_on_empty_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE app_meta (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .unwrap();
        assert_eq!(schema_version(&conn).unwrap(), None);
    }
}
