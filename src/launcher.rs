// Bootstrap launcher
// Makes the install root the working directory and puts it first on PATH,
// so the application behaves the same no matter where it was started from.

use crate::app;
use crate::config::{self, AppConfig};
use crate::error::{AppError, Result};
use crate::logging;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use tracing::{debug, info};

pub const SEARCH_PATH_VAR: &str = "PATH";

/// Normalize the process environment, then run the application once.
///
/// Returns the event loop's exit code unchanged. Errors are not handled here.
pub fn launch() -> Result<i32> {
    let install_root = config::install_root()?;
    normalize_environment(&install_root)?;

    let config = AppConfig::load()?;
    logging::init_tracing(&config)?;

    info!(
        app = %config.app_name,
        version = %config.app_version,
        install_root = %config.install_root.display(),
        "Launching"
    );
    debug!(config = %config.to_json(), "Resolved configuration");

    app::main(&config)
}

/// Make `root` the working directory and the first `PATH` entry.
pub fn normalize_environment(root: &Path) -> Result<()> {
    std::env::set_current_dir(root).map_err(AppError::InstallRootUnresolved)?;

    let search_path = prepended_search_path(root, std::env::var_os(SEARCH_PATH_VAR))?;
    std::env::set_var(SEARCH_PATH_VAR, &search_path);
    Ok(())
}

/// `root` followed by every entry of `existing`, joined for the host OS.
pub fn prepended_search_path(root: &Path, existing: Option<OsString>) -> Result<OsString> {
    let mut entries = vec![root.to_path_buf()];
    if let Some(existing) = existing {
        entries.extend(std::env::split_paths(&existing));
    }

    std::env::join_paths(entries)
        .map_err(|e| AppError::Io(io::Error::new(io::ErrorKind::InvalidInput, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_prepend_to_empty_path() {
        let joined = prepended_search_path(Path::new("/opt/kkt"), None).unwrap();
        assert_eq!(joined, OsString::from("/opt/kkt"));
    }

    #[test]
    fn test_root_comes_first() {
        let existing = std::env::join_paths(["/usr/bin", "/bin"]).unwrap();
        let joined = prepended_search_path(Path::new("/opt/kkt"), Some(existing)).unwrap();

        let entries: Vec<PathBuf> = std::env::split_paths(&joined).collect();
        assert_eq!(
            entries,
            vec![
                PathBuf::from("/opt/kkt"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_root_with_separator_is_rejected() {
        let result = prepended_search_path(Path::new("/opt/a:b"), None);
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_normalize_environment_moves_cwd_and_path() {
        let previous_dir = std::env::current_dir().unwrap();
        let previous_path = std::env::var_os(SEARCH_PATH_VAR);

        let root = tempfile::tempdir().unwrap();
        let root_path = root.path().canonicalize().unwrap();
        normalize_environment(&root_path).unwrap();

        let cwd = std::env::current_dir().unwrap();
        let path = std::env::var_os(SEARCH_PATH_VAR).unwrap();
        let first = std::env::split_paths(&path).next().unwrap();

        std::env::set_current_dir(&previous_dir).unwrap();
        match previous_path {
            Some(value) => std::env::set_var(SEARCH_PATH_VAR, value),
            None => std::env::remove_var(SEARCH_PATH_VAR),
        }

        assert_eq!(cwd, root_path);
        assert_eq!(first, root_path);
    }

    #[test]
    fn test_normalize_environment_missing_root_fails() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("gone");

        let result = normalize_environment(&missing);
        assert!(matches!(result, Err(AppError::InstallRootUnresolved(_))));
    }
}
