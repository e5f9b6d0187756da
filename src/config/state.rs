// Application state module
// Immutable per-process state shared by every connection

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::{Result, ServerError};

/// Application state
///
/// Built once at startup and never mutated, so connections share it through
/// an `Arc` without locking.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Canonical absolute path of the served directory
    root: PathBuf,
    /// Request path of the entry document, e.g. `/index.html`
    index_path: String,
}

impl AppState {
    /// Resolve the configured root and build the state
    ///
    /// Fails fast when the root is missing or is not a directory.
    pub fn new(config: Config) -> Result<Self> {
        let root = resolve_root(Path::new(&config.static_files.root))?;
        let index_path = config.index_path();
        Ok(Self {
            config,
            root,
            index_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> &str {
        &self.index_path
    }

    pub fn index_file(&self) -> &str {
        &self.config.static_files.index_file
    }
}

fn resolve_root(path: &Path) -> Result<PathBuf> {
    let root = path
        .canonicalize()
        .map_err(|source| ServerError::MissingRoot {
            path: path.to_path_buf(),
            source,
        })?;

    if !root.is_dir() {
        return Err(ServerError::RootNotDirectory { path: root });
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_root(root: &Path) -> Config {
        let mut cfg = Config::default();
        cfg.static_files.root = root.to_string_lossy().into_owned();
        cfg
    }

    #[test]
    fn test_root_is_canonicalized() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("dist")).unwrap();

        let state = AppState::new(config_with_root(&dir.path().join("dist/../dist"))).unwrap();
        assert!(state.root().is_absolute());
        assert_eq!(state.root(), dir.path().join("dist").canonicalize().unwrap());
        assert_eq!(state.index_path(), "/index.html");
    }

    #[test]
    fn test_missing_root_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppState::new(config_with_root(&dir.path().join("dist"))).unwrap_err();
        assert!(matches!(err, ServerError::MissingRoot { .. }));
    }

    #[test]
    fn test_file_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("dist");
        std::fs::write(&file, b"not a directory").unwrap();

        let err = AppState::new(config_with_root(&file)).unwrap_err();
        assert!(matches!(err, ServerError::RootNotDirectory { .. }));
    }
}
