//! services/dashboard/src/adapters/token_file.rs
//!
//! File-backed implementation of the `TokenStore` port: one token in one
//! file, surviving restarts the way browser local storage survives reloads.
//!
//! Storage failures are logged and swallowed; the port contract forbids
//! failing the caller (logout cannot fail).

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chalkboard_core::ports::TokenStore;
use tracing::warn;

/// A token store that keeps the raw token string in a single file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a new `FileTokenStore` persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read token file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, token: &str) {
        if let Err(e) = fs::write(&self.path, token) {
            warn!("Failed to write token file {}: {}", self.path.display(), e);
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove token file {}: {}", self.path.display(), e),
        }
    }
}
