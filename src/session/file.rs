use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::{Session, TokenStore, Tokens};
use crate::error::Result;
use crate::models::role::Role;

/// On-disk layout: four string values under fixed keys.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntries {
    access_token: String,
    refresh_token: String,
    token_type: String,
    user_type: String,
}

/// Keeps the session in a small JSON file so it survives between runs.
/// Every read goes to disk; writes land in a temp file that is renamed over
/// the real one.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_entries(&self) -> Option<StoredEntries> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read session file");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed session file");
                None
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<Session> {
        let entries = self.read_entries()?;
        let role = entries.user_type.parse::<Role>().unwrap_or_else(|_| {
            warn!(user_type = %entries.user_type, "Unknown stored role, treating as user");
            Role::User
        });
        Some(Session {
            tokens: Tokens {
                access_token: entries.access_token,
                refresh_token: entries.refresh_token,
                token_type: entries.token_type,
            },
            role,
        })
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let entries = StoredEntries {
            access_token: session.tokens.access_token.clone(),
            refresh_token: session.tokens.refresh_token.clone(),
            token_type: session.tokens.token_type.clone(),
            user_type: session.role.as_str().to_string(),
        };
        let temp = self.temp_path();
        fs::write(&temp, serde_json::to_vec_pretty(&entries)?)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
