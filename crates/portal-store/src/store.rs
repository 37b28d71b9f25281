//! File-backed configuration store adapter
//!
//! A single JSON record under the user config directory. Reads never
//! fail the caller: a missing or unreadable record degrades to the
//! default (empty) config. Writes are atomic via a sibling temp file
//! and rename, so a reader can never observe a torn record. No
//! locking; last writer wins.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::StoreError;

const APP_DIR: &str = "portal-autologin";
const RECORD_FILE: &str = "config.json";

/// The persisted record. Key names are fixed; they are the external
/// contract shared with anything else that inspects the file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredConfig {
    /// Plaintext registration number; required for the agent to run.
    pub reg_number: String,
    /// Base64-obfuscated password (see [`crate::codec`]).
    pub password: String,
    /// User-supplied CSS selector overrides, tried before built-ins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_selector: Option<String>,
}

impl StoredConfig {
    /// Whether the record carries both required credentials. The
    /// password is checked in its decoded form: a stored value that
    /// decodes to nothing counts as absent.
    pub fn has_credentials(&self) -> bool {
        !self.reg_number.is_empty() && !crate::codec::decode(&self.password).is_empty()
    }
}

/// Store adapter bound to one record file on disk.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Open the store in the default user config directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let base = dirs::config_dir()
            .ok_or_else(|| StoreError::Directory("no user config directory".into()))?;
        Self::open_in(base.join(APP_DIR))
    }

    /// Open the store in an explicit directory, creating it if needed.
    pub fn open_in(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            op: "create",
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: dir.join(RECORD_FILE),
        })
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record. Missing, unreadable, or malformed files all
    /// yield the default record; the condition is logged, never
    /// surfaced as an error.
    pub async fn load(&self) -> StoredConfig {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config record at {}", self.path.display());
                return StoredConfig::default();
            }
            Err(err) => {
                warn!("config record unreadable at {}: {}", self.path.display(), err);
                return StoredConfig::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!("config record malformed at {}: {}", self.path.display(), err);
                StoredConfig::default()
            }
        }
    }

    /// Persist the record atomically.
    pub async fn save(&self, config: &StoredConfig) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &payload)
            .await
            .map_err(|source| StoreError::Io {
                op: "write",
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StoreError::Io {
                op: "rename",
                path: self.path.clone(),
                source,
            })?;
        debug!("config record saved to {}", self.path.display());
        Ok(())
    }

    /// Remove the record wholesale. Absent record is success.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                op: "remove",
                path: self.path.clone(),
                source,
            }),
        }
    }
}
