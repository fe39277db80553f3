//! Username/password persisted between runs.
//!
//! The store is an explicit object handed to whoever needs it. Each field is
//! an optional entry in `credentials.toml`; a field that is empty in memory
//! has no entry on disk (under the default [`EmptyFieldPolicy::Clear`]).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::config_dir;
use crate::error::{EvCopyError, EvCopyResult};

/// What happens to a saved entry when its field is set to an empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyFieldPolicy {
    /// Remove the saved entry.
    #[default]
    Clear,
    /// Leave whatever was saved before.
    Keep,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credential {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are present; nothing else is checked locally.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// On-disk shape of credentials.toml
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredential {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl StoredCredential {
    fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

pub struct CredentialStore {
    path: PathBuf,
    policy: EmptyFieldPolicy,
    current: Credential,
    loaded_from_storage: bool,
}

impl CredentialStore {
    pub fn default_path() -> EvCopyResult<PathBuf> {
        Ok(config_dir()?.join("credentials.toml"))
    }

    pub fn open_default(policy: EmptyFieldPolicy) -> EvCopyResult<Self> {
        Self::open(Self::default_path()?, policy)
    }

    /// Read whatever was saved at `path`. A missing file means no saved credentials.
    pub fn open(path: impl Into<PathBuf>, policy: EmptyFieldPolicy) -> EvCopyResult<Self> {
        let path = path.into();
        let stored = read_stored(&path)?;

        let loaded_from_storage = stored.username.is_some() && stored.password.is_some();
        let current = Credential {
            username: stored.username.unwrap_or_default(),
            password: stored.password.unwrap_or_default(),
        };

        tracing::debug!(path = %path.display(), loaded_from_storage, "opened credential store");

        Ok(CredentialStore {
            path,
            policy,
            current,
            loaded_from_storage,
        })
    }

    pub fn get(&self) -> &Credential {
        &self.current
    }

    /// True when both fields were found on disk at startup.
    pub fn loaded_from_storage(&self) -> bool {
        self.loaded_from_storage
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace both fields and write the change through to disk.
    pub fn set(&mut self, username: &str, password: &str) -> EvCopyResult<()> {
        self.current = Credential::new(username, password);

        let mut stored = read_stored(&self.path)?;
        apply_field(&mut stored.username, username, self.policy);
        apply_field(&mut stored.password, password, self.policy);

        self.write_stored(&stored)
    }

    /// Log out: empty both fields and remove both saved entries.
    pub fn clear(&mut self) -> EvCopyResult<()> {
        self.current = Credential::default();
        self.loaded_from_storage = false;

        self.write_stored(&StoredCredential::default())
    }

    fn write_stored(&self, stored: &StoredCredential) -> EvCopyResult<()> {
        if stored.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path)?;
            }
            return Ok(());
        }

        let contents =
            toml::to_string_pretty(stored).map_err(|e| EvCopyError::Storage(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, contents)?;

        // Plaintext password, so owner-only (0600):
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

fn apply_field(entry: &mut Option<String>, value: &str, policy: EmptyFieldPolicy) {
    if !value.is_empty() {
        *entry = Some(value.to_string());
    } else if policy == EmptyFieldPolicy::Clear {
        *entry = None;
    }
}

fn read_stored(path: &Path) -> EvCopyResult<StoredCredential> {
    if !path.exists() {
        return Ok(StoredCredential::default());
    }

    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|e| {
        EvCopyError::Storage(format!("Failed to parse {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir, policy: EmptyFieldPolicy) -> CredentialStore {
        CredentialStore::open(dir.path().join("credentials.toml"), policy).unwrap()
    }

    #[test]
    fn starts_empty_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, EmptyFieldPolicy::Clear);

        assert_eq!(store.get(), &Credential::default());
        assert!(!store.loaded_from_storage());
        assert!(!store.get().is_complete());
    }

    #[test]
    fn set_persists_and_rehydrates() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, EmptyFieldPolicy::Clear);
        store.set("editor", "hunter2").unwrap();

        let reopened = store_in(&dir, EmptyFieldPolicy::Clear);
        assert_eq!(reopened.get(), &Credential::new("editor", "hunter2"));
        assert!(reopened.loaded_from_storage());
    }

    #[test]
    fn empty_field_removes_entry_under_clear_policy() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, EmptyFieldPolicy::Clear);
        store.set("editor", "hunter2").unwrap();
        store.set("editor", "").unwrap();

        let reopened = store_in(&dir, EmptyFieldPolicy::Clear);
        assert_eq!(reopened.get().username, "editor");
        assert_eq!(reopened.get().password, "");
        assert!(!reopened.loaded_from_storage());
    }

    #[test]
    fn empty_field_keeps_entry_under_keep_policy() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, EmptyFieldPolicy::Keep);
        store.set("editor", "hunter2").unwrap();
        store.set("editor", "").unwrap();

        // In memory the field is empty, on disk the old value survives
        assert_eq!(store.get().password, "");
        let reopened = store_in(&dir, EmptyFieldPolicy::Keep);
        assert_eq!(reopened.get().password, "hunter2");
    }

    #[test]
    fn clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, EmptyFieldPolicy::Keep);
        store.set("editor", "hunter2").unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();

        assert!(!store.path().exists());
        assert_eq!(store.get(), &Credential::default());
        assert!(!store_in(&dir, EmptyFieldPolicy::Keep).loaded_from_storage());
    }

    #[cfg(unix)]
    #[test]
    fn file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, EmptyFieldPolicy::Clear);
        store.set("editor", "hunter2").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn malformed_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.toml");
        std::fs::write(&path, "username = [").unwrap();

        assert!(matches!(
            CredentialStore::open(&path, EmptyFieldPolicy::Clear),
            Err(EvCopyError::Storage(_))
        ));
    }
}
