//! One JSON file per key under a directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::LocalError;

/// What [`KeyedFileStore::load`] found under a key.
#[derive(Debug)]
pub enum Loaded<T> {
    Missing,
    Value(T),
    /// The file exists but does not parse as `T`.
    Corrupt(serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct KeyedFileStore {
    dir: PathBuf,
}

impl KeyedFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// # Errors
    ///
    /// Returns `LocalError::Io` if the file exists but cannot be read.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Loaded<T>, LocalError> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Loaded::Missing),
            Err(source) => return Err(LocalError::Io { path, source }),
        };
        Ok(match serde_json::from_str(&raw) {
            Ok(value) => Loaded::Value(value),
            Err(e) => Loaded::Corrupt(e),
        })
    }

    /// Write `value` under `key`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `LocalError::Serialize` or `LocalError::Io`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), LocalError> {
        let json = serde_json::to_string_pretty(value).map_err(|source| LocalError::Serialize {
            key: key.to_string(),
            source,
        })?;

        fs::create_dir_all(&self.dir).map_err(|source| LocalError::Io {
            path: self.dir.clone(),
            source,
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }

        let path = self.path_for(key);
        fs::write(&path, json).map_err(|source| LocalError::Io {
            path: path.clone(),
            source,
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
                .map_err(|source| LocalError::Io { path, source })?;
        }
        Ok(())
    }

    /// Remove the file for `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `LocalError::Io` if the file exists but cannot be removed.
    pub fn remove(&self, key: &str) -> Result<(), LocalError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(LocalError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn save_load_remove_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = KeyedFileStore::new(tmp.path().join("nested"));

        assert!(matches!(store.load::<Vec<u32>>("k").unwrap(), Loaded::Missing));
        store.save("k", &vec![1, 2, 3]).unwrap();
        match store.load::<Vec<u32>>("k").unwrap() {
            Loaded::Value(v) => assert_eq!(v, vec![1, 2, 3]),
            other => panic!("expected value, got {other:?}"),
        }

        store.remove("k").unwrap();
        assert!(!store.path_for("k").exists());
        store.remove("k").unwrap();
    }

    #[test]
    fn unparseable_file_reports_corrupt() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = KeyedFileStore::new(tmp.path());
        std::fs::write(store.path_for("k"), "{not json").unwrap();
        assert!(matches!(store.load::<Vec<u32>>("k").unwrap(), Loaded::Corrupt(_)));
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = KeyedFileStore::new(tmp.path());
        store.save("k", &"v").unwrap();
        let mode = std::fs::metadata(store.path_for("k")).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
