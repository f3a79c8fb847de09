use super::storage::PreferenceStore;
use super::PreferenceKey;
use crate::error::{MenuChatError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One raw-text file per key under a root directory, the on-disk analog of
/// browser local storage.
pub struct FilesystemPreferenceStore {
    root: PathBuf,
}

impl FilesystemPreferenceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<data dir>/menuchat/preferences`, falling back to the working directory.
    pub fn default_root() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("menuchat")
            .join("preferences")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: PreferenceKey) -> PathBuf {
        self.root.join(key.storage_name())
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| {
                MenuChatError::PreferenceError(format!(
                    "failed to create {}: {}",
                    self.root.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

impl PreferenceStore for FilesystemPreferenceStore {
    fn read(&self, key: PreferenceKey) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: PreferenceKey, value: &str) -> Result<()> {
        self.ensure_root()?;
        fs::write(self.key_path(key), value)?;
        tracing::debug!(key = key.storage_name(), bytes = value.len(), "preference saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        for key in PreferenceKey::ALL {
            match fs::remove_file(self.key_path(key)) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl Default for FilesystemPreferenceStore {
    fn default() -> Self {
        Self::new(Self::default_root())
    }
}
