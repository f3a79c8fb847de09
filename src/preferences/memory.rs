use super::storage::PreferenceStore;
use super::PreferenceKey;
use crate::error::{MenuChatError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local store; nothing survives the process.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<PreferenceKey, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<PreferenceKey, String>>> {
        self.values
            .lock()
            .map_err(|_| MenuChatError::PreferenceError("preference map poisoned".to_string()))
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: PreferenceKey) -> Result<Option<String>> {
        Ok(self.lock()?.get(&key).cloned())
    }

    fn write(&self, key: PreferenceKey, value: &str) -> Result<()> {
        self.lock()?.insert(key, value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}
