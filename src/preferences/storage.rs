use super::PreferenceKey;
use crate::error::Result;

/// Trait for preference storage backends
pub trait PreferenceStore: Send + Sync {
    /// Read the raw text stored under `key`, `None` if it was never written
    fn read(&self, key: PreferenceKey) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing whatever was there
    fn write(&self, key: PreferenceKey, value: &str) -> Result<()>;

    /// Remove every stored preference
    fn clear(&self) -> Result<()>;
}
