mod filesystem;
mod memory;
mod storage;

pub use filesystem::FilesystemPreferenceStore;
pub use memory::MemoryPreferenceStore;
pub use storage::PreferenceStore;

use crate::error::{MenuChatError, Result};
use std::fmt;
use std::str::FromStr;

/// The three fixed preference slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    DietaryRestrictions,
    DislikedFoods,
    LikedFoods,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 3] = [
        PreferenceKey::DietaryRestrictions,
        PreferenceKey::DislikedFoods,
        PreferenceKey::LikedFoods,
    ];

    /// Name the value is stored under.
    pub fn storage_name(&self) -> &'static str {
        match self {
            PreferenceKey::DietaryRestrictions => "dietaryRestrictions",
            PreferenceKey::DislikedFoods => "foodsIDontLike",
            PreferenceKey::LikedFoods => "foodsILike",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PreferenceKey::DietaryRestrictions => "Dietary Restrictions",
            PreferenceKey::DislikedFoods => "Food I Don't Like",
            PreferenceKey::LikedFoods => "Foods I Like",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_name())
    }
}

impl FromStr for PreferenceKey {
    type Err = MenuChatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dietary" | "diet" | "restrictions" | "dietaryrestrictions" => {
                Ok(PreferenceKey::DietaryRestrictions)
            }
            "dislikes" | "dislike" | "disliked" | "foodsidontlike" => {
                Ok(PreferenceKey::DislikedFoods)
            }
            "likes" | "like" | "liked" | "foodsilike" => Ok(PreferenceKey::LikedFoods),
            other => Err(MenuChatError::PreferenceError(format!(
                "unknown preference '{}' (expected dietary, dislikes or likes)",
                other
            ))),
        }
    }
}

/// Snapshot of all three preference fields. Missing keys read as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub dietary_restrictions: String,
    pub disliked_foods: String,
    pub liked_foods: String,
}

impl Preferences {
    pub fn load(store: &dyn PreferenceStore) -> Result<Self> {
        let read = |key| -> Result<String> { Ok(store.read(key)?.unwrap_or_default()) };
        Ok(Self {
            dietary_restrictions: read(PreferenceKey::DietaryRestrictions)?,
            disliked_foods: read(PreferenceKey::DislikedFoods)?,
            liked_foods: read(PreferenceKey::LikedFoods)?,
        })
    }

    pub fn get(&self, key: PreferenceKey) -> &str {
        match key {
            PreferenceKey::DietaryRestrictions => &self.dietary_restrictions,
            PreferenceKey::DislikedFoods => &self.disliked_foods,
            PreferenceKey::LikedFoods => &self.liked_foods,
        }
    }
}
