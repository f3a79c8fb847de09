//! The static restaurant menu: a read-only JSON document of named item
//! categories, loaded once and shared by the prompt composer and the menu
//! browser.

mod price;

pub use price::{format_ceiling, is_below_ceiling, parse_display_price};

use crate::error::{MenuChatError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

const BUNDLED_MENU: &str = include_str!("../../data/menu.json");

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MenuItem {
    pub name: String,
    #[serde(rename = "displayPrice")]
    pub display_price: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MenuItem {
    pub fn price(&self) -> Option<f64> {
        parse_display_price(&self.display_price)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub key: String,
    pub title: String,
    pub items: Vec<MenuItem>,
}

impl Category {
    /// Items whose parsed price is strictly below `ceiling`, in menu order.
    pub fn items_below(&self, ceiling: f64) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| is_below_ceiling(&item.display_price, ceiling))
            .collect()
    }
}

#[derive(Deserialize)]
struct RawCategory {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    items: Vec<MenuItem>,
}

#[derive(Debug, Clone)]
pub struct Menu {
    document: Value,
    categories: Vec<Category>,
}

impl Menu {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(contents)?;
        Self::from_value(document)
    }

    pub fn from_value(document: Value) -> Result<Self> {
        let all_items = document
            .get("allItems")
            .and_then(|v| v.as_object())
            .ok_or_else(|| MenuChatError::MenuError("missing 'allItems' object".to_string()))?;

        let mut categories = Vec::with_capacity(all_items.len());
        for (key, value) in all_items {
            let raw: RawCategory = serde_json::from_value(value.clone()).map_err(|e| {
                MenuChatError::MenuError(format!("invalid category '{}': {}", key, e))
            })?;
            categories.push(Category {
                key: key.clone(),
                title: raw.title.unwrap_or_else(|| humanize_key(key)),
                items: raw.items,
            });
        }

        Ok(Self {
            document,
            categories,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            MenuChatError::MenuError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// The sample menu compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_MENU)
    }

    pub fn load_or_bundled(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Compact JSON of the whole document, keys in document order.
    pub fn to_json(&self) -> String {
        self.document.to_string()
    }
}

/// `proteinPlates` -> `Protein Plates`
fn humanize_key(key: &str) -> String {
    let mut title = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            title.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            title.push(' ');
            title.push(ch);
        } else if ch == '_' || ch == '-' {
            title.push(' ');
        } else {
            title.push(ch);
        }
    }
    title
}
