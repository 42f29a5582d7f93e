//! English display names for internal Factorio identifiers
//!
//! e.g. `basic-armor` => `Iron armor`,
//! `heavy-oil-cracking` => `Heavy oil cracking to light oil`.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::NamesError;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct NameTable {
    #[serde(rename = "item-names", default)]
    items: HashMap<String, String>,
    #[serde(rename = "recipe-names", default)]
    recipes: HashMap<String, String>,
}

impl NameTable {
    pub fn load(path: &Path) -> Result<Self, NamesError> {
        let file = std::fs::File::open(path).map_err(|source| NamesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            items = table.items.len(),
            recipes = table.recipes.len(),
            "loaded display names"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, NamesError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, NamesError> {
        Ok(serde_json::from_str(json)?)
    }

    /// English name of an item, or the id itself when unknown.
    pub fn best_item_name<'a>(&'a self, item_id: &'a str) -> &'a str {
        self.items.get(item_id).map_or(item_id, String::as_str)
    }

    /// English name of a recipe, falling back to the item name and then to
    /// the id itself.
    pub fn best_recipe_name<'a>(&'a self, recipe_id: &'a str) -> &'a str {
        match self.recipes.get(recipe_id) {
            Some(name) if !name.is_empty() => name.as_str(),
            _ => self.best_item_name(recipe_id),
        }
    }
}
