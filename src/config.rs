//! Data file locations and startup loading

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::catalog::RecipeCatalog;
use crate::icons::IconIndex;
use crate::names::NameTable;
use crate::planner::Planner;
use crate::production::ProducerTable;

pub const DEFAULT_RECIPES: &str = "factorio-data/recipes.json";
pub const DEFAULT_NAMES: &str = "factorio-data/names.json";
pub const DEFAULT_ICON_URL_PREFIX: &str = "/factorio-data/icons";

/// Where the exported game data lives.
#[derive(Debug, Clone)]
pub struct DataSources {
    pub recipes: PathBuf,
    /// Display names; the default location is used only if it exists
    pub names: Option<PathBuf>,
    pub icons: Option<PathBuf>,
    pub icon_url_prefix: String,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            recipes: PathBuf::from(DEFAULT_RECIPES),
            names: None,
            icons: None,
            icon_url_prefix: DEFAULT_ICON_URL_PREFIX.to_string(),
        }
    }
}

impl DataSources {
    /// Load everything once. Any malformed file is fatal.
    pub fn load(&self) -> Result<Planner> {
        let catalog = RecipeCatalog::load(&self.recipes)
            .with_context(|| format!("Failed to load recipes from {}", self.recipes.display()))?;

        let names = match &self.names {
            Some(path) => NameTable::load(path)
                .with_context(|| format!("Failed to load names from {}", path.display()))?,
            None => {
                let default = PathBuf::from(DEFAULT_NAMES);
                if default.is_file() {
                    NameTable::load(&default).with_context(|| {
                        format!("Failed to load names from {}", default.display())
                    })?
                } else {
                    NameTable::default()
                }
            }
        };

        let icons = match &self.icons {
            Some(dir) => IconIndex::scan(dir, &self.icon_url_prefix),
            None => IconIndex::default(),
        };

        Ok(Planner::new(catalog)
            .with_producers(ProducerTable::standard())
            .with_names(names)
            .with_icons(icons))
    }
}
