//! Immutable recipe catalog loaded from exported Factorio recipe JSON
//!
//! The document maps arbitrary keys to recipe records:
//!
//! ```json
//! {
//!   "copper-cable": {
//!     "type": "recipe",
//!     "name": "copper-cable",
//!     "ingredients": [["copper-plate", 1]],
//!     "result": "copper-cable",
//!     "result_count": 2
//!   }
//! }
//! ```
//!
//! Ingredients are either `[name, amount]` pairs or `{"name", "amount"}`
//! objects. The output is either `result` (+ optional `result_count`) or a
//! `results` list holding exactly one `{"name", "amount", "type"}` entry.
//! Recipes with several outputs are skipped without inspecting their
//! entries. Every record must have `"type": "recipe"`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, LookupError};
use crate::models::{DEFAULT_CATEGORY, DEFAULT_CRAFTING_TIME, Recipe};

#[derive(Debug, Deserialize)]
struct RawRecipe {
    name: String,
    ingredients: Vec<RawIngredient>,
    result: Option<String>,
    result_count: Option<u32>,
    /// Entries stay untyped until the list is known to hold a single output
    results: Option<Vec<Value>>,
    category: Option<String>,
    energy_required: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIngredient {
    Named { name: String, amount: f64 },
    Pair(String, f64),
}

#[derive(Debug, Deserialize)]
struct RawResult {
    name: String,
    amount: u32,
    #[serde(rename = "type")]
    kind: String,
}

/// What the record says it produces.
enum Output {
    Single {
        item: String,
        count: u32,
        kind: Option<String>,
    },
    /// Several outputs, or none at all
    Unsupported,
}

impl RawRecipe {
    fn output(&self) -> Result<Output, serde_json::Error> {
        match (&self.results, &self.result) {
            (Some(results), _) if results.len() == 1 => {
                let single = RawResult::deserialize(&results[0])?;
                Ok(Output::Single {
                    item: single.name,
                    count: single.amount,
                    kind: Some(single.kind),
                })
            }
            (Some(_), _) => Ok(Output::Unsupported),
            (None, Some(result)) => Ok(Output::Single {
                item: result.clone(),
                count: self.result_count.unwrap_or(1),
                kind: None,
            }),
            (None, None) => Ok(Output::Unsupported),
        }
    }
}

/// Counters collected while loading a catalog
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadStats {
    pub recipes: usize,
    pub skipped: usize,
    pub ambiguous_outputs: usize,
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loaded {} recipes. Skipped (multiple outputs): {}, Ambiguous outputs: {}",
            self.recipes, self.skipped, self.ambiguous_outputs
        )
    }
}

/// Recipes indexed by name and by sole output item.
///
/// Built once and never mutated; share it by reference.
#[derive(Debug, Default, Clone)]
pub struct RecipeCatalog {
    by_name: BTreeMap<String, Recipe>,
    by_output: HashMap<String, Vec<String>>,
    stats: LoadStats,
}

impl RecipeCatalog {
    /// Load a catalog from a recipe JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), stats = %catalog.stats, "loaded recipe catalog");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: Map<String, Value> = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document: Map<String, Value> = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    fn from_document(document: Map<String, Value>) -> Result<Self, CatalogError> {
        let mut catalog = RecipeCatalog::default();

        for (key, value) in document {
            match value.get("type").and_then(Value::as_str) {
                Some("recipe") => {}
                Some(kind) => {
                    return Err(CatalogError::UnexpectedType {
                        key,
                        kind: kind.to_string(),
                    });
                }
                None => {
                    return Err(CatalogError::Malformed {
                        key,
                        detail: "missing string field `type`".to_string(),
                    });
                }
            }

            let raw: RawRecipe =
                serde_json::from_value(value).map_err(|e| CatalogError::Malformed {
                    key: key.clone(),
                    detail: e.to_string(),
                })?;

            match build_recipe(&key, raw)? {
                Some(recipe) => catalog.insert(recipe)?,
                None => {
                    debug!(key = %key, "skipping recipe without a single output");
                    catalog.stats.skipped += 1;
                }
            }
        }

        for (item, recipes) in &catalog.by_output {
            if recipes.len() > 1 {
                warn!(item = %item, recipes = ?recipes, "item is the sole output of several recipes");
                catalog.stats.ambiguous_outputs += 1;
            }
        }

        Ok(catalog)
    }

    fn insert(&mut self, recipe: Recipe) -> Result<(), CatalogError> {
        if self.by_name.contains_key(&recipe.name) {
            return Err(CatalogError::DuplicateRecipe(recipe.name));
        }
        let producers = self.by_output.entry(recipe.result.clone()).or_default();
        producers.push(recipe.name.clone());
        producers.sort();
        self.by_name.insert(recipe.name.clone(), recipe);
        self.stats.recipes += 1;
        Ok(())
    }

    pub fn lookup_by_name(&self, name: &str) -> Result<&Recipe, LookupError> {
        self.by_name
            .get(name)
            .ok_or_else(|| LookupError::RecipeNotFound(name.to_string()))
    }

    /// The recipe whose only output is `item`.
    pub fn lookup_by_sole_output(&self, item: &str) -> Result<&Recipe, LookupError> {
        match self.by_output.get(item).map(Vec::as_slice) {
            None | Some([]) => Err(LookupError::RecipeNotFound(item.to_string())),
            Some([name]) => self.lookup_by_name(name),
            Some(names) => Err(LookupError::AmbiguousOutput {
                item: item.to_string(),
                recipes: names.to_vec(),
            }),
        }
    }

    /// Every item produced by exactly one sole-output recipe, sorted by name.
    pub fn all_producible_items(&self) -> Vec<&str> {
        let mut items: Vec<&str> = self
            .by_output
            .iter()
            .filter(|(_, recipes)| recipes.len() == 1)
            .map(|(item, _)| item.as_str())
            .collect();
        items.sort_unstable();
        items
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}

fn build_recipe(key: &str, raw: RawRecipe) -> Result<Option<Recipe>, CatalogError> {
    let output = raw.output().map_err(|e| CatalogError::Malformed {
        key: key.to_string(),
        detail: e.to_string(),
    })?;
    let (result, count_produced, result_type) = match output {
        Output::Single { item, count, kind } => (item, count, kind),
        Output::Unsupported => return Ok(None),
    };

    if count_produced == 0 {
        return Err(CatalogError::ZeroResultCount(raw.name));
    }

    let crafting_time = raw.energy_required.unwrap_or(DEFAULT_CRAFTING_TIME);
    if crafting_time.is_nan() || crafting_time <= 0.0 {
        return Err(CatalogError::InvalidCraftingTime {
            recipe: raw.name,
            value: crafting_time,
        });
    }

    let mut ingredients = BTreeMap::new();
    for ingredient in raw.ingredients {
        let (name, amount) = match ingredient {
            RawIngredient::Named { name, amount } => (name, amount),
            RawIngredient::Pair(name, amount) => (name, amount),
        };
        if amount.is_nan() || amount <= 0.0 {
            return Err(CatalogError::InvalidIngredientAmount {
                recipe: raw.name,
                ingredient: name,
                amount,
            });
        }
        ingredients.insert(name, amount);
    }

    Ok(Some(Recipe {
        name: raw.name,
        category: raw.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        crafting_time,
        ingredients,
        result,
        result_type,
        count_produced,
    }))
}
