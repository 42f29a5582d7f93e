//! Error types for catalog loading, lookups and planning

use std::path::PathBuf;

/// Fatal problems found while loading the recipe catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid recipe document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed recipe '{key}': {detail}")]
    Malformed { key: String, detail: String },

    #[error("record '{key}' has type '{kind}', expected 'recipe'")]
    UnexpectedType { key: String, kind: String },

    #[error("duplicate recipe '{0}'")]
    DuplicateRecipe(String),

    #[error("recipe '{recipe}' has non-positive energy_required {value}")]
    InvalidCraftingTime { recipe: String, value: f64 },

    #[error("recipe '{0}' produces zero items per craft")]
    ZeroResultCount(String),

    #[error("recipe '{recipe}' needs non-positive amount {amount} of '{ingredient}'")]
    InvalidIngredientAmount {
        recipe: String,
        ingredient: String,
        amount: f64,
    },
}

/// Problems reading the display-name document.
#[derive(Debug, thiserror::Error)]
pub enum NamesError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid names document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A query against the catalog or producer table found nothing usable.
///
/// These never reach the caller of a plan: the planner turns them into
/// base materials or absent machine information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("no recipe for '{0}'")]
    RecipeNotFound(String),

    #[error("'{item}' is the sole output of several recipes: {recipes:?}")]
    AmbiguousOutput { item: String, recipes: Vec<String> },

    #[error("no producer services crafting category '{category}'")]
    NoProducer { category: String },
}

/// Failures while building a production plan.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("recipe cycle detected at '{item}'")]
    CycleDetected { item: String },

    #[error("items cannot be ordered, their suppliers form a cycle: {items:?}")]
    Unorderable { items: Vec<String> },
}
