//! Data models for Factorio recipes, machines and production demands

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CATEGORY: &str = "crafting";
pub const DEFAULT_CRAFTING_TIME: f64 = 0.5;

/// Items treated as raw materials even when a recipe produces them.
/// Refining is not modelled.
pub const REFINED_FLUIDS: [&str; 3] = ["heavy-oil", "light-oil", "petroleum-gas"];

pub fn is_refined_fluid(item: &str) -> bool {
    REFINED_FLUIDS.contains(&item)
}

/// A recipe with exactly one output item.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub category: String,
    pub crafting_time: f64,
    /// Ingredient item -> amount consumed per craft
    pub ingredients: BTreeMap<String, f64>,
    pub result: String,
    /// "item" or "fluid" when the data gives a `results` list
    pub result_type: Option<String>,
    pub count_produced: u32,
}

impl Recipe {
    /// Items produced per unit of time by a machine with crafting speed 1.
    pub fn crafting_rate(&self) -> f64 {
        f64::from(self.count_produced) / self.crafting_time
    }
}

/// A production machine, e.g. an assembling machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Producer {
    pub name: String,
    pub crafting_categories: BTreeSet<String>,
    pub crafting_speed: f64,
}

impl Producer {
    pub fn new(name: &str, categories: &[&str], crafting_speed: f64) -> Self {
        Self {
            name: name.to_string(),
            crafting_categories: categories.iter().map(|c| c.to_string()).collect(),
            crafting_speed,
        }
    }

    pub fn services(&self, category: &str) -> bool {
        self.crafting_categories.contains(category)
    }
}

/// A requested production rate for one item, written `item[=rate]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Demand {
    pub item: String,
    pub rate: f64,
}

impl Demand {
    pub const DEFAULT_RATE: f64 = 1.0;

    pub fn new(item: impl Into<String>, rate: f64) -> Self {
        Self {
            item: item.into(),
            rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DemandParseError {
    #[error("empty item name in demand '{0}'")]
    EmptyItem(String),
    #[error("invalid rate in demand '{0}'")]
    InvalidRate(String),
    #[error("rate must be a positive number in demand '{0}'")]
    NonPositiveRate(String),
}

impl FromStr for Demand {
    type Err = DemandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item, rate) = match s.split_once('=') {
            Some((item, rate)) => {
                let rate: f64 = rate
                    .trim()
                    .parse()
                    .map_err(|_| DemandParseError::InvalidRate(s.to_string()))?;
                (item.trim(), rate)
            }
            None => (s.trim(), Self::DEFAULT_RATE),
        };

        if item.is_empty() {
            return Err(DemandParseError::EmptyItem(s.to_string()));
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(DemandParseError::NonPositiveRate(s.to_string()));
        }
        Ok(Demand::new(item, rate))
    }
}

impl fmt::Display for Demand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.item, self.rate)
    }
}
