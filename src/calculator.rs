//! Production rate propagation
//!
//! Expands each requested item into the items its recipe consumes, scaled
//! to the requested rate, and accumulates the rate every consumer demands
//! of every supplier. Refining and mining are not modelled: refined fluids
//! and items without a sole-output recipe are base materials.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use tracing::{debug, trace};

use crate::catalog::RecipeCatalog;
use crate::error::{LookupError, PlanError};
use crate::models::{Demand, Recipe, is_refined_fluid};

/// Who demands an item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Consumer {
    /// Requested directly, not needed by any recipe
    Requested,
    Item(String),
}

impl fmt::Display for Consumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Consumer::Requested => f.write_str("(requested)"),
            Consumer::Item(name) => f.write_str(name),
        }
    }
}

/// Rates flowing into and out of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionNode {
    pub item: String,
    /// Ingredient item -> rate this item consumes it at
    pub suppliers: BTreeMap<String, f64>,
    /// Consumer -> rate it demands this item at
    pub consumers: BTreeMap<Consumer, f64>,
}

impl ProductionNode {
    fn new(item: &str) -> Self {
        Self {
            item: item.to_string(),
            suppliers: BTreeMap::new(),
            consumers: BTreeMap::new(),
        }
    }

    fn add_supplier(&mut self, item: &str, rate: f64) {
        *self.suppliers.entry(item.to_string()).or_default() += rate;
    }

    fn add_consumer(&mut self, consumer: Consumer, rate: f64) {
        *self.consumers.entry(consumer).or_default() += rate;
    }

    /// Total rate at which this item must be produced.
    pub fn required_rate(&self) -> f64 {
        self.consumers.values().sum()
    }

    pub fn is_requested(&self) -> bool {
        self.consumers.contains_key(&Consumer::Requested)
    }
}

/// The recipe used to make `item`, or `None` for a base material.
///
/// Refined fluids are base materials even when a recipe makes them; items
/// with no recipe, or with several competing recipes, are too.
pub fn producing_recipe<'c>(catalog: &'c RecipeCatalog, item: &str) -> Option<&'c Recipe> {
    if is_refined_fluid(item) {
        return None;
    }
    match catalog.lookup_by_sole_output(item) {
        Ok(recipe) => Some(recipe),
        Err(LookupError::AmbiguousOutput { recipes, .. }) => {
            debug!(item, ?recipes, "ambiguous recipe, treating as base material");
            None
        }
        Err(_) => None,
    }
}

enum Step<'a> {
    Expand {
        parent: Option<&'a str>,
        item: &'a str,
        rate: f64,
    },
    /// All ingredients of `item` have been expanded
    Leave(&'a str),
}

/// Calculate the complete tree of items needed to satisfy `demands`.
///
/// Returns one node per distinct item, sorted by item name. For example
/// two electronic circuits per unit of time need six copper cables, three
/// copper plates, three copper ore, two iron plates and two iron ore.
///
/// Fails only if the recipes form a cycle.
pub fn calculate_required_production_rates(
    catalog: &RecipeCatalog,
    demands: &[Demand],
) -> Result<Vec<ProductionNode>, PlanError> {
    let mut nodes: HashMap<&str, ProductionNode> = HashMap::new();
    // Items on the path currently being expanded
    let mut active: HashSet<&str> = HashSet::new();

    let mut stack: Vec<Step> = demands
        .iter()
        .rev()
        .map(|demand| Step::Expand {
            parent: None,
            item: &demand.item,
            rate: demand.rate,
        })
        .collect();

    while let Some(step) = stack.pop() {
        let (parent, item, rate) = match step {
            Step::Leave(item) => {
                active.remove(item);
                continue;
            }
            Step::Expand { parent, item, rate } => (parent, item, rate),
        };
        trace!(item, ?parent, rate, "expanding");

        let consumer = match parent {
            Some(parent) => {
                nodes
                    .entry(parent)
                    .or_insert_with(|| ProductionNode::new(parent))
                    .add_supplier(item, rate);
                Consumer::Item(parent.to_string())
            }
            None => Consumer::Requested,
        };
        nodes
            .entry(item)
            .or_insert_with(|| ProductionNode::new(item))
            .add_consumer(consumer, rate);

        let Some(recipe) = producing_recipe(catalog, item) else {
            continue;
        };

        if !active.insert(item) {
            return Err(PlanError::CycleDetected {
                item: item.to_string(),
            });
        }
        stack.push(Step::Leave(item));

        let count = f64::from(recipe.count_produced);
        for (ingredient, amount) in recipe.ingredients.iter().rev() {
            stack.push(Step::Expand {
                parent: Some(item),
                item: ingredient,
                rate: amount * rate / count,
            });
        }
    }

    let mut result: Vec<ProductionNode> = nodes.into_values().collect();
    result.sort_by(|a, b| a.item.cmp(&b.item));
    debug!(demands = demands.len(), items = result.len(), "propagated production rates");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> RecipeCatalog {
        RecipeCatalog::from_json_str(
            r#"{
                "iron-gear-wheel": {"type": "recipe", "name": "iron-gear-wheel",
                    "ingredients": [["iron-plate", 2]], "result": "iron-gear-wheel"},
                "iron-plate": {"type": "recipe", "name": "iron-plate", "category": "smelting",
                    "energy_required": 3.5, "ingredients": [["iron-ore", 1]], "result": "iron-plate"},
                "pipe": {"type": "recipe", "name": "pipe",
                    "ingredients": [["iron-plate", 1]], "result": "pipe"},
                "engine-unit": {"type": "recipe", "name": "engine-unit", "energy_required": 10,
                    "ingredients": [["iron-gear-wheel", 1], ["pipe", 2], ["steel-plate", 1]],
                    "result": "engine-unit"},
                "lubricant": {"type": "recipe", "name": "lubricant", "category": "chemistry",
                    "ingredients": [{"type": "fluid", "name": "heavy-oil", "amount": 10}],
                    "results": [{"type": "fluid", "name": "lubricant", "amount": 10}]},
                "heavy-oil": {"type": "recipe", "name": "heavy-oil",
                    "ingredients": [["crude-oil", 1]], "result": "heavy-oil"}
            }"#,
        )
        .unwrap()
    }

    fn node<'a>(nodes: &'a [ProductionNode], item: &str) -> &'a ProductionNode {
        nodes.iter().find(|n| n.item == item).unwrap()
    }

    #[test]
    fn base_material_is_a_single_leaf() {
        let nodes =
            calculate_required_production_rates(&catalog(), &[Demand::new("iron-ore", 5.0)])
                .unwrap();
        assert_eq!(
            nodes,
            vec![ProductionNode {
                item: "iron-ore".to_string(),
                suppliers: BTreeMap::new(),
                consumers: BTreeMap::from([(Consumer::Requested, 5.0)]),
            }]
        );
    }

    #[test]
    fn unknown_item_is_a_leaf() {
        let nodes = calculate_required_production_rates(
            &catalog(),
            &[Demand::new("unobtainium", 3.0)],
        )
        .unwrap();
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].suppliers.is_empty());
        assert_eq!(nodes[0].required_rate(), 3.0);
    }

    #[test]
    fn shared_ingredients_accumulate() {
        let nodes = calculate_required_production_rates(
            &catalog(),
            &[Demand::new("engine-unit", 1.0)],
        )
        .unwrap();
        let items: Vec<&str> = nodes.iter().map(|n| n.item.as_str()).collect();
        assert_eq!(
            items,
            vec![
                "engine-unit",
                "iron-gear-wheel",
                "iron-ore",
                "iron-plate",
                "pipe",
                "steel-plate"
            ]
        );

        let plate = node(&nodes, "iron-plate");
        assert_eq!(
            plate.consumers,
            BTreeMap::from([
                (Consumer::Item("iron-gear-wheel".to_string()), 2.0),
                (Consumer::Item("pipe".to_string()), 2.0),
            ])
        );
        assert_eq!(plate.required_rate(), 4.0);
        assert_eq!(node(&nodes, "iron-ore").required_rate(), 4.0);
    }

    #[test]
    fn requested_and_consumed_item_accumulates_both() {
        let nodes = calculate_required_production_rates(
            &catalog(),
            &[Demand::new("pipe", 3.0), Demand::new("iron-plate", 1.5)],
        )
        .unwrap();
        let plate = node(&nodes, "iron-plate");
        assert!(plate.is_requested());
        assert_eq!(plate.consumers[&Consumer::Requested], 1.5);
        assert_eq!(plate.consumers[&Consumer::Item("pipe".to_string())], 3.0);
        assert_eq!(node(&nodes, "iron-ore").required_rate(), 4.5);
    }

    #[test]
    fn repeated_demands_add_up() {
        let nodes = calculate_required_production_rates(
            &catalog(),
            &[Demand::new("pipe", 1.0), Demand::new("pipe", 2.0)],
        )
        .unwrap();
        assert_eq!(node(&nodes, "pipe").consumers[&Consumer::Requested], 3.0);
        assert_eq!(node(&nodes, "pipe").suppliers["iron-plate"], 3.0);
    }

    #[test]
    fn refined_fluids_stop_expansion() {
        let nodes = calculate_required_production_rates(
            &catalog(),
            &[Demand::new("lubricant", 20.0)],
        )
        .unwrap();
        let items: Vec<&str> = nodes.iter().map(|n| n.item.as_str()).collect();
        assert_eq!(items, vec!["heavy-oil", "lubricant"]);
        assert!(node(&nodes, "heavy-oil").suppliers.is_empty());
        assert_eq!(node(&nodes, "heavy-oil").required_rate(), 20.0);
    }

    #[test]
    fn cycles_are_detected() {
        let catalog = RecipeCatalog::from_json_str(
            r#"{
                "a": {"type": "recipe", "name": "a", "ingredients": [["b", 1]], "result": "a"},
                "b": {"type": "recipe", "name": "b", "ingredients": [["a", 1]], "result": "b"}
            }"#,
        )
        .unwrap();
        assert_eq!(
            calculate_required_production_rates(&catalog, &[Demand::new("a", 1.0)]),
            Err(PlanError::CycleDetected {
                item: "a".to_string()
            })
        );
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        // pipe and iron-gear-wheel both expand iron-plate, one after the other
        let nodes = calculate_required_production_rates(
            &catalog(),
            &[Demand::new("engine-unit", 2.0)],
        )
        .unwrap();
        assert_eq!(node(&nodes, "iron-plate").required_rate(), 8.0);
    }
}
