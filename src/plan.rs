//! Produced items linked into a supplier/consumer graph, and their
//! presentation order

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::calculator::{Consumer, ProductionNode, producing_recipe};
use crate::catalog::RecipeCatalog;
use crate::error::PlanError;
use crate::machines::{MachineRequirement, machines_required};
use crate::models::Recipe;
use crate::production::ProducerTable;

/// Index of an item in a [`ProductionPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(usize);

#[derive(Debug, Clone, PartialEq)]
pub enum ProductKind<'c> {
    /// Mined, pumped, refined or otherwise not crafted here
    BaseMaterial,
    Recipe {
        recipe: &'c Recipe,
        /// `None` when no machine services the recipe's category
        machines: Option<MachineRequirement<'c>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProducedItem<'c> {
    pub id: ItemId,
    pub name: String,
    pub kind: ProductKind<'c>,
    /// Ingredient -> rate this item consumes it at
    pub suppliers: BTreeMap<ItemId, f64>,
    /// Consumer (`None` for a direct request) -> rate it demands
    pub consumers: BTreeMap<Option<ItemId>, f64>,
}

impl<'c> ProducedItem<'c> {
    pub fn is_user_requested(&self) -> bool {
        self.consumers.contains_key(&None)
    }

    pub fn required_production_rate(&self) -> f64 {
        self.consumers.values().sum()
    }

    pub fn recipe(&self) -> Option<&'c Recipe> {
        match self.kind {
            ProductKind::BaseMaterial => None,
            ProductKind::Recipe { recipe, .. } => Some(recipe),
        }
    }

    pub fn machines(&self) -> Option<&MachineRequirement<'c>> {
        match &self.kind {
            ProductKind::BaseMaterial => None,
            ProductKind::Recipe { machines, .. } => machines.as_ref(),
        }
    }
}

/// Which end of the graph comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Requested items first, base materials last
    #[default]
    RequestedFirst,
    /// Base materials first, requested items last
    LeavesFirst,
}

/// Arena of produced items; edges refer to items by [`ItemId`].
#[derive(Debug, Clone, Default)]
pub struct ProductionPlan<'c> {
    items: Vec<ProducedItem<'c>>,
    by_name: HashMap<String, ItemId>,
}

impl<'c> ProductionPlan<'c> {
    /// Link propagated nodes into items and size the machines for each.
    pub fn build(
        nodes: &[ProductionNode],
        catalog: &'c RecipeCatalog,
        producers: &'c ProducerTable,
    ) -> Self {
        let mut plan = ProductionPlan::default();
        for node in nodes {
            plan.intern(&node.item, catalog);
        }

        for node in nodes {
            let suppliers: BTreeMap<ItemId, f64> = node
                .suppliers
                .iter()
                .map(|(name, rate)| (plan.intern(name, catalog), *rate))
                .collect();
            let consumers: BTreeMap<Option<ItemId>, f64> = node
                .consumers
                .iter()
                .map(|(consumer, rate)| match consumer {
                    Consumer::Requested => (None, *rate),
                    Consumer::Item(name) => (Some(plan.intern(name, catalog)), *rate),
                })
                .collect();

            let id = plan.by_name[&node.item];
            let item = &mut plan.items[id.0];
            item.suppliers.extend(suppliers);
            item.consumers.extend(consumers);
        }

        for item in &mut plan.items {
            let rate = item.required_production_rate();
            if let ProductKind::Recipe { recipe, machines } = &mut item.kind {
                *machines = machines_required(recipe, rate, producers);
            }
        }
        plan
    }

    fn intern(&mut self, name: &str, catalog: &'c RecipeCatalog) -> ItemId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = ItemId(self.items.len());
        let kind = match producing_recipe(catalog, name) {
            Some(recipe) => ProductKind::Recipe {
                recipe,
                machines: None,
            },
            None => ProductKind::BaseMaterial,
        };
        self.items.push(ProducedItem {
            id,
            name: name.to_string(),
            kind,
            suppliers: BTreeMap::new(),
            consumers: BTreeMap::new(),
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn get(&self, id: ItemId) -> &ProducedItem<'c> {
        &self.items[id.0]
    }

    pub fn find(&self, name: &str) -> Option<&ProducedItem<'c>> {
        self.by_name.get(name).map(|id| self.get(*id))
    }

    pub fn items(&self) -> &[ProducedItem<'c>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Order items so every item sits on the far side of its suppliers.
    ///
    /// Items are placed layer by layer starting from base materials: each
    /// layer holds every unplaced item whose suppliers are all placed,
    /// sorted by descending name. [`Orientation::RequestedFirst`] reverses
    /// the whole sequence, leaving names ascending within each layer.
    pub fn ordered(&self, orientation: Orientation) -> Result<Vec<&ProducedItem<'c>>, PlanError> {
        let mut placed = vec![false; self.items.len()];
        let mut remaining: Vec<ItemId> = self.items.iter().map(|item| item.id).collect();
        let mut order: Vec<ItemId> = Vec::with_capacity(self.items.len());

        while !remaining.is_empty() {
            let (mut layer, rest): (Vec<ItemId>, Vec<ItemId>) = remaining
                .into_iter()
                .partition(|id| self.get(*id).suppliers.keys().all(|s| placed[s.0]));

            if layer.is_empty() {
                let mut items: Vec<String> =
                    rest.iter().map(|id| self.get(*id).name.clone()).collect();
                items.sort();
                warn!(?items, "supplier cycle, cannot order items");
                return Err(PlanError::Unorderable { items });
            }

            layer.sort_by(|a, b| self.get(*b).name.cmp(&self.get(*a).name));
            for id in &layer {
                placed[id.0] = true;
            }
            order.extend(layer);
            remaining = rest;
        }

        if orientation == Orientation::RequestedFirst {
            order.reverse();
        }
        Ok(order.into_iter().map(|id| self.get(id)).collect())
    }
}
