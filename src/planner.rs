//! Entry point tying the catalog, machines, names and icons together

use tracing::info;

use crate::calculator::calculate_required_production_rates;
use crate::catalog::RecipeCatalog;
use crate::error::PlanError;
use crate::icons::IconIndex;
use crate::models::Demand;
use crate::names::NameTable;
use crate::plan::{Orientation, ProductionPlan};
use crate::production::ProducerTable;
use crate::report::{ItemReport, ProductionReport};

/// An item offered for selection, with its English name.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectableItem {
    pub name: String,
    pub display_name: String,
}

/// A requested item with its English name and rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedItem {
    pub name: String,
    pub display_name: String,
    pub rate: f64,
}

/// Read-only game data, loaded once and shared by every request.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    pub catalog: RecipeCatalog,
    pub producers: ProducerTable,
    pub names: NameTable,
    pub icons: IconIndex,
}

impl Planner {
    pub fn new(catalog: RecipeCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn with_names(mut self, names: NameTable) -> Self {
        self.names = names;
        self
    }

    pub fn with_icons(mut self, icons: IconIndex) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_producers(mut self, producers: ProducerTable) -> Self {
        self.producers = producers;
        self
    }

    /// Everything needed to produce `demands`, requested items first.
    pub fn plan(&self, demands: &[Demand]) -> Result<ProductionReport, PlanError> {
        self.plan_oriented(demands, Orientation::RequestedFirst)
    }

    pub fn plan_oriented(
        &self,
        demands: &[Demand],
        orientation: Orientation,
    ) -> Result<ProductionReport, PlanError> {
        let nodes = calculate_required_production_rates(&self.catalog, demands)?;
        let plan = ProductionPlan::build(&nodes, &self.catalog, &self.producers);
        let items = plan
            .ordered(orientation)?
            .into_iter()
            .map(|item| ItemReport::new(item, &plan, &self.names, &self.icons))
            .collect();
        info!(demands = demands.len(), items = plan.len(), "planned production");
        Ok(ProductionReport { items })
    }

    /// Items with a usable recipe, sorted by English name.
    pub fn producible_items(&self) -> Vec<SelectableItem> {
        let mut items: Vec<SelectableItem> = self
            .catalog
            .all_producible_items()
            .into_iter()
            .map(|name| SelectableItem {
                name: name.to_string(),
                display_name: self.names.best_item_name(name).to_string(),
            })
            .collect();
        items.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        items
    }

    /// The requested items, sorted by English name.
    pub fn selected_items(&self, demands: &[Demand]) -> Vec<SelectedItem> {
        let mut items: Vec<SelectedItem> = demands
            .iter()
            .map(|demand| SelectedItem {
                name: demand.item.clone(),
                display_name: self.names.best_item_name(&demand.item).to_string(),
                rate: demand.rate,
            })
            .collect();
        items.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        items
    }
}
