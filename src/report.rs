//! Display-ready production reports

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::icons::IconIndex;
use crate::names::NameTable;
use crate::plan::{ProducedItem, ProductionPlan};

const WIKI_URL: &str = "http://www.factorioforums.com/wiki/index.php?title=";

/// Wiki page for an English item or recipe name, e.g. `Iron gear wheel`.
pub fn wiki_url(display_name: &str) -> String {
    format!("{}{}", WIKI_URL, display_name.replace(' ', "_"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineReport {
    pub name: String,
    pub display_name: String,
    pub icon: String,
    pub url: String,
    pub count: u64,
}

/// One produced item, with names, icons and links resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub name: String,
    pub display_name: String,
    pub icon: String,
    pub url: String,
    pub is_user_requested: bool,
    pub required_production_rate: f64,
    /// Absent for base materials and for recipes no machine can make
    pub machine: Option<MachineReport>,
    pub suppliers: BTreeMap<String, f64>,
    /// Rates demanded by other items; direct requests are in `requested_rate`
    pub consumers: BTreeMap<String, f64>,
    pub requested_rate: Option<f64>,
}

impl ItemReport {
    pub fn new(
        item: &ProducedItem<'_>,
        plan: &ProductionPlan<'_>,
        names: &NameTable,
        icons: &IconIndex,
    ) -> Self {
        let display_name = match item.recipe() {
            Some(recipe) => names.best_recipe_name(&recipe.name),
            None => names.best_recipe_name(&item.name),
        }
        .to_string();

        let machine = item.machines().map(|machines| {
            let name = machines.producer.name.clone();
            let display_name = names.best_item_name(&name).to_string();
            MachineReport {
                icon: icons.icon_for(&name).to_string(),
                url: wiki_url(&display_name),
                display_name,
                name,
                count: machines.count,
            }
        });

        let suppliers = item
            .suppliers
            .iter()
            .map(|(id, rate)| (plan.get(*id).name.clone(), *rate))
            .collect();
        let consumers = item
            .consumers
            .iter()
            .filter_map(|(id, rate)| id.map(|id| (plan.get(id).name.clone(), *rate)))
            .collect();

        Self {
            name: item.name.clone(),
            icon: icons.icon_for(&item.name).to_string(),
            url: wiki_url(&display_name),
            display_name,
            is_user_requested: item.is_user_requested(),
            required_production_rate: item.required_production_rate(),
            machine,
            suppliers,
            consumers,
            requested_rate: item.consumers.get(&None).copied(),
        }
    }
}

/// Ordered items for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionReport {
    pub items: Vec<ItemReport>,
}

impl ProductionReport {
    pub fn item(&self, name: &str) -> Option<&ItemReport> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn summarize(&self) -> ReportSummary {
        let mut machines: BTreeMap<String, u64> = BTreeMap::new();
        let mut base_materials = Vec::new();

        for item in &self.items {
            match &item.machine {
                Some(machine) => {
                    *machines.entry(machine.display_name.clone()).or_default() += machine.count;
                }
                None if item.suppliers.is_empty() => {
                    base_materials.push((item.display_name.clone(), item.required_production_rate));
                }
                None => {}
            }
        }
        base_materials.sort_by(|a, b| a.0.cmp(&b.0));

        ReportSummary {
            machines: machines.into_iter().collect(),
            base_materials,
        }
    }

    /// Items with their supplier and consumer rates, one line each.
    pub fn format_tree(&self) -> String {
        let mut output = String::new();
        for item in &self.items {
            output.push_str(&format!(
                "{} @ {:.3}/s\n",
                item.display_name, item.required_production_rate
            ));
            if let Some(rate) = item.requested_rate {
                output.push_str(&format!("  requested @ {:.3}/s\n", rate));
            }
            for (consumer, rate) in &item.consumers {
                output.push_str(&format!("  used by {} @ {:.3}/s\n", consumer, rate));
            }
            for (supplier, rate) in &item.suppliers {
                output.push_str(&format!("  needs {} @ {:.3}/s\n", supplier, rate));
            }
        }
        output
    }
}

impl fmt::Display for ProductionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<32} {:>12} {:>9}  {}",
            "Item", "Rate (/s)", "Machines", "Machine"
        )?;
        writeln!(f, "{}", "-".repeat(80))?;
        for item in &self.items {
            let marker = if item.is_user_requested { "*" } else { " " };
            match &item.machine {
                Some(machine) => writeln!(
                    f,
                    "{}{:<31} {:>12.3} {:>9}  {}",
                    marker,
                    item.display_name,
                    item.required_production_rate,
                    machine.count,
                    machine.display_name
                )?,
                None => writeln!(
                    f,
                    "{}{:<31} {:>12.3} {:>9}  -",
                    marker, item.display_name, item.required_production_rate, "-"
                )?,
            }
        }
        Ok(())
    }
}

/// Machine totals and base material rates of a report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub machines: Vec<(String, u64)>,
    pub base_materials: Vec<(String, f64)>,
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Production Summary ===")?;
        writeln!(f, "Machines required:")?;
        for (name, count) in &self.machines {
            writeln!(f, "  {}x {}", count, name)?;
        }
        writeln!(f)?;
        writeln!(f, "Base materials:")?;
        for (name, rate) in &self.base_materials {
            writeln!(f, "  {} @ {:.3}/s", name, rate)?;
        }
        Ok(())
    }
}
