//! Factorio production rate calculator
//!
//! Given target rates for a set of items, works out every intermediate
//! item and base material needed, the rate each must be produced at, and
//! how many machines each step needs.

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod icons;
pub mod logging;
pub mod machines;
pub mod models;
pub mod names;
pub mod plan;
pub mod planner;
pub mod production;
pub mod report;

pub use calculator::{Consumer, ProductionNode, calculate_required_production_rates};
pub use catalog::RecipeCatalog;
pub use error::{CatalogError, LookupError, PlanError};
pub use models::{Demand, Producer, Recipe};
pub use plan::{Orientation, ProductionPlan};
pub use planner::Planner;
pub use report::ProductionReport;
