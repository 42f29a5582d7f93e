//! Number of production machines needed for a required rate

use crate::models::{Producer, Recipe};
use crate::production::ProducerTable;

/// How many of which machine keep up with a required rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineRequirement<'c> {
    pub producer: &'c Producer,
    pub count: u64,
}

/// Machines needed to make `required_rate` items per unit of time with
/// `recipe`, using the fastest machine for its crafting category.
///
/// A machine finishes `count_produced * crafting_speed / crafting_time`
/// items per unit of time, so
/// `machines = ceil(rate * crafting_time / count_produced / crafting_speed)`.
///
/// `None` if no machine services the recipe's category.
pub fn machines_required<'c>(
    recipe: &Recipe,
    required_rate: f64,
    producers: &'c ProducerTable,
) -> Option<MachineRequirement<'c>> {
    let producer = producers.most_efficient(&recipe.category).ok()?;
    let machines = required_rate * recipe.crafting_time
        / f64::from(recipe.count_produced)
        / producer.crafting_speed;
    Some(MachineRequirement {
        producer,
        count: machines.ceil() as u64,
    })
}
