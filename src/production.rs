//! Production machines and their crafting speeds
//!
//! Crafting speeds come from the game's entity prototypes
//! (`base/prototypes/entity/entities.lua`).

use tracing::debug;

use crate::error::LookupError;
use crate::models::Producer;

/// Fixed table of production machines.
#[derive(Debug, Clone)]
pub struct ProducerTable {
    producers: Vec<Producer>,
}

impl ProducerTable {
    pub fn new(producers: Vec<Producer>) -> Self {
        Self { producers }
    }

    /// The best machine of each kind available in the base game.
    pub fn standard() -> Self {
        Self::new(vec![
            Producer::new("electric-furnace", &["smelting"], 2.0),
            Producer::new(
                "assembling-machine-3",
                &["crafting", "advanced-crafting", "crafting-with-fluid"],
                1.25,
            ),
            Producer::new("chemical-plant", &["chemistry"], 1.25),
        ])
    }

    /// The fastest producer servicing `category`. On equal speeds the first
    /// registered producer wins.
    pub fn most_efficient(&self, category: &str) -> Result<&Producer, LookupError> {
        let mut best: Option<&Producer> = None;
        for producer in self.producers.iter().filter(|p| p.services(category)) {
            match best {
                Some(current) if current.crafting_speed >= producer.crafting_speed => {}
                _ => best = Some(producer),
            }
        }

        best.ok_or_else(|| {
            debug!(category, "no producer for crafting category");
            LookupError::NoProducer {
                category: category.to_string(),
            }
        })
    }

    pub fn producers(&self) -> &[Producer] {
        &self.producers
    }
}

impl Default for ProducerTable {
    fn default() -> Self {
        Self::standard()
    }
}
