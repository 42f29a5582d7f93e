//! Factorio Production Calculator
//!
//! Works out the machines and raw materials behind a set of production
//! targets.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use factorio_calculator::config::{DEFAULT_ICON_URL_PREFIX, DEFAULT_RECIPES, DataSources};
use factorio_calculator::logging;
use factorio_calculator::models::Demand;
use factorio_calculator::plan::Orientation;

#[derive(Parser)]
#[command(name = "factorio-calculator")]
#[command(about = "Production rate calculator for Factorio")]
struct Cli {
    /// Path to the exported recipe JSON
    #[arg(short, long, default_value = DEFAULT_RECIPES)]
    recipes: PathBuf,

    /// Path to the display name JSON
    #[arg(short, long)]
    names: Option<PathBuf>,

    /// Directory of item and machine icons
    #[arg(short, long)]
    icons: Option<PathBuf>,

    /// URL prefix under which the icon directory is served
    #[arg(long, default_value = DEFAULT_ICON_URL_PREFIX)]
    icon_url_prefix: String,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the production needed for one or more items
    Calc {
        /// Items to produce, as ITEM or ITEM=RATE (e.g. "electronic-circuit=2")
        #[arg(required = true)]
        demands: Vec<Demand>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Show supplier and consumer rates for every item
        #[arg(short, long)]
        tree: bool,

        /// List base materials first instead of requested items
        #[arg(long)]
        leaves_first: bool,
    },

    /// List all producible items
    ListItems,

    /// Show details for a specific recipe
    Recipe {
        /// Recipe name (e.g. "iron-gear-wheel")
        name: String,
    },

    /// List the production machines and their crafting speeds
    Producers,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let sources = DataSources {
        recipes: cli.recipes,
        names: cli.names,
        icons: cli.icons,
        icon_url_prefix: cli.icon_url_prefix,
    };
    let planner = sources.load()?;

    match cli.command {
        Commands::Calc {
            demands,
            json,
            tree,
            leaves_first,
        } => {
            let orientation = if leaves_first {
                Orientation::LeavesFirst
            } else {
                Orientation::RequestedFirst
            };
            let report = planner.plan_oriented(&demands, orientation)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("Requested:");
            for selected in planner.selected_items(&demands) {
                println!("  {} @ {}/s", selected.display_name, selected.rate);
            }
            println!();
            println!("{}", report);

            if tree {
                println!("Production tree:\n");
                println!("{}", report.format_tree());
            }

            println!("{}", report.summarize());
        }

        Commands::ListItems => {
            let items = planner.producible_items();
            if items.is_empty() {
                println!("No producible items. Check the recipe file.");
            } else {
                println!("{:<40} {}", "Item", "Name");
                println!("{}", "-".repeat(72));
                for item in items {
                    println!("{:<40} {}", item.display_name, item.name);
                }
            }
        }

        Commands::Recipe { name } => match planner.catalog.lookup_by_name(&name) {
            Ok(recipe) => {
                println!("Recipe: {}", planner.names.best_recipe_name(&recipe.name));
                println!("  Name: {}", recipe.name);
                println!("  Category: {}", recipe.category);
                println!("  Crafting time: {}", recipe.crafting_time);
                println!("  Result: {} x{}", recipe.result, recipe.count_produced);
                if let Some(result_type) = &recipe.result_type {
                    println!("  Result type: {}", result_type);
                }
                println!("  Crafting rate: {:.3}/s", recipe.crafting_rate());

                if !recipe.ingredients.is_empty() {
                    println!("  Ingredients:");
                    for (ingredient, amount) in &recipe.ingredients {
                        println!("    {} x{}", ingredient, amount);
                    }
                }

                match planner.producers.most_efficient(&recipe.category) {
                    Ok(producer) => println!(
                        "  Machine: {} (speed {})",
                        planner.names.best_item_name(&producer.name),
                        producer.crafting_speed
                    ),
                    Err(e) => println!("  Machine: none ({})", e),
                }
            }
            Err(e) => println!("{}", e),
        },

        Commands::Producers => {
            println!("{:<30} {:>8}  {}", "Machine", "Speed", "Categories");
            println!("{}", "-".repeat(72));
            for producer in planner.producers.producers() {
                let categories: Vec<&str> = producer
                    .crafting_categories
                    .iter()
                    .map(String::as_str)
                    .collect();
                println!(
                    "{:<30} {:>8}  {}",
                    planner.names.best_item_name(&producer.name),
                    producer.crafting_speed,
                    categories.join(", ")
                );
            }
        }
    }

    Ok(())
}
