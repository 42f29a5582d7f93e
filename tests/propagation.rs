//! Production rate propagation against exported recipe data.

use std::collections::BTreeMap;

use factorio_calculator::{
    Consumer, Demand, ProductionNode, RecipeCatalog, calculate_required_production_rates,
};

fn catalog() -> RecipeCatalog {
    factorio_calculator::logging::init_test();
    RecipeCatalog::from_json_str(include_str!("fixtures/recipes.json")).unwrap()
}

fn node(item: &str, suppliers: &[(&str, f64)], consumers: &[(Option<&str>, f64)]) -> ProductionNode {
    ProductionNode {
        item: item.to_string(),
        suppliers: suppliers
            .iter()
            .map(|(name, rate)| (name.to_string(), *rate))
            .collect(),
        consumers: consumers
            .iter()
            .map(|(name, rate)| match name {
                Some(name) => (Consumer::Item(name.to_string()), *rate),
                None => (Consumer::Requested, *rate),
            })
            .collect::<BTreeMap<_, _>>(),
    }
}

fn rates(demands: &[(&str, f64)]) -> Vec<ProductionNode> {
    let demands: Vec<Demand> = demands
        .iter()
        .map(|(item, rate)| Demand::new(*item, *rate))
        .collect();
    calculate_required_production_rates(&catalog(), &demands).unwrap()
}

#[test]
fn base_material() {
    assert_eq!(
        rates(&[("copper-ore", 5.0)]),
        vec![node("copper-ore", &[], &[(None, 5.0)])]
    );
}

#[test]
fn smelting() {
    assert_eq!(
        rates(&[("copper-plate", 5.0)]),
        vec![
            node("copper-ore", &[], &[(Some("copper-plate"), 5.0)]),
            node("copper-plate", &[("copper-ore", 5.0)], &[(None, 5.0)]),
        ]
    );
}

#[test]
fn electronic_circuit() {
    assert_eq!(
        rates(&[("electronic-circuit", 2.0)]),
        vec![
            node(
                "copper-cable",
                &[("copper-plate", 3.0)],
                &[(Some("electronic-circuit"), 6.0)]
            ),
            node("copper-ore", &[], &[(Some("copper-plate"), 3.0)]),
            node(
                "copper-plate",
                &[("copper-ore", 3.0)],
                &[(Some("copper-cable"), 3.0)]
            ),
            node(
                "electronic-circuit",
                &[("copper-cable", 6.0), ("iron-plate", 2.0)],
                &[(None, 2.0)]
            ),
            node("iron-ore", &[], &[(Some("iron-plate"), 2.0)]),
            node(
                "iron-plate",
                &[("iron-ore", 2.0)],
                &[(Some("electronic-circuit"), 2.0)]
            ),
        ]
    );
}

#[test]
fn overlapping_dependencies() {
    // iron-plate is used by basic-inserter, electronic-circuit and iron-gear-wheel
    assert_eq!(
        rates(&[("basic-inserter", 5.0)]),
        vec![
            node(
                "basic-inserter",
                &[
                    ("electronic-circuit", 5.0),
                    ("iron-gear-wheel", 5.0),
                    ("iron-plate", 5.0)
                ],
                &[(None, 5.0)]
            ),
            node(
                "copper-cable",
                &[("copper-plate", 7.5)],
                &[(Some("electronic-circuit"), 15.0)]
            ),
            node("copper-ore", &[], &[(Some("copper-plate"), 7.5)]),
            node(
                "copper-plate",
                &[("copper-ore", 7.5)],
                &[(Some("copper-cable"), 7.5)]
            ),
            node(
                "electronic-circuit",
                &[("copper-cable", 15.0), ("iron-plate", 5.0)],
                &[(Some("basic-inserter"), 5.0)]
            ),
            node(
                "iron-gear-wheel",
                &[("iron-plate", 10.0)],
                &[(Some("basic-inserter"), 5.0)]
            ),
            node("iron-ore", &[], &[(Some("iron-plate"), 20.0)]),
            node(
                "iron-plate",
                &[("iron-ore", 20.0)],
                &[
                    (Some("basic-inserter"), 5.0),
                    (Some("electronic-circuit"), 5.0),
                    (Some("iron-gear-wheel"), 10.0)
                ]
            ),
        ]
    );
}

#[test]
fn complex_chain() {
    assert_eq!(
        rates(&[("destroyer-capsule", 1.0)]),
        vec![
            node(
                "advanced-circuit",
                &[
                    ("copper-cable", 68.0),
                    ("electronic-circuit", 34.0),
                    ("plastic-bar", 34.0)
                ],
                &[(Some("distractor-capsule"), 12.0), (Some("speed-module"), 5.0)]
            ),
            node("coal", &[], &[(Some("plastic-bar"), 17.0)]),
            node(
                "copper-cable",
                &[("copper-plate", 140.5)],
                &[
                    (Some("advanced-circuit"), 68.0),
                    (Some("electronic-circuit"), 213.0)
                ]
            ),
            node("copper-ore", &[], &[(Some("copper-plate"), 220.5)]),
            node(
                "copper-plate",
                &[("copper-ore", 220.5)],
                &[
                    (Some("copper-cable"), 140.5),
                    (Some("piercing-bullet-magazine"), 80.0)
                ]
            ),
            node(
                "defender-capsule",
                &[
                    ("electronic-circuit", 32.0),
                    ("iron-gear-wheel", 48.0),
                    ("piercing-bullet-magazine", 16.0)
                ],
                &[(Some("distractor-capsule"), 16.0)]
            ),
            node(
                "destroyer-capsule",
                &[("distractor-capsule", 4.0), ("speed-module", 1.0)],
                &[(None, 1.0)]
            ),
            node(
                "distractor-capsule",
                &[("advanced-circuit", 12.0), ("defender-capsule", 16.0)],
                &[(Some("destroyer-capsule"), 4.0)]
            ),
            node(
                "electronic-circuit",
                &[("copper-cable", 213.0), ("iron-plate", 71.0)],
                &[
                    (Some("advanced-circuit"), 34.0),
                    (Some("defender-capsule"), 32.0),
                    (Some("speed-module"), 5.0)
                ]
            ),
            node(
                "iron-gear-wheel",
                &[("iron-plate", 96.0)],
                &[(Some("defender-capsule"), 48.0)]
            ),
            node("iron-ore", &[], &[(Some("iron-plate"), 247.0)]),
            node(
                "iron-plate",
                &[("iron-ore", 247.0)],
                &[
                    (Some("electronic-circuit"), 71.0),
                    (Some("iron-gear-wheel"), 96.0),
                    (Some("steel-plate"), 80.0)
                ]
            ),
            node("petroleum-gas", &[], &[(Some("plastic-bar"), 51.0)]),
            node(
                "piercing-bullet-magazine",
                &[("copper-plate", 80.0), ("steel-plate", 16.0)],
                &[(Some("defender-capsule"), 16.0)]
            ),
            node(
                "plastic-bar",
                &[("coal", 17.0), ("petroleum-gas", 51.0)],
                &[(Some("advanced-circuit"), 34.0)]
            ),
            node(
                "speed-module",
                &[("advanced-circuit", 5.0), ("electronic-circuit", 5.0)],
                &[(Some("destroyer-capsule"), 1.0)]
            ),
            node(
                "steel-plate",
                &[("iron-plate", 80.0)],
                &[(Some("piercing-bullet-magazine"), 16.0)]
            ),
        ]
    );
}

#[test]
fn unknown_item_is_a_leaf() {
    assert_eq!(
        rates(&[("rocket-silo", 1.0)]),
        vec![node("rocket-silo", &[], &[(None, 1.0)])]
    );
}

#[test]
fn petroleum_gas_is_never_expanded() {
    let nodes = rates(&[("sulfur", 100.0)]);
    let items: Vec<&str> = nodes.iter().map(|n| n.item.as_str()).collect();
    assert_eq!(items, vec!["petroleum-gas", "sulfur", "water"]);
    assert_eq!(nodes[0].required_rate(), 1500.0);
}

#[test]
fn repeated_calls_are_independent() {
    let catalog = catalog();
    let demands = [Demand::new("basic-inserter", 5.0)];
    let first = calculate_required_production_rates(&catalog, &demands).unwrap();
    let second = calculate_required_production_rates(&catalog, &demands).unwrap();
    assert_eq!(first, second);
}
