//! End-to-end tests of the cost and consumption engine: template intake,
//! quantity recalculation and roll-up working together.

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use bagworks_api::costing::{
    build_component_set, evaluate, recalculate, roll_up, ChargeRates, ComponentDefinition,
    ComponentType, ConsumptionFormula, MaterialAttributes, TransportPolicy, INCH_TO_YARD_FACTOR,
};

fn material(rate: Decimal, roll_width: Option<Decimal>) -> (Uuid, MaterialAttributes) {
    let id = Uuid::new_v4();
    (
        id,
        MaterialAttributes {
            id,
            name: "non-woven 90gsm white".to_string(),
            purchase_rate: rate,
            roll_width,
        },
    )
}

/// A 3-pack template carrying a total consumption of 300 yields a per-unit
/// base of 100. An order of 4 packs produces 12 units, so the scaled
/// consumption is 1200 and at 2.5 per yard the material cost is 3000.
#[test]
fn template_intake_scales_through_the_whole_pipeline() {
    let (material_id, attrs) = material(dec!(2.5), Some(dec!(40)));
    let materials = HashMap::from([(material_id, attrs)]);

    let definitions = vec![ComponentDefinition {
        type_tag: "part".to_string(),
        consumption: Some(dec!(300)),
        material_id: Some(material_id),
        ..Default::default()
    }];

    let mut set = build_component_set(&definitions, 3, &materials);
    let part = &set.standard[&ComponentType::Part];
    assert_eq!(part.base_consumption, Some(dec!(100)));

    recalculate(&mut set, dec!(12));
    let part = &set.standard[&ComponentType::Part];
    assert_eq!(part.total_consumption, Some(dec!(1200)));
    assert_eq!(part.material_cost(), dec!(3000));

    let rates = ChargeRates {
        margin_percent: dec!(15),
        ..Default::default()
    };
    let summary = roll_up(&set, &rates, dec!(4), TransportPolicy::FlatPerOrder);
    assert_eq!(summary.material_cost, dec!(3000));
    assert_eq!(summary.total_cost, dec!(3000));
    assert_eq!(summary.per_unit_cost, dec!(750));
    assert_eq!(summary.selling_price, dec!(3450));
}

#[test]
fn manual_components_survive_repeated_quantity_changes() {
    let definitions = vec![ComponentDefinition {
        type_tag: "handle".to_string(),
        consumption: Some(dec!(600)),
        is_manual: true,
        ..Default::default()
    }];

    let mut set = build_component_set(&definitions, 3, &HashMap::new());

    for quantity in [dec!(1), dec!(6), dec!(42), dec!(6)] {
        recalculate(&mut set, quantity);
        assert_eq!(
            set.standard[&ComponentType::Handle].total_consumption,
            Some(dec!(600))
        );
    }
}

#[test]
fn hardware_components_never_contribute_consumption() {
    let (material_id, attrs) = material(dec!(9.99), Some(dec!(44)));
    let materials = HashMap::from([(material_id, attrs)]);

    let definitions = vec![
        ComponentDefinition {
            type_tag: "chain".to_string(),
            length: Some(dec!(10)),
            width: Some(dec!(10)),
            consumption: Some(dec!(100)),
            material_id: Some(material_id),
            ..Default::default()
        },
        ComponentDefinition {
            type_tag: "runner".to_string(),
            length: Some(dec!(10)),
            material_id: Some(material_id),
            ..Default::default()
        },
    ];

    let mut set = build_component_set(&definitions, 1, &materials);
    recalculate(&mut set, dec!(500));

    for draft in set.iter() {
        assert_eq!(draft.total_consumption, None);
        assert_eq!(draft.material_cost(), Decimal::ZERO);
    }
}

#[test]
fn geometry_driven_component_matches_the_formula() {
    let (material_id, attrs) = material(dec!(3), None);
    let materials = HashMap::from([(material_id, attrs)]);

    let definitions = vec![ComponentDefinition {
        type_tag: "border".to_string(),
        length: Some(dec!(24)),
        width: Some(dec!(18)),
        roll_width: Some(dec!(36)),
        material_id: Some(material_id),
        ..Default::default()
    }];

    let set = build_component_set(&definitions, 1, &materials);
    let expected = evaluate(
        ConsumptionFormula::Standard,
        Some(dec!(24)),
        Some(dec!(18)),
        Some(dec!(36)),
    );
    assert_eq!(set.standard[&ComponentType::Border].base_consumption, expected);
    assert!(expected.is_some());
}

#[test]
fn linear_formula_ignores_width_and_roll_width() {
    let with_extras = evaluate(
        ConsumptionFormula::Linear,
        Some(dec!(78.78)),
        Some(dec!(999)),
        Some(dec!(0)),
    );
    let bare = evaluate(ConsumptionFormula::Linear, Some(dec!(78.78)), None, None);
    assert_eq!(with_extras, bare);
    assert_eq!(bare, Some(dec!(78.78) / INCH_TO_YARD_FACTOR));
}

#[test]
fn zero_roll_width_leaves_consumption_blank_through_the_builder() {
    let definitions = vec![ComponentDefinition {
        type_tag: "part".to_string(),
        length: Some(dec!(20)),
        width: Some(dec!(30)),
        roll_width: Some(Decimal::ZERO),
        ..Default::default()
    }];

    let mut set = build_component_set(&definitions, 1, &HashMap::new());
    recalculate(&mut set, dec!(10));
    assert_eq!(set.standard[&ComponentType::Part].total_consumption, None);
}

proptest! {
    /// Every roll-up figure is non-negative, whatever the inputs.
    #[test]
    fn roll_up_never_goes_negative(
        consumption in 0i64..1_000_000,
        rate in -1_000i64..1_000,
        cutting in -100i64..100,
        quantity in -10i64..10_000,
        margin in -50i64..200,
    ) {
        let definitions = vec![ComponentDefinition {
            type_tag: "part".to_string(),
            consumption: Some(Decimal::from(consumption)),
            ..Default::default()
        }];
        let mut set = build_component_set(&definitions, 1, &HashMap::new());
        for draft in set.iter_mut() {
            draft.material_rate = Decimal::from(rate);
        }
        recalculate(&mut set, Decimal::from(quantity.max(0)));

        let rates = ChargeRates {
            cutting_rate: Decimal::from(cutting),
            margin_percent: Decimal::from(margin),
            ..Default::default()
        };
        let summary = roll_up(&set, &rates, Decimal::from(quantity), TransportPolicy::FlatPerOrder);

        prop_assert!(summary.material_cost >= Decimal::ZERO);
        prop_assert!(summary.cutting_charge >= Decimal::ZERO);
        prop_assert!(summary.total_cost >= Decimal::ZERO);
        prop_assert!(summary.per_unit_cost >= Decimal::ZERO);
    }

    /// Recalculating twice at the same quantity changes nothing.
    #[test]
    fn recalculate_is_idempotent(
        base in 0i64..100_000,
        quantity in 0i64..10_000,
    ) {
        let definitions = vec![ComponentDefinition {
            type_tag: "part".to_string(),
            consumption: Some(Decimal::from(base)),
            ..Default::default()
        }];
        let mut set = build_component_set(&definitions, 1, &HashMap::new());

        recalculate(&mut set, Decimal::from(quantity));
        let first = set.clone();
        recalculate(&mut set, Decimal::from(quantity));
        prop_assert_eq!(first, set);
    }

    /// A manual total is invariant under any sequence of quantity changes.
    #[test]
    fn manual_totals_are_invariant(
        manual_total in 0i64..100_000,
        quantities in proptest::collection::vec(0i64..10_000, 1..8),
    ) {
        let definitions = vec![ComponentDefinition {
            type_tag: "piping".to_string(),
            consumption: Some(Decimal::from(manual_total)),
            is_manual: true,
            ..Default::default()
        }];
        let mut set = build_component_set(&definitions, 1, &HashMap::new());

        for quantity in quantities {
            recalculate(&mut set, Decimal::from(quantity));
            prop_assert_eq!(
                set.standard[&ComponentType::Piping].total_consumption,
                Some(Decimal::from(manual_total))
            );
        }
    }
}
