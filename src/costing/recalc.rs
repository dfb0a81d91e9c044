use rust_decimal::Decimal;

use super::component::ComponentSet;

/// Re-derives every non-manual component's total consumption after an
/// order-quantity change: `total = base * total_quantity`.
///
/// Manual components are skipped entirely; their total stays exactly what
/// the user entered, no matter how often the quantity changes. Components
/// without a base (hardware, incomplete geometry) are left blank.
pub fn recalculate(set: &mut ComponentSet, total_quantity: Decimal) {
    for draft in set.iter_mut() {
        if draft.is_manual {
            continue;
        }
        draft.total_consumption = draft.base_consumption.map(|base| base * total_quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::component::{ComponentDraft, ComponentKind, ComponentType};
    use crate::costing::formula::ConsumptionFormula;
    use rust_decimal_macros::dec;

    fn draft(base: Option<Decimal>, total: Option<Decimal>, manual: bool) -> ComponentDraft {
        ComponentDraft {
            kind: ComponentKind::Standard {
                component_type: ComponentType::Part,
            },
            length: None,
            width: None,
            roll_width: None,
            formula: ConsumptionFormula::Standard,
            material_id: None,
            material_rate: Decimal::ZERO,
            base_consumption: base,
            total_consumption: total,
            is_manual: manual,
        }
    }

    #[test]
    fn non_manual_components_scale_with_quantity() {
        let mut set = ComponentSet::default();
        set.standard
            .insert(ComponentType::Part, draft(Some(dec!(100)), None, false));

        recalculate(&mut set, dec!(6));
        assert_eq!(
            set.standard[&ComponentType::Part].total_consumption,
            Some(dec!(600))
        );
    }

    #[test]
    fn manual_components_are_never_touched() {
        let mut set = ComponentSet::default();
        set.custom
            .push(draft(Some(dec!(100)), Some(dec!(600)), true));

        recalculate(&mut set, dec!(1));
        recalculate(&mut set, dec!(6));
        recalculate(&mut set, dec!(42));
        assert_eq!(set.custom[0].total_consumption, Some(dec!(600)));
    }

    #[test]
    fn components_without_base_stay_blank() {
        let mut set = ComponentSet::default();
        set.standard
            .insert(ComponentType::Chain, draft(None, None, false));

        recalculate(&mut set, dec!(10));
        assert_eq!(set.standard[&ComponentType::Chain].total_consumption, None);
    }
}
