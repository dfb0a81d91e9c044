use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::component::ComponentSet;

/// Whether the transport charge is billed once per order or multiplied by
/// the order quantity. The policy is explicit configuration; callers may
/// override the configured default per request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TransportPolicy {
    #[default]
    FlatPerOrder,
    ScaledByQuantity,
}

/// Per-unit charge baselines feeding the roll-up, typically sourced from a
/// catalog template, plus the caller-supplied GST amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRates {
    pub cutting_rate: Decimal,
    pub printing_rate: Decimal,
    pub stitching_rate: Decimal,
    pub transport_charge: Decimal,
    pub margin_percent: Decimal,
    pub gst_amount: Decimal,
}

/// Aggregated order cost figures. Every field is a finite, non-negative
/// decimal; unparsed or missing inputs have already been coerced to zero
/// upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CostSummary {
    pub material_cost: Decimal,
    pub cutting_charge: Decimal,
    pub printing_charge: Decimal,
    pub stitching_charge: Decimal,
    pub transport_charge: Decimal,
    pub gst_amount: Decimal,
    pub base_cost: Decimal,
    pub total_cost: Decimal,
    pub per_unit_cost: Decimal,
    pub selling_price: Decimal,
}

/// Aggregates component material costs with quantity-scaled production
/// charges, GST and margin. Pure over its inputs: identical inputs always
/// produce identical summaries.
pub fn roll_up(
    set: &ComponentSet,
    rates: &ChargeRates,
    order_quantity: Decimal,
    policy: TransportPolicy,
) -> CostSummary {
    let quantity = order_quantity.max(Decimal::ZERO);

    let material_cost: Decimal = set.iter().map(|draft| draft.material_cost()).sum();
    let material_cost = material_cost.max(Decimal::ZERO);

    let cutting_charge = (rates.cutting_rate * quantity).max(Decimal::ZERO);
    let printing_charge = (rates.printing_rate * quantity).max(Decimal::ZERO);
    let stitching_charge = (rates.stitching_rate * quantity).max(Decimal::ZERO);

    let transport_charge = match policy {
        TransportPolicy::FlatPerOrder => rates.transport_charge,
        TransportPolicy::ScaledByQuantity => rates.transport_charge * quantity,
    }
    .max(Decimal::ZERO);

    let gst_amount = rates.gst_amount.max(Decimal::ZERO);

    let base_cost = material_cost + cutting_charge + printing_charge + stitching_charge;
    let total_cost = base_cost + transport_charge + gst_amount;

    let per_unit_cost = if quantity > Decimal::ZERO {
        total_cost
            .checked_div(quantity)
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    let margin = rates.margin_percent.max(Decimal::ZERO);
    let selling_price = total_cost * (Decimal::ONE + margin / Decimal::ONE_HUNDRED);

    CostSummary {
        material_cost,
        cutting_charge,
        printing_charge,
        stitching_charge,
        transport_charge,
        gst_amount,
        base_cost,
        total_cost,
        per_unit_cost,
        selling_price,
    }
}

impl CostSummary {
    /// Read-only view of an already-finalized order: persisted figures are
    /// reported verbatim, no formula runs.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        material_cost: Decimal,
        cutting_charge: Decimal,
        printing_charge: Decimal,
        stitching_charge: Decimal,
        transport_charge: Decimal,
        gst_amount: Decimal,
        total_cost: Decimal,
        per_unit_cost: Decimal,
        selling_price: Decimal,
    ) -> Self {
        Self {
            material_cost,
            cutting_charge,
            printing_charge,
            stitching_charge,
            transport_charge,
            gst_amount,
            base_cost: material_cost + cutting_charge + printing_charge + stitching_charge,
            total_cost,
            per_unit_cost,
            selling_price,
        }
    }

    /// Currency-rounded copy for display boundaries. Internal math always
    /// carries full precision.
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            material_cost: self.material_cost.round_dp(dp),
            cutting_charge: self.cutting_charge.round_dp(dp),
            printing_charge: self.printing_charge.round_dp(dp),
            stitching_charge: self.stitching_charge.round_dp(dp),
            transport_charge: self.transport_charge.round_dp(dp),
            gst_amount: self.gst_amount.round_dp(dp),
            base_cost: self.base_cost.round_dp(dp),
            total_cost: self.total_cost.round_dp(dp),
            per_unit_cost: self.per_unit_cost.round_dp(dp),
            selling_price: self.selling_price.round_dp(dp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::component::{ComponentDraft, ComponentKind, ComponentType};
    use crate::costing::formula::ConsumptionFormula;
    use rust_decimal_macros::dec;

    fn part_with(total: Decimal, rate: Decimal) -> ComponentSet {
        let mut set = ComponentSet::default();
        set.standard.insert(
            ComponentType::Part,
            ComponentDraft {
                kind: ComponentKind::Standard {
                    component_type: ComponentType::Part,
                },
                length: None,
                width: None,
                roll_width: None,
                formula: ConsumptionFormula::Standard,
                material_id: None,
                material_rate: rate,
                base_consumption: None,
                total_consumption: Some(total),
                is_manual: false,
            },
        );
        set
    }

    #[test]
    fn charges_scale_by_order_quantity() {
        let set = part_with(dec!(1200), dec!(2.5));
        let rates = ChargeRates {
            cutting_rate: dec!(1),
            printing_rate: dec!(2),
            stitching_rate: dec!(3),
            transport_charge: dec!(500),
            margin_percent: dec!(10),
            gst_amount: dec!(0),
        };

        let summary = roll_up(&set, &rates, dec!(4), TransportPolicy::FlatPerOrder);
        assert_eq!(summary.material_cost, dec!(3000));
        assert_eq!(summary.cutting_charge, dec!(4));
        assert_eq!(summary.printing_charge, dec!(8));
        assert_eq!(summary.stitching_charge, dec!(12));
        assert_eq!(summary.transport_charge, dec!(500));
        assert_eq!(summary.base_cost, dec!(3024));
        assert_eq!(summary.total_cost, dec!(3524));
        assert_eq!(summary.per_unit_cost, dec!(881));
        assert_eq!(summary.selling_price, dec!(3876.4));
    }

    #[test]
    fn transport_policy_is_explicit() {
        let set = ComponentSet::default();
        let rates = ChargeRates {
            transport_charge: dec!(100),
            ..Default::default()
        };
        let flat = roll_up(&set, &rates, dec!(5), TransportPolicy::FlatPerOrder);
        let scaled = roll_up(&set, &rates, dec!(5), TransportPolicy::ScaledByQuantity);
        assert_eq!(flat.transport_charge, dec!(100));
        assert_eq!(scaled.transport_charge, dec!(500));
    }

    #[test]
    fn zero_quantity_never_divides() {
        let set = part_with(dec!(100), dec!(1));
        let rates = ChargeRates::default();
        let summary = roll_up(&set, &rates, Decimal::ZERO, TransportPolicy::FlatPerOrder);
        assert_eq!(summary.per_unit_cost, Decimal::ZERO);
        assert_eq!(summary.total_cost, dec!(100));
    }

    #[test]
    fn roll_up_is_idempotent() {
        let set = part_with(dec!(640), dec!(3.25));
        let rates = ChargeRates {
            cutting_rate: dec!(0.4),
            printing_rate: dec!(0.6),
            stitching_rate: dec!(0.8),
            transport_charge: dec!(75),
            margin_percent: dec!(15),
            gst_amount: dec!(90),
        };
        let first = roll_up(&set, &rates, dec!(16), TransportPolicy::ScaledByQuantity);
        let second = roll_up(&set, &rates, dec!(16), TransportPolicy::ScaledByQuantity);
        assert_eq!(first, second);
    }

    #[test]
    fn persisted_view_reports_values_verbatim() {
        let summary = CostSummary::from_persisted(
            dec!(4.1234),
            dec!(1),
            dec!(2),
            dec!(3),
            dec!(4),
            dec!(0.5),
            dec!(14.6234),
            dec!(1.4623),
            dec!(16.8169),
        );
        assert_eq!(summary.material_cost, dec!(4.1234));
        assert_eq!(summary.rounded(2).material_cost, dec!(4.12));
        assert_eq!(summary.total_cost, dec!(14.6234));
    }
}
