//! Order cost and material consumption engine.
//!
//! The one authoritative implementation of the consumption formulas,
//! component set construction, quantity-driven recalculation and cost
//! roll-up. Services and handlers import from here instead of re-deriving
//! any of the math. Everything in this module is pure and synchronous;
//! persistence and lookups stay in the service layer.

pub mod builder;
pub mod component;
pub mod formula;
pub mod recalc;
pub mod rollup;

pub use builder::{build_component_set, ComponentDefinition, MaterialAttributes};
pub use component::{
    normalize_type_tag, ComponentDraft, ComponentKind, ComponentSet, ComponentTag, ComponentType,
};
pub use formula::{evaluate, ConsumptionFormula, INCH_TO_YARD_FACTOR};
pub use recalc::recalculate;
pub use rollup::{roll_up, ChargeRates, CostSummary, TransportPolicy};

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a numeric form field, treating blank or malformed text as absent.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// Form-field fallback used everywhere a figure must enter cost math:
/// anything unparseable becomes zero so garbage never reaches a total.
pub fn parse_decimal_or_zero(raw: &str) -> Decimal {
    parse_decimal(raw).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn blank_and_garbage_fields_parse_safely() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("  "), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(" 12.5 "), Some(dec!(12.5)));
        assert_eq!(parse_decimal_or_zero("NaN"), Decimal::ZERO);
        assert_eq!(parse_decimal_or_zero("7"), dec!(7));
    }
}
