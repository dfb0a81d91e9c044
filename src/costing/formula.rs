use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Converts inch-based bag geometry into roll-width-normalized yards.
pub const INCH_TO_YARD_FACTOR: Decimal = dec!(39.39);

/// Which consumption formula a component definition carries.
///
/// The tag travels as a plain string on catalog and order component rows;
/// anything unrecognized falls back to `Standard`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConsumptionFormula {
    #[default]
    Standard,
    Linear,
}

impl ConsumptionFormula {
    /// Parses a formula tag, falling back to `Standard` on anything unknown.
    pub fn parse_or_default(raw: &str) -> Self {
        let tag = raw.trim().to_lowercase();
        if tag.is_empty() {
            return Self::Standard;
        }
        Self::from_str(&tag).unwrap_or_else(|_| {
            warn!(tag = %raw, "unrecognized consumption formula tag, using standard");
            Self::Standard
        })
    }
}

/// Evaluates per-unit material consumption from bag geometry.
///
/// `Standard` needs length, width and a non-zero roll width:
/// `(length * width) / (roll_width * 39.39)`. `Linear` needs only length:
/// `length / 39.39`. Missing inputs or a zero roll width yield `None` so a
/// blank field stays blank instead of collapsing to zero.
pub fn evaluate(
    formula: ConsumptionFormula,
    length: Option<Decimal>,
    width: Option<Decimal>,
    roll_width: Option<Decimal>,
) -> Option<Decimal> {
    match formula {
        ConsumptionFormula::Standard => {
            let length = length?;
            let width = width?;
            let roll_width = roll_width?;
            let divisor = roll_width * INCH_TO_YARD_FACTOR;
            if divisor.is_zero() {
                return None;
            }
            (length * width).checked_div(divisor)
        }
        ConsumptionFormula::Linear => {
            let length = length?;
            length.checked_div(INCH_TO_YARD_FACTOR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_formula_matches_definition() {
        let got = evaluate(
            ConsumptionFormula::Standard,
            Some(dec!(20)),
            Some(dec!(30)),
            Some(dec!(40)),
        )
        .unwrap();
        let expected = (dec!(20) * dec!(30)) / (dec!(40) * INCH_TO_YARD_FACTOR);
        assert_eq!(got, expected);
    }

    #[test]
    fn linear_formula_divides_length_only() {
        let got = evaluate(ConsumptionFormula::Linear, Some(dec!(78.78)), None, None).unwrap();
        assert_eq!(got, dec!(78.78) / INCH_TO_YARD_FACTOR);
    }

    #[test]
    fn zero_roll_width_yields_no_value() {
        let got = evaluate(
            ConsumptionFormula::Standard,
            Some(dec!(20)),
            Some(dec!(30)),
            Some(Decimal::ZERO),
        );
        assert_eq!(got, None);
    }

    #[test]
    fn missing_inputs_yield_no_value() {
        assert_eq!(
            evaluate(ConsumptionFormula::Standard, Some(dec!(20)), None, Some(dec!(40))),
            None
        );
        assert_eq!(evaluate(ConsumptionFormula::Linear, None, None, None), None);
    }

    #[test]
    fn formula_tag_parsing_is_lenient() {
        assert_eq!(
            ConsumptionFormula::parse_or_default(" Linear "),
            ConsumptionFormula::Linear
        );
        assert_eq!(
            ConsumptionFormula::parse_or_default("quadratic"),
            ConsumptionFormula::Standard
        );
        assert_eq!(
            ConsumptionFormula::parse_or_default(""),
            ConsumptionFormula::Standard
        );
    }
}
