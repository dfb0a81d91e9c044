use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;
use uuid::Uuid;

use super::formula::ConsumptionFormula;

/// The six fixed component types a bag is assembled from.
///
/// `Chain` and `Runner` are hardware, so no fabric consumption is ever
/// computed for them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComponentType {
    Part,
    Border,
    Handle,
    Chain,
    Runner,
    Piping,
}

impl ComponentType {
    /// Hardware components carry no consumption fields.
    pub fn consumption_exempt(self) -> bool {
        matches!(self, Self::Chain | Self::Runner)
    }
}

/// Result of normalizing a raw component type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentTag {
    Standard(ComponentType),
    Custom,
}

/// Normalizes a type tag from form or catalog input: lowercase, trim, and
/// coerce anything unrecognized to `part` rather than rejecting the row.
pub fn normalize_type_tag(raw: &str) -> ComponentTag {
    let tag = raw.trim().to_lowercase();
    if tag == "custom" {
        return ComponentTag::Custom;
    }
    match ComponentType::from_str(&tag) {
        Ok(kind) => ComponentTag::Standard(kind),
        Err(_) => {
            warn!(tag = %raw, "unrecognized component type tag, coercing to part");
            ComponentTag::Standard(ComponentType::Part)
        }
    }
}

/// Standard components are keyed by their fixed type; custom components are
/// free-form and unlimited, identified by a user-facing name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentKind {
    Standard { component_type: ComponentType },
    Custom { name: String },
}

impl ComponentKind {
    /// The type tag persisted on the component row.
    pub fn type_tag(&self) -> String {
        match self {
            Self::Standard { component_type } => component_type.to_string(),
            Self::Custom { .. } => "custom".to_string(),
        }
    }

    pub fn custom_name(&self) -> Option<&str> {
        match self {
            Self::Standard { .. } => None,
            Self::Custom { name } => Some(name),
        }
    }
}

/// One in-memory component of an order draft.
///
/// `base_consumption` is per single produced unit; `total_consumption` is
/// the order-quantity-scaled figure that gets persisted and billed. Exactly
/// one of {formula-derived, manually-entered} governs the total: when
/// `is_manual` is set the total is whatever the user typed and must survive
/// any later quantity change untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDraft {
    pub kind: ComponentKind,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub roll_width: Option<Decimal>,
    pub formula: ConsumptionFormula,
    pub material_id: Option<Uuid>,
    pub material_rate: Decimal,
    pub base_consumption: Option<Decimal>,
    pub total_consumption: Option<Decimal>,
    pub is_manual: bool,
}

impl ComponentDraft {
    /// Material cost contributed by this component.
    pub fn material_cost(&self) -> Decimal {
        self.total_consumption.unwrap_or(Decimal::ZERO) * self.material_rate
    }
}

/// The live component set of an order draft: at most one draft per standard
/// type, plus an ordered list of custom drafts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSet {
    pub standard: BTreeMap<ComponentType, ComponentDraft>,
    pub custom: Vec<ComponentDraft>,
}

impl ComponentSet {
    pub fn is_empty(&self) -> bool {
        self.standard.is_empty() && self.custom.is_empty()
    }

    pub fn len(&self) -> usize {
        self.standard.len() + self.custom.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentDraft> {
        self.standard.values().chain(self.custom.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ComponentDraft> {
        self.standard.values_mut().chain(self.custom.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags_normalize_case_and_whitespace() {
        assert_eq!(
            normalize_type_tag("Border "),
            ComponentTag::Standard(ComponentType::Border)
        );
        assert_eq!(
            normalize_type_tag("  PIPING"),
            ComponentTag::Standard(ComponentType::Piping)
        );
        assert_eq!(normalize_type_tag("Custom"), ComponentTag::Custom);
    }

    #[test]
    fn unknown_type_tags_coerce_to_part() {
        assert_eq!(
            normalize_type_tag("gizmo"),
            ComponentTag::Standard(ComponentType::Part)
        );
        assert_eq!(
            normalize_type_tag(""),
            ComponentTag::Standard(ComponentType::Part)
        );
    }

    #[test]
    fn hardware_types_are_consumption_exempt() {
        assert!(ComponentType::Chain.consumption_exempt());
        assert!(ComponentType::Runner.consumption_exempt());
        assert!(!ComponentType::Part.consumption_exempt());
    }
}
