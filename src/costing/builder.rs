use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

use super::component::{
    normalize_type_tag, ComponentDraft, ComponentKind, ComponentSet, ComponentTag,
};
use super::formula::{self, ConsumptionFormula};

/// A component definition as it arrives from a catalog template or a
/// submitted order payload, before classification and material wiring.
#[derive(Debug, Clone, Default)]
pub struct ComponentDefinition {
    pub type_tag: String,
    pub custom_name: Option<String>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub roll_width: Option<Decimal>,
    pub formula: ConsumptionFormula,
    /// Template-total consumption at the template's own product quantity,
    /// when the definition carries one.
    pub consumption: Option<Decimal>,
    pub material_id: Option<Uuid>,
    pub is_manual: bool,
}

/// Material attributes resolved through one batched inventory lookup.
#[derive(Debug, Clone)]
pub struct MaterialAttributes {
    pub id: Uuid,
    pub name: String,
    pub purchase_rate: Decimal,
    pub roll_width: Option<Decimal>,
}

/// Builds the in-memory component set for an order draft.
///
/// Per-unit base consumption comes from the template total divided by the
/// template's product quantity when a total is present, otherwise straight
/// from geometry. Standard types keep at most one draft each (last
/// definition wins); custom definitions accumulate in order.
pub fn build_component_set(
    definitions: &[ComponentDefinition],
    default_product_quantity: i32,
    materials: &HashMap<Uuid, MaterialAttributes>,
) -> ComponentSet {
    let product_quantity = Decimal::from(default_product_quantity.max(1));
    let mut set = ComponentSet::default();

    for definition in definitions {
        let tag = normalize_type_tag(&definition.type_tag);

        let material = definition
            .material_id
            .and_then(|id| materials.get(&id))
            .or_else(|| {
                if let Some(id) = definition.material_id {
                    warn!(material_id = %id, "material not found, component keeps zero rate");
                }
                None
            });

        let material_rate = material.map(|m| m.purchase_rate).unwrap_or(Decimal::ZERO);
        let roll_width = definition
            .roll_width
            .or_else(|| material.and_then(|m| m.roll_width));

        let exempt = matches!(tag, ComponentTag::Standard(kind) if kind.consumption_exempt());
        let base_consumption = if exempt {
            None
        } else if let Some(total) = definition.consumption {
            total.checked_div(product_quantity)
        } else {
            formula::evaluate(
                definition.formula,
                definition.length,
                definition.width,
                roll_width,
            )
        };

        // Manual entries keep the total exactly as typed.
        let total_consumption = if definition.is_manual {
            definition.consumption
        } else {
            None
        };

        let kind = match tag {
            ComponentTag::Standard(component_type) => ComponentKind::Standard { component_type },
            ComponentTag::Custom => ComponentKind::Custom {
                name: definition
                    .custom_name
                    .clone()
                    .unwrap_or_else(|| "custom".to_string()),
            },
        };

        let draft = ComponentDraft {
            kind,
            length: definition.length,
            width: definition.width,
            roll_width,
            formula: definition.formula,
            material_id: definition.material_id,
            material_rate,
            base_consumption,
            total_consumption,
            is_manual: definition.is_manual,
        };

        let standard_type = match &draft.kind {
            ComponentKind::Standard { component_type } => Some(*component_type),
            ComponentKind::Custom { .. } => None,
        };
        match standard_type {
            Some(component_type) => {
                if set.standard.insert(component_type, draft).is_some() {
                    warn!(
                        component_type = %component_type,
                        "duplicate standard component definition, keeping the latest"
                    );
                }
            }
            None => set.custom.push(draft),
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::component::ComponentType;
    use rust_decimal_macros::dec;

    fn material(rate: Decimal, roll_width: Option<Decimal>) -> (Uuid, MaterialAttributes) {
        let id = Uuid::new_v4();
        (
            id,
            MaterialAttributes {
                id,
                name: "non-woven 90gsm".to_string(),
                purchase_rate: rate,
                roll_width,
            },
        )
    }

    #[test]
    fn template_total_divides_by_product_quantity() {
        let definitions = vec![ComponentDefinition {
            type_tag: "part".to_string(),
            consumption: Some(dec!(300)),
            ..Default::default()
        }];
        let set = build_component_set(&definitions, 3, &HashMap::new());
        let part = &set.standard[&ComponentType::Part];
        assert_eq!(part.base_consumption, Some(dec!(100)));
    }

    #[test]
    fn geometry_is_used_when_no_template_total() {
        let (id, attrs) = material(dec!(2.5), Some(dec!(40)));
        let materials = HashMap::from([(id, attrs)]);
        let definitions = vec![ComponentDefinition {
            type_tag: "border".to_string(),
            length: Some(dec!(20)),
            width: Some(dec!(30)),
            material_id: Some(id),
            ..Default::default()
        }];
        let set = build_component_set(&definitions, 1, &materials);
        let border = &set.standard[&ComponentType::Border];
        let expected = (dec!(20) * dec!(30)) / (dec!(40) * formula::INCH_TO_YARD_FACTOR);
        assert_eq!(border.base_consumption, Some(expected));
        assert_eq!(border.material_rate, dec!(2.5));
    }

    #[test]
    fn hardware_components_get_no_consumption() {
        let definitions = vec![ComponentDefinition {
            type_tag: "chain".to_string(),
            consumption: Some(dec!(50)),
            length: Some(dec!(10)),
            ..Default::default()
        }];
        let set = build_component_set(&definitions, 1, &HashMap::new());
        let chain = &set.standard[&ComponentType::Chain];
        assert_eq!(chain.base_consumption, None);
    }

    #[test]
    fn unknown_tags_land_in_part_and_customs_accumulate() {
        let definitions = vec![
            ComponentDefinition {
                type_tag: "gizmo".to_string(),
                ..Default::default()
            },
            ComponentDefinition {
                type_tag: "custom".to_string(),
                custom_name: Some("zip pocket".to_string()),
                ..Default::default()
            },
            ComponentDefinition {
                type_tag: "custom".to_string(),
                custom_name: Some("lining".to_string()),
                ..Default::default()
            },
        ];
        let set = build_component_set(&definitions, 1, &HashMap::new());
        assert!(set.standard.contains_key(&ComponentType::Part));
        assert_eq!(set.custom.len(), 2);
        assert_eq!(set.custom[0].kind.custom_name(), Some("zip pocket"));
    }

    #[test]
    fn manual_definition_keeps_entered_total() {
        let definitions = vec![ComponentDefinition {
            type_tag: "handle".to_string(),
            consumption: Some(dec!(600)),
            is_manual: true,
            ..Default::default()
        }];
        let set = build_component_set(&definitions, 2, &HashMap::new());
        let handle = &set.standard[&ComponentType::Handle];
        assert_eq!(handle.total_consumption, Some(dec!(600)));
        assert!(handle.is_manual);
    }

    #[test]
    fn zero_product_quantity_is_floored_to_one() {
        let definitions = vec![ComponentDefinition {
            type_tag: "part".to_string(),
            consumption: Some(dec!(300)),
            ..Default::default()
        }];
        let set = build_component_set(&definitions, 0, &HashMap::new());
        let part = &set.standard[&ComponentType::Part];
        assert_eq!(part.base_consumption, Some(dec!(300)));
    }
}
