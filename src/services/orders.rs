use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    costing::{
        build_component_set, recalculate, roll_up, ChargeRates, ComponentDefinition,
        ComponentDraft, ComponentSet, ConsumptionFormula, CostSummary, TransportPolicy,
    },
    db::DbPool,
    entities::order::{self, Entity as OrderEntity, Model as OrderModel},
    entities::order_component::{self, Entity as OrderComponentEntity},
    errors::ServiceError,
    events::{Event, EventSender},
    retry::{is_duplicate_key, with_retry, DuplicateKeyPolicy, RetryConfig},
    services::catalog::{BaselineCosts, CatalogService},
    services::inventory::InventoryService,
};

/// States a submission attempt moves through. `PartialFailure` means the
/// order row persisted but its components did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SubmissionState {
    Validating,
    InsertingOrder,
    InsertingComponents,
    Done,
    PartialFailure,
}

/// One component as submitted with an order. Numeric fields may be absent;
/// absent means "not entered", never zero.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ComponentInput {
    #[validate(length(min = 1, message = "Component type is required"))]
    pub component_type: String,
    pub custom_name: Option<String>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub roll_width: Option<Decimal>,
    pub formula: Option<String>,
    /// Total consumption as entered (manual) or carried from a template.
    pub consumption: Option<Decimal>,
    pub material_id: Option<Uuid>,
    #[serde(default)]
    pub is_manual: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub company_id: Uuid,
    #[validate(length(min = 1, max = 50, message = "Order number must be 1-50 characters"))]
    pub order_number: Option<String>,
    #[validate(range(min = 1, message = "Order quantity must be at least 1"))]
    pub quantity: i32,
    pub product_quantity: Option<i32>,
    pub bag_length: Option<Decimal>,
    pub bag_width: Option<Decimal>,
    pub catalog_template_id: Option<Uuid>,
    #[serde(default)]
    pub components: Vec<ComponentInput>,
    pub gst_amount: Option<Decimal>,
    pub margin_percent: Option<Decimal>,
    pub transport_policy: Option<TransportPolicy>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderComponentResponse {
    pub id: Uuid,
    pub component_type: String,
    pub custom_name: Option<String>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub roll_width: Option<Decimal>,
    pub formula: String,
    pub material_id: Option<Uuid>,
    pub base_consumption: Option<Decimal>,
    pub consumption: Option<Decimal>,
    pub is_manual: bool,
    pub material_cost: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub company_id: Uuid,
    pub status: String,
    pub quantity: i32,
    pub product_quantity: i32,
    pub total_quantity: i32,
    pub bag_length: Option<Decimal>,
    pub bag_width: Option<Decimal>,
    pub catalog_template_id: Option<Uuid>,
    pub margin_percent: Decimal,
    pub costs: CostSummary,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
    pub components: Vec<OrderComponentResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentPreview {
    pub component_type: String,
    pub custom_name: Option<String>,
    pub base_consumption: Option<Decimal>,
    pub total_consumption: Option<Decimal>,
    pub material_cost: Decimal,
    pub is_manual: bool,
}

/// Live cost preview of an order draft, computed without persisting
/// anything. `costs` carries full precision; `costs_display` is rounded
/// for currency rendering.
#[derive(Debug, Serialize, Deserialize)]
pub struct CostPreviewResponse {
    pub total_quantity: i32,
    pub components: Vec<ComponentPreview>,
    pub costs: CostSummary,
    pub costs_display: CostSummary,
}

/// A validated order draft ready for persistence.
struct PreparedDraft {
    set: ComponentSet,
    quantity: i32,
    product_quantity: i32,
    total_quantity: i32,
    rates: ChargeRates,
    summary: CostSummary,
}

/// Final consumption figure to persist for one component: manual entries
/// keep their typed total, everything else is re-derived from the per-unit
/// base. Deriving from the base (rather than trusting the live display
/// value) is what keeps a stale or double-scaled total out of storage.
pub fn derive_final_consumption(
    draft: &ComponentDraft,
    total_quantity: Decimal,
) -> Option<Decimal> {
    if draft.is_manual {
        draft.total_consumption
    } else {
        draft.base_consumption.map(|base| base * total_quantity)
    }
}

/// Order intake and re-save: builds the component set, rolls up costs and
/// persists order + components with bounded retry on order-number
/// collisions.
#[derive(Clone)]
pub struct OrderService {
    db: Arc<DbPool>,
    catalog: Arc<CatalogService>,
    inventory: Arc<InventoryService>,
    event_sender: Option<Arc<EventSender>>,
    retry_config: RetryConfig,
    order_number_prefix: String,
    transport_policy: TransportPolicy,
}

impl OrderService {
    pub fn new(
        db: Arc<DbPool>,
        catalog: Arc<CatalogService>,
        inventory: Arc<InventoryService>,
        event_sender: Option<Arc<EventSender>>,
        order_number_prefix: String,
        transport_policy: TransportPolicy,
    ) -> Self {
        Self {
            db,
            catalog,
            inventory,
            event_sender,
            retry_config: RetryConfig::default(),
            order_number_prefix,
            transport_policy,
        }
    }

    fn generate_order_number(&self) -> String {
        let suffix: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
        format!("{}-{}", self.order_number_prefix, suffix)
    }

    /// Builds and prices the draft: template lookup (degrading to defaults),
    /// batched material fetch, component set construction, quantity
    /// recalculation and cost roll-up.
    async fn prepare(&self, request: &CreateOrderRequest) -> Result<PreparedDraft, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let quantity = request.quantity.max(1);

        let (template_product_quantity, baseline, template_definitions) =
            match request.catalog_template_id {
                Some(template_id) => match self.catalog.get_template(template_id).await {
                    Ok(Some((template, components))) => {
                        let definitions: Vec<ComponentDefinition> = components
                            .into_iter()
                            .map(|row| ComponentDefinition {
                                type_tag: row.component_type,
                                custom_name: row.custom_name,
                                length: row.length,
                                width: row.width,
                                roll_width: row.roll_width,
                                formula: ConsumptionFormula::parse_or_default(&row.formula),
                                consumption: row.consumption,
                                material_id: row.material_id,
                                is_manual: false,
                            })
                            .collect();
                        (
                            Some(template.product_quantity),
                            BaselineCosts::from(&template),
                            definitions,
                        )
                    }
                    Ok(None) => {
                        warn!(template_id = %template_id, "catalog template not found, using default charges");
                        (None, BaselineCosts::default(), Vec::new())
                    }
                    Err(e) => {
                        warn!(template_id = %template_id, error = %e, "catalog lookup failed, using default charges");
                        (None, BaselineCosts::default(), Vec::new())
                    }
                },
                None => (None, BaselineCosts::default(), Vec::new()),
            };

        let product_quantity = request
            .product_quantity
            .or(template_product_quantity)
            .unwrap_or(1)
            .max(1);
        let total_quantity = quantity * product_quantity;

        let definitions: Vec<ComponentDefinition> = if request.components.is_empty() {
            template_definitions
        } else {
            request
                .components
                .iter()
                .map(|input| ComponentDefinition {
                    type_tag: input.component_type.clone(),
                    custom_name: input.custom_name.clone(),
                    length: input.length,
                    width: input.width,
                    roll_width: input.roll_width,
                    formula: ConsumptionFormula::parse_or_default(
                        input.formula.as_deref().unwrap_or(""),
                    ),
                    consumption: input.consumption,
                    material_id: input.material_id,
                    is_manual: input.is_manual,
                })
                .collect()
        };

        let material_ids: Vec<Uuid> = definitions
            .iter()
            .filter_map(|definition| definition.material_id)
            .collect();
        let materials = self.inventory.material_attributes(&material_ids).await?;

        let mut set = build_component_set(&definitions, product_quantity, &materials);
        recalculate(&mut set, Decimal::from(total_quantity));

        let rates = ChargeRates {
            cutting_rate: baseline.cutting_charge,
            printing_rate: baseline.printing_charge,
            stitching_rate: baseline.stitching_charge,
            transport_charge: baseline.transport_charge,
            margin_percent: request.margin_percent.unwrap_or(baseline.margin),
            gst_amount: request.gst_amount.unwrap_or(Decimal::ZERO),
        };
        let policy = request.transport_policy.unwrap_or(self.transport_policy);
        let summary = roll_up(&set, &rates, Decimal::from(quantity), policy);

        Ok(PreparedDraft {
            set,
            quantity,
            product_quantity,
            total_quantity,
            rates,
            summary,
        })
    }

    fn component_rows(
        &self,
        order_id: Uuid,
        set: &ComponentSet,
        total_quantity: Decimal,
        now: DateTime<Utc>,
    ) -> Vec<order_component::ActiveModel> {
        set.iter()
            .map(|draft| {
                let consumption = derive_final_consumption(draft, total_quantity);
                let material_cost =
                    consumption.unwrap_or(Decimal::ZERO) * draft.material_rate;
                order_component::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    order_id: Set(order_id),
                    component_type: Set(draft.kind.type_tag()),
                    custom_name: Set(draft.kind.custom_name().map(str::to_string)),
                    length: Set(draft.length),
                    width: Set(draft.width),
                    roll_width: Set(draft.roll_width),
                    formula: Set(draft.formula.to_string()),
                    material_id: Set(draft.material_id),
                    base_consumption: Set(draft.base_consumption),
                    consumption: Set(consumption),
                    is_manual: Set(draft.is_manual),
                    material_cost: Set(material_cost),
                    created_at: Set(now),
                }
            })
            .collect()
    }

    fn component_payloads(set: &ComponentSet, total_quantity: Decimal) -> Vec<serde_json::Value> {
        set.iter()
            .map(|draft| {
                let consumption = derive_final_consumption(draft, total_quantity);
                serde_json::json!({
                    "component_type": draft.kind.type_tag(),
                    "custom_name": draft.kind.custom_name(),
                    "base_consumption": draft.base_consumption,
                    "consumption": consumption,
                    "is_manual": draft.is_manual,
                    "material_id": draft.material_id,
                    "material_cost": consumption.unwrap_or(Decimal::ZERO) * draft.material_rate,
                })
            })
            .collect()
    }

    /// Persists the component rows. Failure here is terminal for the set
    /// but the order row stays; the rows ride back in the error.
    async fn insert_components(
        &self,
        order_id: Uuid,
        rows: Vec<order_component::ActiveModel>,
        payloads: Vec<serde_json::Value>,
    ) -> Result<(), ServiceError> {
        if rows.is_empty() {
            return Ok(());
        }

        let count = rows.len();

        if let Err(e) = OrderComponentEntity::insert_many(rows).exec(&*self.db).await {
            let state = SubmissionState::PartialFailure;
            error!(order_id = %order_id, %state, error = %e, "component insert failed, order row kept");

            if let Some(sender) = &self.event_sender {
                if let Err(e) = sender
                    .send(Event::OrderComponentsFailed {
                        order_id,
                        component_count: count,
                    })
                    .await
                {
                    warn!(order_id = %order_id, error = %e, "failed to send component failure event");
                }
            }

            return Err(ServiceError::ComponentPersistFailed {
                order_id,
                components: payloads,
                message: e.to_string(),
            });
        }

        Ok(())
    }

    #[instrument(skip(self, request), fields(company_id = %request.company_id))]
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        let mut state = SubmissionState::Validating;
        debug!(%state, "order submission started");

        let draft = self.prepare(&request).await?;
        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let explicit_number = request.order_number.clone();

        state = SubmissionState::InsertingOrder;
        debug!(%state, order_id = %order_id, "inserting order row");

        let base_number = explicit_number
            .clone()
            .unwrap_or_else(|| self.generate_order_number());

        let insert_result = with_retry(&self.retry_config, DuplicateKeyPolicy, |attempt| {
            // An explicitly requested number is retried as-is; generated
            // numbers get a fresh suffix after a collision.
            let order_number = if explicit_number.is_some() || attempt == 1 {
                base_number.clone()
            } else {
                self.generate_order_number()
            };

            let active = order::ActiveModel {
                id: Set(order_id),
                order_number: Set(order_number),
                company_id: Set(request.company_id),
                status: Set("pending".to_string()),
                quantity: Set(draft.quantity),
                product_quantity: Set(draft.product_quantity),
                total_quantity: Set(draft.total_quantity),
                bag_length: Set(request.bag_length),
                bag_width: Set(request.bag_width),
                catalog_template_id: Set(request.catalog_template_id),
                material_cost: Set(draft.summary.material_cost),
                cutting_charge: Set(draft.summary.cutting_charge),
                printing_charge: Set(draft.summary.printing_charge),
                stitching_charge: Set(draft.summary.stitching_charge),
                transport_charge: Set(draft.summary.transport_charge),
                gst_amount: Set(draft.summary.gst_amount),
                margin_percent: Set(draft.rates.margin_percent),
                total_cost: Set(draft.summary.total_cost),
                per_unit_cost: Set(draft.summary.per_unit_cost),
                selling_price: Set(draft.summary.selling_price),
                notes: Set(request.notes.clone()),
                created_at: Set(now),
                updated_at: Set(Some(now)),
                version: Set(1),
            };

            let db = self.db.clone();
            async move { active.insert(&*db).await }
        })
        .await;

        let order_model = insert_result.map_err(|e| {
            if is_duplicate_key(&e) {
                ServiceError::Conflict(format!(
                    "Order number collision persisted across {} attempts",
                    self.retry_config.max_attempts
                ))
            } else {
                error!(order_id = %order_id, error = %e, "order insert failed");
                ServiceError::DatabaseError(e)
            }
        })?;

        state = SubmissionState::InsertingComponents;
        debug!(%state, order_id = %order_id, "inserting component rows");

        let rows = self.component_rows(
            order_id,
            &draft.set,
            Decimal::from(draft.total_quantity),
            now,
        );
        let payloads = Self::component_payloads(&draft.set, Decimal::from(draft.total_quantity));
        self.insert_components(order_id, rows, payloads).await?;

        state = SubmissionState::Done;
        info!(%state, order_id = %order_id, order_number = %order_model.order_number, "order created");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(Event::OrderCreated(order_id)).await {
                warn!(order_id = %order_id, error = %e, "failed to send order created event");
            }
        }

        self.load_response(order_model).await
    }

    /// Full re-save: recompute everything, rewrite the order row and
    /// delete-then-reinsert its component set. No incremental diffing.
    #[instrument(skip(self, request), fields(order_id = %order_id))]
    pub async fn update_order(
        &self,
        order_id: Uuid,
        request: CreateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        let draft = self.prepare(&request).await?;

        let existing = OrderEntity::find_by_id(order_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        let now = Utc::now();
        let version = existing.version;
        let mut active: order::ActiveModel = existing.into();
        active.company_id = Set(request.company_id);
        active.quantity = Set(draft.quantity);
        active.product_quantity = Set(draft.product_quantity);
        active.total_quantity = Set(draft.total_quantity);
        active.bag_length = Set(request.bag_length);
        active.bag_width = Set(request.bag_width);
        active.catalog_template_id = Set(request.catalog_template_id);
        active.material_cost = Set(draft.summary.material_cost);
        active.cutting_charge = Set(draft.summary.cutting_charge);
        active.printing_charge = Set(draft.summary.printing_charge);
        active.stitching_charge = Set(draft.summary.stitching_charge);
        active.transport_charge = Set(draft.summary.transport_charge);
        active.gst_amount = Set(draft.summary.gst_amount);
        active.margin_percent = Set(draft.rates.margin_percent);
        active.total_cost = Set(draft.summary.total_cost);
        active.per_unit_cost = Set(draft.summary.per_unit_cost);
        active.selling_price = Set(draft.summary.selling_price);
        active.notes = Set(request.notes.clone());
        active.updated_at = Set(Some(now));
        active.version = Set(version + 1);

        let updated = active.update(&*self.db).await.map_err(|e| {
            error!(order_id = %order_id, error = %e, "order update failed");
            ServiceError::db_error(e)
        })?;

        OrderComponentEntity::delete_many()
            .filter(order_component::Column::OrderId.eq(order_id))
            .exec(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        let rows = self.component_rows(
            order_id,
            &draft.set,
            Decimal::from(draft.total_quantity),
            now,
        );
        let payloads = Self::component_payloads(&draft.set, Decimal::from(draft.total_quantity));
        self.insert_components(order_id, rows, payloads).await?;

        info!(order_id = %order_id, "order re-saved");

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(Event::OrderUpdated(order_id)).await {
                warn!(order_id = %order_id, error = %e, "failed to send order updated event");
            }
        }

        self.load_response(updated).await
    }

    /// Prices a draft without touching storage. Used by the live cost
    /// display while the user edits quantity and dimensions.
    #[instrument(skip(self, request))]
    pub async fn preview_costs(
        &self,
        request: CreateOrderRequest,
    ) -> Result<CostPreviewResponse, ServiceError> {
        let draft = self.prepare(&request).await?;

        let components = draft
            .set
            .iter()
            .map(|component| ComponentPreview {
                component_type: component.kind.type_tag(),
                custom_name: component.kind.custom_name().map(str::to_string),
                base_consumption: component.base_consumption.map(|c| c.round_dp(4)),
                total_consumption: component.total_consumption.map(|c| c.round_dp(4)),
                material_cost: component.material_cost().round_dp(2),
                is_manual: component.is_manual,
            })
            .collect();

        Ok(CostPreviewResponse {
            total_quantity: draft.total_quantity,
            components,
            costs_display: draft.summary.rounded(2),
            costs: draft.summary,
        })
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: Uuid) -> Result<Option<OrderResponse>, ServiceError> {
        let order = OrderEntity::find_by_id(order_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        match order {
            Some(model) => Ok(Some(self.load_response(model).await?)),
            None => Ok(None),
        }
    }

    /// Read-only cost view of a persisted order: figures are reported
    /// verbatim, no formula runs.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn order_costs(&self, order_id: Uuid) -> Result<CostSummary, ServiceError> {
        let order = OrderEntity::find_by_id(order_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        Ok(persisted_costs(&order))
    }

    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<OrderListResponse, ServiceError> {
        let paginator = OrderEntity::find()
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::db_error)?;
        let orders = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::db_error)?;

        let mut responses = Vec::with_capacity(orders.len());
        for model in orders {
            responses.push(self.load_response(model).await?);
        }

        Ok(OrderListResponse {
            orders: responses,
            total,
            page,
            per_page,
        })
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn cancel_order(
        &self,
        order_id: Uuid,
        reason: Option<String>,
    ) -> Result<OrderResponse, ServiceError> {
        let order = OrderEntity::find_by_id(order_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        let version = order.version;
        let mut active: order::ActiveModel = order.into();
        active.status = Set("cancelled".to_string());
        if let Some(reason) = reason {
            active.notes = Set(Some(reason));
        }
        active.updated_at = Set(Some(Utc::now()));
        active.version = Set(version + 1);

        let cancelled = active.update(&*self.db).await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(Event::OrderCancelled(order_id)).await {
                warn!(order_id = %order_id, error = %e, "failed to send order cancelled event");
            }
        }

        self.load_response(cancelled).await
    }

    async fn load_response(&self, model: OrderModel) -> Result<OrderResponse, ServiceError> {
        let components = OrderComponentEntity::find()
            .filter(order_component::Column::OrderId.eq(model.id))
            .order_by_asc(order_component::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(model_to_response(model, components))
    }
}

/// Persisted cost figures, verbatim.
pub fn persisted_costs(order: &OrderModel) -> CostSummary {
    CostSummary::from_persisted(
        order.material_cost,
        order.cutting_charge,
        order.printing_charge,
        order.stitching_charge,
        order.transport_charge,
        order.gst_amount,
        order.total_cost,
        order.per_unit_cost,
        order.selling_price,
    )
}

fn model_to_response(
    model: OrderModel,
    components: Vec<order_component::Model>,
) -> OrderResponse {
    let costs = persisted_costs(&model);
    OrderResponse {
        id: model.id,
        order_number: model.order_number,
        company_id: model.company_id,
        status: model.status,
        quantity: model.quantity,
        product_quantity: model.product_quantity,
        total_quantity: model.total_quantity,
        bag_length: model.bag_length,
        bag_width: model.bag_width,
        catalog_template_id: model.catalog_template_id,
        margin_percent: model.margin_percent,
        costs,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
        version: model.version,
        components: components
            .into_iter()
            .map(|component| OrderComponentResponse {
                id: component.id,
                component_type: component.component_type,
                custom_name: component.custom_name,
                length: component.length,
                width: component.width,
                roll_width: component.roll_width,
                formula: component.formula,
                material_id: component.material_id,
                base_consumption: component.base_consumption,
                consumption: component.consumption,
                is_manual: component.is_manual,
                material_cost: component.material_cost,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::{ComponentKind, ComponentType};
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
            material_rate: dec!(2.5),
            base_consumption: base,
            total_consumption: total,
            is_manual: manual,
        }
    }

    #[test]
    fn final_consumption_derives_from_base_not_display() {
        // A stale display total must not leak into storage.
        let stale = draft(Some(dec!(100)), Some(dec!(999999)), false);
        assert_eq!(
            derive_final_consumption(&stale, dec!(12)),
            Some(dec!(1200))
        );
    }

    #[test]
    fn final_consumption_keeps_manual_totals() {
        let manual = draft(Some(dec!(100)), Some(dec!(600)), true);
        assert_eq!(derive_final_consumption(&manual, dec!(42)), Some(dec!(600)));
    }

    #[test]
    fn final_consumption_is_blank_without_base() {
        let blank = draft(None, None, false);
        assert_eq!(derive_final_consumption(&blank, dec!(10)), None);
    }

    #[test]
    fn persisted_costs_report_verbatim() {
        let now = Utc::now();
        let order = OrderModel {
            id: Uuid::new_v4(),
            order_number: "ORD-123456".to_string(),
            company_id: Uuid::new_v4(),
            status: "completed".to_string(),
            quantity: 4,
            product_quantity: 3,
            total_quantity: 12,
            bag_length: None,
            bag_width: None,
            catalog_template_id: None,
            material_cost: dec!(4.1234),
            cutting_charge: dec!(1),
            printing_charge: dec!(2),
            stitching_charge: dec!(3),
            transport_charge: dec!(4),
            gst_amount: dec!(0.5),
            margin_percent: dec!(15),
            total_cost: dec!(14.6234),
            per_unit_cost: dec!(3.65585),
            selling_price: dec!(16.816910),
            notes: None,
            created_at: now,
            updated_at: Some(now),
            version: 1,
        };

        let costs = persisted_costs(&order);
        assert_eq!(costs.material_cost, dec!(4.1234));
        assert_eq!(costs.total_cost, dec!(14.6234));
        assert_eq!(costs.selling_price, dec!(16.816910));
    }

    #[test]
    fn submission_states_render_snake_case() {
        assert_eq!(SubmissionState::InsertingOrder.to_string(), "inserting_order");
        assert_eq!(
            SubmissionState::PartialFailure.to_string(),
            "partial_failure"
        );
    }
}
