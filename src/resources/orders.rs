//! Orders: list, create, read, update and delete

use super::{ListQuery, filter_by_id};
use crate::core::validation::validators::{non_empty_array, one_of, positive_number, truthy};
use crate::core::validation::{Chain, Exists, GuardContext, id_matches_route, require};
use crate::core::{ApiError, ApiResult, Data, Envelope, Removal, Store};
use crate::entities::{Order, OrderDraft};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::router::method_not_allowed;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;

/// Statuses an update may set
const UPDATABLE_STATUSES: [&str; 3] = ["pending", "preparing", "out-for-delivery"];

const DELIVERED_MESSAGE: &str = "A delivered order cannot be changed.";
const INVALID_STATUS_MESSAGE: &str =
    "Order must have a status of pending, preparing, out-for-delivery, delivered.";
const NO_DISHES_MESSAGE: &str = "Order must include at least one dish.";
const NOT_PENDING_MESSAGE: &str = "An order cannot be deleted unless it is pending.";

fn quantity_message(index: usize) -> String {
    format!(
        "Dish {} must have a quantity that is an integer greater than 0.",
        index
    )
}

fn status_is_valid(ctx: &GuardContext<Order>) -> ApiResult<()> {
    let status = ctx.field("status");
    if one_of(status, &UPDATABLE_STATUSES) {
        Ok(())
    } else if status.as_str() == Some("delivered") {
        Err(ApiError::invalid_input(DELIVERED_MESSAGE))
    } else {
        Err(ApiError::invalid_input(INVALID_STATUS_MESSAGE))
    }
}

fn dishes_is_non_empty_array(ctx: &GuardContext<Order>) -> ApiResult<()> {
    if non_empty_array(ctx.field("dishes")) {
        Ok(())
    } else {
        Err(ApiError::invalid_input(NO_DISHES_MESSAGE))
    }
}

/// First line item for which `bad` holds, as a quantity error
fn check_line_items(ctx: &GuardContext<Order>, bad: impl Fn(&Value) -> bool) -> ApiResult<()> {
    let items = ctx.field("dishes").as_array().map(Vec::as_slice).unwrap_or_default();
    let quantity = |item: &Value| item.get("quantity").cloned().unwrap_or(Value::Null);
    match items.iter().position(|item| bad(&quantity(item))) {
        Some(index) => Err(ApiError::invalid_input(quantity_message(index))),
        None => Ok(()),
    }
}

fn dishes_have_quantity(ctx: &GuardContext<Order>) -> ApiResult<()> {
    check_line_items(ctx, |q| !truthy(q))
}

fn dish_quantities_are_valid(ctx: &GuardContext<Order>) -> ApiResult<()> {
    check_line_items(ctx, |q| !positive_number(q))
}

/// The order store together with the guard chain of each operation
pub struct OrderResource {
    store: Arc<dyn Store<Order>>,
    create_chain: Chain<Order>,
    read_chain: Chain<Order>,
    update_chain: Chain<Order>,
    delete_chain: Chain<Order>,
}

impl OrderResource {
    pub fn new(store: Arc<dyn Store<Order>>) -> Self {
        let create_chain = Chain::new("create")
            .guard(require("deliverTo"))
            .guard(require("mobileNumber"))
            .guard(require("dishes"))
            .check("dishes-array", dishes_is_non_empty_array)
            .check("quantity-present", dishes_have_quantity)
            .check("quantity-valid", dish_quantities_are_valid);

        let read_chain = Chain::new("read").guard(Exists::new(store.clone()));

        let update_chain = Chain::new("update")
            .guard(Exists::new(store.clone()))
            .guard(require("deliverTo"))
            .guard(require("mobileNumber"))
            .guard(require("status"))
            .guard(require("dishes"))
            .guard(id_matches_route())
            .check("status", status_is_valid)
            .check("dishes-array", dishes_is_non_empty_array)
            .check("quantity-present", dishes_have_quantity)
            .check("quantity-valid", dish_quantities_are_valid);

        let delete_chain = Chain::new("delete").guard(Exists::new(store.clone()));

        Self {
            store,
            create_chain,
            read_chain,
            update_chain,
            delete_chain,
        }
    }

    /// All orders, or only the one matching `id`
    pub async fn list(&self, id: Option<&str>) -> ApiResult<Vec<Order>> {
        Ok(filter_by_id(self.store.list().await?, id))
    }

    pub async fn create(&self, payload: Value) -> ApiResult<Order> {
        let ctx = self.create_chain.run(GuardContext::new(None, payload)).await?;
        let draft: OrderDraft = ctx.parse()?;
        let order = self.store.append(Order::create(draft)).await?;
        tracing::info!(order_id = %order.id, "order created");
        Ok(order)
    }

    pub async fn read(&self, id: &str) -> ApiResult<Order> {
        let mut ctx = self
            .read_chain
            .run(GuardContext::new(Some(id.to_string()), Value::Null))
            .await?;
        ctx.take_found()
    }

    /// Replace every mutable field of the order
    pub async fn update(&self, id: &str, payload: Value) -> ApiResult<Order> {
        let ctx = self
            .update_chain
            .run(GuardContext::new(Some(id.to_string()), payload))
            .await?;
        let draft: OrderDraft = ctx.parse()?;

        let updated = self
            .store
            .update_in_place(id, Box::new(move |order: &mut Order| order.replace(draft)))
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Order does not exist: {}.", id)))?;

        tracing::info!(order_id = %updated.id, status = ?updated.status, "order updated");
        Ok(updated)
    }

    /// Remove the order, which must still be pending
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.delete_chain
            .run(GuardContext::new(Some(id.to_string()), Value::Null))
            .await?;

        match self.store.remove_if(id, Order::is_pending).await? {
            Removal::Removed(order) => {
                tracing::info!(order_id = %order.id, "order deleted");
                Ok(())
            }
            Removal::Kept(_) | Removal::Missing => {
                Err(ApiError::invalid_input(NOT_PENDING_MESSAGE))
            }
        }
    }

    pub fn create_chain(&self) -> &Chain<Order> {
        &self.create_chain
    }

    pub fn update_chain(&self) -> &Chain<Order> {
        &self.update_chain
    }
}

// === HTTP handlers ===

async fn list_orders(
    State(resource): State<Arc<OrderResource>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Data<Vec<Order>>>> {
    let orders = resource.list(query.id.as_deref()).await?;
    Ok(Json(Data::new(orders)))
}

async fn create_order(
    State(resource): State<Arc<OrderResource>>,
    Envelope(payload): Envelope,
) -> ApiResult<(StatusCode, Json<Data<Order>>)> {
    let order = resource.create(payload).await?;
    Ok((StatusCode::CREATED, Json(Data::new(order))))
}

async fn read_order(
    State(resource): State<Arc<OrderResource>>,
    Path(order_id): Path<String>,
) -> ApiResult<Json<Data<Order>>> {
    Ok(Json(Data::new(resource.read(&order_id).await?)))
}

async fn update_order(
    State(resource): State<Arc<OrderResource>>,
    Path(order_id): Path<String>,
    Envelope(payload): Envelope,
) -> ApiResult<Json<Data<Order>>> {
    Ok(Json(Data::new(resource.update(&order_id, payload).await?)))
}

async fn delete_order(
    State(resource): State<Arc<OrderResource>>,
    Path(order_id): Path<String>,
) -> ApiResult<StatusCode> {
    resource.delete(&order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Registers the `/orders` routes
pub struct OrderDescriptor {
    resource: Arc<OrderResource>,
}

impl OrderDescriptor {
    pub fn new(resource: Arc<OrderResource>) -> Self {
        Self { resource }
    }
}

impl EntityDescriptor for OrderDescriptor {
    fn entity_type(&self) -> &str {
        "order"
    }

    fn plural(&self) -> &str {
        "orders"
    }

    fn build_routes(&self) -> Router {
        let collection = format!("/{}", self.plural());
        Router::new()
            .route(
                &collection,
                get(list_orders)
                    .post(create_order)
                    .fallback(method_not_allowed),
            )
            .route(
                &format!("{}/{{order_id}}", collection),
                get(read_order)
                    .put(update_order)
                    .delete(delete_order)
                    .fallback(method_not_allowed),
            )
            .with_state(self.resource.clone())
    }
}
