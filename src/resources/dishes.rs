//! Dishes: list, create, read and update
//!
//! Dishes cannot be deleted.

use super::{ListQuery, filter_by_id};
use crate::core::validation::validators::positive_number;
use crate::core::validation::{Chain, Exists, GuardContext, id_matches_route, require};
use crate::core::{ApiError, ApiResult, Data, Envelope, Store};
use crate::entities::{Dish, DishDraft};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::router::method_not_allowed;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;

const PRICE_MESSAGE: &str = "Dish price must be an integer greater than zero.";

fn price_is_valid(ctx: &GuardContext<Dish>) -> ApiResult<()> {
    if positive_number(ctx.field("price")) {
        Ok(())
    } else {
        Err(ApiError::invalid_input(PRICE_MESSAGE))
    }
}

/// The dish store together with the guard chain of each operation
pub struct DishResource {
    store: Arc<dyn Store<Dish>>,
    create_chain: Chain<Dish>,
    read_chain: Chain<Dish>,
    update_chain: Chain<Dish>,
}

impl DishResource {
    pub fn new(store: Arc<dyn Store<Dish>>) -> Self {
        let create_chain = Chain::new("create")
            .guard(require("name"))
            .guard(require("description"))
            .guard(require("price"))
            .guard(require("image_url"))
            .check("price", price_is_valid);

        let read_chain = Chain::new("read").guard(Exists::new(store.clone()));

        let update_chain = Chain::new("update")
            .guard(Exists::new(store.clone()))
            .guard(require("name"))
            .guard(require("description"))
            .guard(require("price"))
            .guard(require("image_url"))
            .guard(id_matches_route())
            .check("price", price_is_valid);

        Self {
            store,
            create_chain,
            read_chain,
            update_chain,
        }
    }

    /// All dishes, or only the one matching `id`
    pub async fn list(&self, id: Option<&str>) -> ApiResult<Vec<Dish>> {
        Ok(filter_by_id(self.store.list().await?, id))
    }

    pub async fn create(&self, payload: Value) -> ApiResult<Dish> {
        let ctx = self.create_chain.run(GuardContext::new(None, payload)).await?;
        let draft: DishDraft = ctx.parse()?;
        let dish = self.store.append(Dish::create(draft)).await?;
        tracing::info!(dish_id = %dish.id, "dish created");
        Ok(dish)
    }

    pub async fn read(&self, id: &str) -> ApiResult<Dish> {
        let mut ctx = self
            .read_chain
            .run(GuardContext::new(Some(id.to_string()), Value::Null))
            .await?;
        ctx.take_found()
    }

    /// Replace every mutable field of the dish
    pub async fn update(&self, id: &str, payload: Value) -> ApiResult<Dish> {
        let ctx = self
            .update_chain
            .run(GuardContext::new(Some(id.to_string()), payload))
            .await?;
        let draft: DishDraft = ctx.parse()?;

        let updated = self
            .store
            .update_in_place(id, Box::new(move |dish: &mut Dish| dish.replace(draft)))
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Dish does not exist: {}.", id)))?;

        tracing::info!(dish_id = %updated.id, "dish updated");
        Ok(updated)
    }

    pub fn create_chain(&self) -> &Chain<Dish> {
        &self.create_chain
    }

    pub fn update_chain(&self) -> &Chain<Dish> {
        &self.update_chain
    }
}

// === HTTP handlers ===

async fn list_dishes(
    State(resource): State<Arc<DishResource>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Data<Vec<Dish>>>> {
    let dishes = resource.list(query.id.as_deref()).await?;
    Ok(Json(Data::new(dishes)))
}

async fn create_dish(
    State(resource): State<Arc<DishResource>>,
    Envelope(payload): Envelope,
) -> ApiResult<(StatusCode, Json<Data<Dish>>)> {
    let dish = resource.create(payload).await?;
    Ok((StatusCode::CREATED, Json(Data::new(dish))))
}

async fn read_dish(
    State(resource): State<Arc<DishResource>>,
    Path(dish_id): Path<String>,
) -> ApiResult<Json<Data<Dish>>> {
    Ok(Json(Data::new(resource.read(&dish_id).await?)))
}

async fn update_dish(
    State(resource): State<Arc<DishResource>>,
    Path(dish_id): Path<String>,
    Envelope(payload): Envelope,
) -> ApiResult<Json<Data<Dish>>> {
    Ok(Json(Data::new(resource.update(&dish_id, payload).await?)))
}

/// Registers the `/dishes` routes
pub struct DishDescriptor {
    resource: Arc<DishResource>,
}

impl DishDescriptor {
    pub fn new(resource: Arc<DishResource>) -> Self {
        Self { resource }
    }
}

impl EntityDescriptor for DishDescriptor {
    fn entity_type(&self) -> &str {
        "dish"
    }

    fn plural(&self) -> &str {
        "dishes"
    }

    fn build_routes(&self) -> Router {
        let collection = format!("/{}", self.plural());
        Router::new()
            .route(
                &collection,
                get(list_dishes)
                    .post(create_dish)
                    .fallback(method_not_allowed),
            )
            .route(
                &format!("{}/{{dish_id}}", collection),
                get(read_dish).put(update_dish).fallback(method_not_allowed),
            )
            .with_state(self.resource.clone())
    }
}
