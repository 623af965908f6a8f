use crate::core::validation::validators::display_value;
use crate::core::{Record, next_id};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Delivery state of an order
///
/// Creation does not restrict the status, so any value outside the four
/// known ones is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
    #[serde(untagged)]
    Other(Value),
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Other(value) => return f.write_str(&display_value(value)),
        };
        f.write_str(name)
    }
}

/// One entry of an order's `dishes`
///
/// Everything except `quantity`, `dishId` included, is carried in `details`
/// exactly as the client sent it. `dishId` is not checked against the dish
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: Number,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl LineItem {
    pub fn dish_id(&self) -> Option<&Value> {
        self.details.get("dishId")
    }
}

/// A customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    /// Not required at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    pub dishes: Vec<LineItem>,
}

/// The mutable fields of an order, as supplied by a create or update request
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub deliver_to: String,
    pub mobile_number: String,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    pub dishes: Vec<LineItem>,
}

impl Order {
    /// Build a new order with a freshly generated id
    pub fn create(draft: OrderDraft) -> Self {
        Self {
            id: next_id(),
            deliver_to: draft.deliver_to,
            mobile_number: draft.mobile_number,
            status: draft.status,
            dishes: draft.dishes,
        }
    }

    /// Overwrite every mutable field; the id never changes
    pub fn replace(&mut self, draft: OrderDraft) {
        self.deliver_to = draft.deliver_to;
        self.mobile_number = draft.mobile_number;
        self.status = draft.status;
        self.dishes = draft.dishes;
    }

    pub fn is_pending(&self) -> bool {
        self.status == Some(OrderStatus::Pending)
    }
}

impl Record for Order {
    const RESOURCE: &'static str = "Order";

    fn id(&self) -> &str {
        &self.id
    }
}
