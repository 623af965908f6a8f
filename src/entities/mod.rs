//! Records served by the API

pub mod dish;
pub mod order;

pub use dish::{Dish, DishDraft};
pub use order::{LineItem, Order, OrderDraft, OrderStatus};
