use crate::core::{Record, next_id};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A dish on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Any JSON number greater than zero, kept as sent
    pub price: Number,
    pub image_url: String,
}

/// The mutable fields of a dish, as supplied by a create or update request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DishDraft {
    pub name: String,
    pub description: String,
    pub price: Number,
    pub image_url: String,
}

impl Dish {
    /// Build a new dish with a freshly generated id
    pub fn create(draft: DishDraft) -> Self {
        Self {
            id: next_id(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
        }
    }

    /// Overwrite every mutable field; the id never changes
    pub fn replace(&mut self, draft: DishDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.image_url = draft.image_url;
    }
}

impl Record for Dish {
    const RESOURCE: &'static str = "Dish";

    fn id(&self) -> &str {
        &self.id
    }
}
