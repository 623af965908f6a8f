//! Registry of the resources mounted on the router

use axum::Router;

/// A resource that knows how to mount its own routes
///
/// Implemented by the dish and order descriptors.
pub trait EntityDescriptor: Send + Sync {
    /// Singular resource name, e.g. `"dish"`
    fn entity_type(&self) -> &str;

    /// Collection name, used as the route prefix, e.g. `"dishes"`
    fn plural(&self) -> &str;

    /// Routes under `/{plural}`, with their state already attached
    fn build_routes(&self) -> Router;
}

/// Ordered set of resource descriptors
///
/// A later descriptor with the same entity type replaces the earlier one in
/// its original position.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: Vec<Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let existing = self
            .descriptors
            .iter()
            .position(|d| d.entity_type() == descriptor.entity_type());
        match existing {
            Some(index) => self.descriptors[index] = descriptor,
            None => self.descriptors.push(descriptor),
        }
    }

    /// Merge the routes of every registered resource
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .iter()
            .fold(Router::new(), |router, d| router.merge(d.build_routes()))
    }

    /// Registered entity types, in registration order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.entity_type()).collect()
    }
}
