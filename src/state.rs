use std::sync::Arc;

use crate::{
    application::{cart_service::CartService, catalog_service::CatalogService},
    infrastructure::notifications::EventBroadcaster,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub carts: Arc<CartService>,
    pub events: Arc<EventBroadcaster>,
}

impl AppState {
    pub fn new(
        catalog: Arc<CatalogService>,
        carts: Arc<CartService>,
        events: Arc<EventBroadcaster>,
    ) -> Self {
        Self {
            catalog,
            carts,
            events,
        }
    }
}
