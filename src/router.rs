use crate::db::InventoryStore;
use crate::handlers::{
    home::welcome,
    products::{delete_product, list_products},
};
use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct InventoryState {
    pub store: InventoryStore,
}

impl InventoryState {
    pub fn new(store: InventoryStore) -> Self {
        Self { store }
    }
}

pub fn inventory_router(state: InventoryState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/products", get(list_products))
        .route("/products/{id}", delete(delete_product))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
