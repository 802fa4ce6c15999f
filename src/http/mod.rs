//! HTTP API layer: router assembly and application state.

pub mod cart;
pub mod coerce;
pub mod orders;
pub mod products;
pub mod users;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::AuthKeys;
use crate::error::ApiError;
use crate::store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub keys: Arc<AuthKeys>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/:id",
            get(products::get_one)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/api/register", post(users::register))
        .route("/api/login", post(users::login))
        .route("/api/cart", get(cart::get_cart).post(cart::add_item))
        .route("/api/orders", post(orders::place))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "boutique-api" }))
}

async fn fallback() -> ApiError {
    ApiError::NotFound("no such endpoint".into())
}
