//! Cart routes for the authenticated caller.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::CartItem;
use crate::error::ApiResult;
use crate::http::{coerce, AppState};
use crate::store::{CatalogStore, IdentityStore};

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Vec<CartItem>,
}

pub async fn get_cart(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> ApiResult<Json<CartResponse>> {
    let cart = state.store.cart(claims.sub)?;
    Ok(Json(CartResponse {
        cart: cart.items().to_vec(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItem {
    pub product_id: Uuid,
    #[serde(default, deserialize_with = "coerce::opt_i64")]
    pub quantity: Option<i64>,
}

pub async fn add_item(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<AddItem>,
) -> ApiResult<Json<CartResponse>> {
    // absent or non-positive quantity means one unit
    let quantity = payload
        .quantity
        .filter(|q| *q > 0)
        .map_or(1, |q| u32::try_from(q).unwrap_or(u32::MAX));
    let product = state.store.get(payload.product_id)?;
    let cart = state.store.add_cart_item(claims.sub, &product, quantity)?;
    Ok(Json(CartResponse {
        cart: cart.items().to_vec(),
    }))
}
