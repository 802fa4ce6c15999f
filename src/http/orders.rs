//! Order placement.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::Address;
use crate::error::ApiResult;
use crate::http::AppState;
use crate::store::OrderStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub shipping_address: Address,
    pub payment_method: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlaced {
    pub order_id: Uuid,
    pub total_amount: i64,
}

pub async fn place(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<PlaceOrder>,
) -> ApiResult<(StatusCode, Json<OrderPlaced>)> {
    let order = state
        .store
        .place_order(claims.sub, payload.shipping_address, payload.payment_method)?;
    tracing::info!(
        order_id = %order.id,
        user_id = %order.user_id,
        total = order.total_amount,
        "order placed"
    );
    Ok((
        StatusCode::CREATED,
        Json(OrderPlaced {
            order_id: order.id,
            total_amount: order.total_amount,
        }),
    ))
}
