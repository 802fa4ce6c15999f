//! Order entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::cart::CartItem;
use crate::domain::user::Address;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

/// A placed order. Line items are a frozen copy of the cart at creation
/// time and `total_amount` is computed exactly once, here.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<CartItem>,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub shipping_address: Address,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn from_cart(
        user_id: Uuid,
        items: Vec<CartItem>,
        shipping_address: Address,
        payment_method: impl Into<String>,
    ) -> Self {
        let total_amount = items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.line_total()));
        Self {
            id: Uuid::new_v4(),
            user_id,
            items,
            total_amount,
            status: OrderStatus::Pending,
            shipping_address,
            payment_method: payment_method.into(),
            payment_status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
