//! Catalog routes. Reads are public, mutations are admin-only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::AdminUser;
use crate::domain::{Product, ProductFilter};
use crate::error::{ApiError, ApiResult};
use crate::http::{coerce, AppState};
use crate::store::{CatalogStore, ProductPatch};

const DEFAULT_PAGE_SIZE: usize = 12;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ProductPage>> {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let filter = ProductFilter {
        category: params.category,
        featured: params.featured,
        search: params.search,
    };
    let (products, total) = state.store.list(&filter, page, page_size)?;
    Ok(Json(ProductPage {
        products,
        total,
        total_pages: total.div_ceil(page_size),
        current_page: page,
    }))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.get(id)?))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "coerce::i64")]
    #[validate(range(min = 0, message = "price must be non-negative"))]
    pub price: i64,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, deserialize_with = "coerce::opt_u32")]
    pub stock: Option<u32>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub featured: Option<bool>,
}

pub async fn create(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(payload): Json<CreateProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let product = Product::new(
        payload.name,
        payload.description,
        payload.price,
        payload.category,
        payload.image,
        payload.stock.unwrap_or(0),
        payload.featured.unwrap_or(false),
    );
    let product = state.store.create(product)?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_i64")]
    #[validate(range(min = 0, message = "price must be non-negative"))]
    pub price: Option<i64>,
    pub category: Option<String>,
    pub image: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_u32")]
    pub stock: Option<u32>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub featured: Option<bool>,
}

pub async fn update(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProduct>,
) -> ApiResult<Json<Product>> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let patch = ProductPatch {
        name: payload.name,
        description: payload.description,
        price: payload.price,
        category: payload.category,
        image: payload.image,
        stock: payload.stock,
        featured: payload.featured,
    };
    Ok(Json(state.store.update(id, patch)?))
}

pub async fn remove(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.store.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
