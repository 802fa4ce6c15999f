//! Registration and login.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth;
use crate::domain::{PublicUser, Role, User};
use crate::error::{ApiError, ApiResult};
use crate::http::AppState;
use crate::store::IdentityStore;

/// One message for unknown email and wrong password, so responses do
/// not reveal which accounts exist.
const INVALID_CREDENTIALS: &str = "invalid email or password";

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let hash = auth::hash_password(&payload.password)?;
    let user = User::new(payload.name, payload.email, hash, Role::Customer);
    let public = PublicUser::from(&user);
    let token = auth::issue_token(&state.keys, &user)?;
    state.store.insert_user(user)?;
    tracing::info!(user_id = %public.id, "user registered");
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user: public })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> ApiResult<Json<AuthResponse>> {
    let Some(user) = state.store.find_by_email(&payload.email)? else {
        // burn a hash verification so the miss is not faster than a
        // wrong password
        auth::equalize_verify_cost(&payload.password);
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.into()));
    };
    if !auth::verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.into()));
    }
    let token = auth::issue_token(&state.keys, &user)?;
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}
