//! Password hashing, access tokens and request authentication.

use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Role, User};
use crate::error::ApiError;
use crate::http::AppState;

/// Tokens are valid for 7 days from issuance.
const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Token payload: identity plus role claim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// HMAC keys derived from the configured secret.
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

pub fn issue_token(keys: &AuthKeys, user: &User) -> Result<String, ApiError> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };
    jsonwebtoken::encode(&Header::default(), &claims, &keys.encoding)
        .map_err(|e| ApiError::Internal(anyhow!("token signing failed: {e}")))
}

/// A present-but-bad token is Forbidden; a missing one is Unauthorized
/// (checked by the extractor before this is called).
pub fn verify_token(keys: &AuthKeys, token: &str) -> Result<Claims, ApiError> {
    jsonwebtoken::decode::<Claims>(token, &keys.decoding, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| ApiError::Forbidden("invalid or expired token".into()))
}

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ApiError::Internal(anyhow!("password hashing failed")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Fixed hash verified on the unknown-email login path, so a miss
/// costs the same as a wrong password and response timing does not
/// reveal which accounts exist.
fn padding_hash() -> &'static str {
    static PADDING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    PADDING.get_or_init(|| hash_password("login-padding").unwrap_or_default())
}

pub fn equalize_verify_cost(password: &str) {
    let _ = verify_password(password, padding_hash());
}

/// Extractor for routes that require a logged-in user.
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("access token required".into()))?;
        let claims = verify_token(&state.keys, bearer)?;
        Ok(Self(claims))
    }
}

/// Extractor for admin-only routes.
pub struct AdminUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if claims.role != Role::Admin {
            return Err(ApiError::Forbidden("admin access required".into()));
        }
        Ok(Self(claims))
    }
}
