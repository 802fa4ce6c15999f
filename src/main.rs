//! Boutique API server entry point.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boutique_api::auth::{hash_password, AuthKeys};
use boutique_api::config::Config;
use boutique_api::domain::{Role, User};
use boutique_api::error::ApiError;
use boutique_api::http::{router, AppState};
use boutique_api::store::{IdentityStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let store = Arc::new(MemoryStore::new());

    // The store starts empty; an env-provided admin account makes the
    // admin-only catalog routes usable from the first request.
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        let admin = User::new("Admin", email.clone(), hash_password(password)?, Role::Admin);
        match store.insert_user(admin) {
            Ok(()) => tracing::info!(%email, "bootstrap admin created"),
            Err(ApiError::Conflict(_)) => tracing::info!(%email, "bootstrap admin already present"),
            Err(e) => return Err(e.into()),
        }
    }

    let state = AppState {
        store,
        keys: Arc::new(AuthKeys::new(&config.jwt_secret)),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("boutique-api listening on 0.0.0.0:{}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
