//! Environment configuration

use anyhow::{Context, Result};

/// Runtime configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// HMAC secret for access tokens. Startup fails without it.
    pub jwt_secret: String,
    /// Optional bootstrap admin account, created on an empty store so
    /// the admin-only catalog routes are usable from the first request.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .context("JWT_SECRET must be set (used to sign access tokens)")?;
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;
        Ok(Self {
            port,
            jwt_secret,
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        })
    }
}
