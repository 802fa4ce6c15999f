//! Boutique API
//!
//! Small e-commerce backend:
//! - Product catalog with filtered, paginated, searchable listing
//! - User registration and login with 7-day bearer tokens
//! - Per-user shopping cart with quantity merging
//! - Order placement from a non-empty cart
//!
//! Persistence sits behind the store traits in [`store`]; the crate
//! ships a single in-memory engine.

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod store;
