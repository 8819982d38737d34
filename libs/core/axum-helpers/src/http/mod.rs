//! HTTP middleware module.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::cors_layer;
//! use core_config::Environment;
//!
//! let app = Router::new().layer(cors_layer(&Environment::from_env())?);
//! ```

pub mod cors;

pub use cors::{cors_layer, create_cors_layer, create_permissive_cors_layer};
