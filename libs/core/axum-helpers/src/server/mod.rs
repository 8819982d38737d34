//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with the OpenAPI document and common middleware
//! - Health and readiness endpoints
//! - Graceful shutdown
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{Environment, app_info, server::ServerConfig};
//!
//! let router = create_router::<ApiDoc>(api_routes, &Environment::from_env())?
//!     .merge(health_router(app_info!()));
//!
//! create_app(router, &ServerConfig::default(), async { db.close().await.ok(); }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{OPENAPI_PATH, create_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::shutdown_signal;
