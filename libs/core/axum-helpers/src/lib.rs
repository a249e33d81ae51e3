//! # Axum Helpers
//!
//! Utilities shared by the HTTP-facing binaries.
//!
//! ## Modules
//!
//! - **[`auth`]**: Bearer extraction and shared-secret trigger tokens
//! - **[`server`]**: Router setup, health endpoint, graceful shutdown
//! - **[`errors`]**: Structured error responses with error codes
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes);
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod server;

// Re-export auth types
pub use auth::{bearer_token, TriggerToken};

// Re-export server types
pub use server::{create_app, create_router, health_router, shutdown_signal, HealthResponse};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};
