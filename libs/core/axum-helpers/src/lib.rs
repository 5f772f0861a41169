//! # Axum Helpers
//!
//! Shared plumbing for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`auth`]**: HTTP Basic credential extraction
//! - **[`server`]**: Router assembly, health endpoint, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: `{message, cause?}` error responses
//! - **[`audit`]**: Audit logging for security-relevant actions
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let apis = api_routes.merge(health_router(app_info!()));
//!     let router = create_router::<ApiDoc>(apis, &config)?;
//!     create_production_app(router, &config, async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod http;
pub mod server;

pub use auth::{AUTHENTICATION_FAILED, BasicAuth};

pub use server::{
    HealthResponse, ShutdownCoordinator, create_production_app, create_router, health_router,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorResponse};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers};
