//! apidrift HTTP server
//!
//! Exposes the schema diff engine, the endpoint comparator and alert
//! dispatch as a JSON API:
//!
//! - `GET /health`
//! - `POST /diff`
//! - `POST /endpoints/diff`
//! - `POST /alerts`

pub mod config;
pub mod diff_routes;
pub mod error;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use diff_routes::DriftState;
pub use error::ApiError;
pub use server::HttpServer;
