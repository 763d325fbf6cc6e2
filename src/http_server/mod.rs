//! # medboard HTTP Server Module
//!
//! Combines all endpoint routers into a single Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Liveness check, no datastore access
//! - `/patients` - Patient listing with optional condition filter
//! - `/analytics/disease_probabilities` - Condition frequency distribution
//! - `/dashboard` - HTML table of patient records

pub mod analytics_routes;
pub mod config;
pub mod dashboard_routes;
pub mod errors;
pub mod health_routes;
pub mod patient_routes;
pub mod request_log;
pub mod server;

use std::sync::Arc;

use crate::store::PatientStore;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;

/// Store handle shared by every handler
pub type SharedStore = Arc<dyn PatientStore>;
