//! Observability for medboard
//!
//! - Structured logging (JSON lines)
//! - Begin/complete scopes around datastore-backed operations
//!
//! ```ignore
//! use medboard::observability::{Logger, ObservationScope};
//!
//! Logger::info("SERVER_START", &[("addr", "0.0.0.0:8080")]);
//!
//! let scope = ObservationScope::new("DISEASE_PROBABILITIES");
//! // ... do work ...
//! scope.complete();
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::ObservationScope;
