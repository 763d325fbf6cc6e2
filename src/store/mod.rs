//! # Patient Store
//!
//! Read-only access to the `patients` table.
//!
//! - `PgPatientStore` opens one scoped PostgreSQL connection per call
//! - `MemoryPatientStore` serves a fixed set of records, used by tests

pub mod config;
pub mod errors;
pub mod memory;
pub mod postgres;

pub use config::DatabaseConfig;
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryPatientStore;
pub use postgres::PgPatientStore;

use async_trait::async_trait;

use crate::analytics::ConditionGroup;
use crate::model::PatientRecord;

/// Row count plus per-condition group counts, taken from one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionCounts {
    pub total: u64,
    pub groups: Vec<ConditionGroup>,
}

/// Read operations the HTTP layer needs from the datastore
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Up to `limit` records ordered by id, optionally restricted to an exact
    /// `medical_condition` match. Rows with a NULL condition never match a filter.
    async fn list_patients(
        &self,
        condition: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<PatientRecord>>;

    /// Total row count and the count of every distinct condition, NULL included
    async fn condition_counts(&self) -> StoreResult<ConditionCounts>;
}
