//! In-memory patient store
//!
//! Holds a fixed record set and mirrors the PostgreSQL store's semantics:
//! exact-match filter, id ordering, row cap. Can be switched to an
//! unavailable mode that fails every call the way an unreachable
//! datastore would.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::errors::{StoreError, StoreResult};
use super::{ConditionCounts, PatientStore};
use crate::model::PatientRecord;

#[derive(Debug, Clone, Default)]
pub struct MemoryPatientStore {
    records: Vec<PatientRecord>,
    unavailable: bool,
}

impl MemoryPatientStore {
    pub fn new(mut records: Vec<PatientRecord>) -> Self {
        records.sort_by_key(|r| r.id);
        Self {
            records,
            unavailable: false,
        }
    }

    /// A store whose every call fails with a connection error
    pub fn unavailable() -> Self {
        Self {
            records: Vec::new(),
            unavailable: true,
        }
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::Connect("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PatientStore for MemoryPatientStore {
    async fn list_patients(
        &self,
        condition: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<PatientRecord>> {
        self.check_available()?;

        Ok(self
            .records
            .iter()
            .filter(|r| condition.map_or(true, |c| r.medical_condition.as_deref() == Some(c)))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn condition_counts(&self) -> StoreResult<ConditionCounts> {
        self.check_available()?;

        let mut counts: BTreeMap<Option<&str>, u64> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.medical_condition.as_deref()).or_default() += 1;
        }

        Ok(ConditionCounts {
            total: self.records.len() as u64,
            groups: counts
                .into_iter()
                .map(|(condition, n)| (condition.map(str::to_string), n))
                .collect(),
        })
    }
}
