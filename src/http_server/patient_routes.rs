//! Patient HTTP Routes
//!
//! `GET /patients[?condition=<name>]` lists up to `PATIENT_LIST_LIMIT`
//! records ordered by id. The condition filter is an exact, case-sensitive
//! match; an empty value means no filter. When `condition` is repeated only
//! the first value counts.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use super::errors::ApiResult;
use super::SharedStore;
use crate::model::PatientRecord;
use crate::observability::ObservationScope;

/// Row cap for the listing endpoint
pub const PATIENT_LIST_LIMIT: usize = 100;

#[derive(Debug, Default)]
pub struct PatientsQuery {
    pub condition: Option<String>,
}

impl PatientsQuery {
    /// Build from the raw query string pairs, keeping the first `condition`
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            condition: pairs
                .into_iter()
                .find(|(key, _)| key == "condition")
                .map(|(_, value)| value),
        }
    }

    /// The filter to apply, if any
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref().filter(|c| !c.is_empty())
    }
}

/// Create patient routes
pub fn patient_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/patients", get(list_patients_handler))
        .with_state(store)
}

async fn list_patients_handler(
    State(store): State<SharedStore>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Vec<PatientRecord>>> {
    let query = PatientsQuery::from_pairs(pairs);
    let condition = query.condition();
    let scope =
        ObservationScope::with_fields("LIST_PATIENTS", &[("condition", condition.unwrap_or(""))]);

    match store.list_patients(condition, PATIENT_LIST_LIMIT).await {
        Ok(records) => {
            scope.complete_with_fields(&[("rows", records.len().to_string().as_str())]);
            Ok(Json(records))
        }
        Err(e) => {
            scope.fail(&e.to_string());
            Err(e.into())
        }
    }
}
