//! Analytics HTTP Routes
//!
//! `GET /analytics/disease_probabilities` returns the frequency
//! distribution of `medical_condition` over the whole table.

use axum::{extract::State, routing::get, Json, Router};

use super::errors::ApiResult;
use super::SharedStore;
use crate::analytics::disease_probabilities;
use crate::model::ConditionFrequency;
use crate::observability::ObservationScope;

/// Create analytics routes (nested under `/analytics`)
pub fn analytics_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/disease_probabilities", get(disease_probabilities_handler))
        .with_state(store)
}

async fn disease_probabilities_handler(
    State(store): State<SharedStore>,
) -> ApiResult<Json<Vec<ConditionFrequency>>> {
    let scope = ObservationScope::new("DISEASE_PROBABILITIES");

    let counts = match store.condition_counts().await {
        Ok(counts) => counts,
        Err(e) => {
            scope.fail(&e.to_string());
            return Err(e.into());
        }
    };

    let total = counts.total.to_string();
    let distribution = disease_probabilities(counts.total, counts.groups);
    let conditions = distribution.len().to_string();

    scope.complete_with_fields(&[("total", total.as_str()), ("conditions", conditions.as_str())]);
    Ok(Json(distribution))
}
