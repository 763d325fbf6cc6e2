//! Dashboard HTTP Routes
//!
//! `GET /dashboard` renders the first `DASHBOARD_LIMIT` records as an
//! HTML table.

use axum::{extract::State, response::Html, routing::get, Router};

use super::errors::{ApiError, ApiResult};
use super::SharedStore;
use crate::dashboard::render_dashboard;
use crate::observability::ObservationScope;

/// Row cap for the dashboard
pub const DASHBOARD_LIMIT: usize = 50;

/// Create dashboard routes
pub fn dashboard_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .with_state(store)
}

async fn dashboard_handler(State(store): State<SharedStore>) -> ApiResult<Html<String>> {
    let scope = ObservationScope::new("DASHBOARD");

    let page = store
        .list_patients(None, DASHBOARD_LIMIT)
        .await
        .map_err(ApiError::from)
        .and_then(|rows| {
            render_dashboard(&rows)
                .map(|html| (rows.len(), html))
                .map_err(|e| ApiError::Render(e.to_string()))
        });

    match page {
        Ok((rows, html)) => {
            scope.complete_with_fields(&[("rows", rows.to_string().as_str())]);
            Ok(Html(html))
        }
        Err(e) => {
            scope.fail(&e.to_string());
            Err(e)
        }
    }
}
