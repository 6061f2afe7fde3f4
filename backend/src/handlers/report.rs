//! HTTP handler for the report data endpoint

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::models::ReportData;
use shared::validation::sanitize_pagination;

use crate::services::ReportService;
use crate::AppState;

#[derive(Deserialize)]
pub struct ReportDataQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
}

/// Get one page of report data for a configuration.
///
/// Service failures are folded into the payload's `error` field so the
/// grid can always render something; the HTTP status stays 200.
pub async fn get_report_data(
    State(state): State<AppState>,
    Path(config_id): Path<Uuid>,
    Query(query): Query<ReportDataQuery>,
) -> Json<ReportData> {
    let service = ReportService::new(state.db.clone());
    let pagination = sanitize_pagination(query.page, query.page_size);
    let search = query.search.unwrap_or_default();

    match service
        .get_report_data(config_id, pagination, &search)
        .await
    {
        Ok(data) => Json(data),
        Err(err) => {
            tracing::error!(%config_id, error = %err, "failed to build report data");
            Json(ReportData::from_error(err.to_string()))
        }
    }
}
