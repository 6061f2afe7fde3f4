//! HTTP handlers for report configuration management

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::models::{CreateReportConfigInput, ReportConfig, UpdateReportConfigInput};

use crate::error::AppResult;
use crate::services::ReportConfigService;
use crate::AppState;

/// List active report configurations
pub async fn list_configs(State(state): State<AppState>) -> AppResult<Json<Vec<ReportConfig>>> {
    let service = ReportConfigService::new(state.db.clone());
    let configs = service.list().await?;
    Ok(Json(configs))
}

/// Get a report configuration
pub async fn get_config(
    State(state): State<AppState>,
    Path(config_id): Path<Uuid>,
) -> AppResult<Json<ReportConfig>> {
    let service = ReportConfigService::new(state.db.clone());
    let config = service.get(config_id).await?;
    Ok(Json(config))
}

/// Create a report configuration
pub async fn create_config(
    State(state): State<AppState>,
    Json(input): Json<CreateReportConfigInput>,
) -> AppResult<Json<ReportConfig>> {
    let service = ReportConfigService::new(state.db.clone());
    let config = service.create(input).await?;
    Ok(Json(config))
}

/// Update a report configuration
pub async fn update_config(
    State(state): State<AppState>,
    Path(config_id): Path<Uuid>,
    Json(input): Json<UpdateReportConfigInput>,
) -> AppResult<Json<ReportConfig>> {
    let service = ReportConfigService::new(state.db.clone());
    let config = service.update(config_id, input).await?;
    Ok(Json(config))
}

/// Delete a report configuration
pub async fn delete_config(
    State(state): State<AppState>,
    Path(config_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ReportConfigService::new(state.db.clone());
    service.delete(config_id).await?;
    Ok(Json(()))
}
