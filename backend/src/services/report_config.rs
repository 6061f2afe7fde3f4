//! Report configuration service

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::{CreateReportConfigInput, ReportConfig, UpdateReportConfigInput};
use shared::validation::{validate_attribute_selection, validate_config_name};

use crate::error::{AppError, AppResult};

/// Service for managing report configurations
#[derive(Clone)]
pub struct ReportConfigService {
    db: PgPool,
}

/// Database row for a report configuration
#[derive(Debug, FromRow)]
struct ConfigRow {
    id: Uuid,
    name: String,
    primary_attribute_id: Uuid,
    secondary_attribute_id: Option<Uuid>,
    use_forecast: bool,
    filter_zero: bool,
    include_negative: bool,
    active: bool,
    sequence: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ConfigRow> for ReportConfig {
    fn from(row: ConfigRow) -> Self {
        ReportConfig {
            id: row.id,
            name: row.name,
            primary_attribute_id: row.primary_attribute_id,
            secondary_attribute_id: row.secondary_attribute_id,
            use_forecast: row.use_forecast,
            filter_zero: row.filter_zero,
            include_negative: row.include_negative,
            active: row.active,
            sequence: row.sequence,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const CONFIG_COLUMNS: &str = "id, name, primary_attribute_id, secondary_attribute_id, \
     use_forecast, filter_zero, include_negative, active, sequence, created_at, updated_at";

impl ReportConfigService {
    /// Create a new ReportConfigService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List active configurations, in menu order
    pub async fn list(&self) -> AppResult<Vec<ReportConfig>> {
        let rows = sqlx::query_as::<_, ConfigRow>(&format!(
            "SELECT {CONFIG_COLUMNS} FROM report_configs WHERE active = true ORDER BY sequence, name"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ReportConfig::from).collect())
    }

    /// Get a configuration by id
    pub async fn get(&self, config_id: Uuid) -> AppResult<ReportConfig> {
        self.find(config_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Report configuration".to_string()))
    }

    /// Look up a configuration, returning `None` when it does not exist
    pub async fn find(&self, config_id: Uuid) -> AppResult<Option<ReportConfig>> {
        let row = sqlx::query_as::<_, ConfigRow>(&format!(
            "SELECT {CONFIG_COLUMNS} FROM report_configs WHERE id = $1"
        ))
        .bind(config_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(ReportConfig::from))
    }

    /// Create a configuration
    pub async fn create(&self, input: CreateReportConfigInput) -> AppResult<ReportConfig> {
        validate_config_name(&input.name).map_err(|message| AppError::Validation {
            field: "name".to_string(),
            message: message.to_string(),
        })?;
        validate_attribute_selection(input.primary_attribute_id, input.secondary_attribute_id)
            .map_err(|message| AppError::Validation {
                field: "secondary_attribute_id".to_string(),
                message: message.to_string(),
            })?;

        self.ensure_attributes_exist(input.primary_attribute_id, input.secondary_attribute_id)
            .await?;

        let row = sqlx::query_as::<_, ConfigRow>(&format!(
            r#"
            INSERT INTO report_configs
                (name, primary_attribute_id, secondary_attribute_id,
                 use_forecast, filter_zero, include_negative, sequence)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CONFIG_COLUMNS}
            "#
        ))
        .bind(input.name.trim())
        .bind(input.primary_attribute_id)
        .bind(input.secondary_attribute_id)
        .bind(input.use_forecast.unwrap_or(false))
        .bind(input.filter_zero.unwrap_or(true))
        .bind(input.include_negative.unwrap_or(true))
        .bind(input.sequence.unwrap_or(10))
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a configuration
    pub async fn update(
        &self,
        config_id: Uuid,
        input: UpdateReportConfigInput,
    ) -> AppResult<ReportConfig> {
        let existing = self.get(config_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let primary_attribute_id = input
            .primary_attribute_id
            .unwrap_or(existing.primary_attribute_id);
        let secondary_attribute_id = input
            .secondary_attribute_id
            .unwrap_or(existing.secondary_attribute_id);
        let use_forecast = input.use_forecast.unwrap_or(existing.use_forecast);
        let filter_zero = input.filter_zero.unwrap_or(existing.filter_zero);
        let include_negative = input.include_negative.unwrap_or(existing.include_negative);
        let active = input.active.unwrap_or(existing.active);
        let sequence = input.sequence.unwrap_or(existing.sequence);

        validate_config_name(&name).map_err(|message| AppError::Validation {
            field: "name".to_string(),
            message: message.to_string(),
        })?;
        validate_attribute_selection(primary_attribute_id, secondary_attribute_id).map_err(
            |message| AppError::Validation {
                field: "secondary_attribute_id".to_string(),
                message: message.to_string(),
            },
        )?;

        self.ensure_attributes_exist(primary_attribute_id, secondary_attribute_id)
            .await?;

        let row = sqlx::query_as::<_, ConfigRow>(&format!(
            r#"
            UPDATE report_configs
            SET name = $1, primary_attribute_id = $2, secondary_attribute_id = $3,
                use_forecast = $4, filter_zero = $5, include_negative = $6,
                active = $7, sequence = $8, updated_at = NOW()
            WHERE id = $9
            RETURNING {CONFIG_COLUMNS}
            "#
        ))
        .bind(name.trim())
        .bind(primary_attribute_id)
        .bind(secondary_attribute_id)
        .bind(use_forecast)
        .bind(filter_zero)
        .bind(include_negative)
        .bind(active)
        .bind(sequence)
        .bind(config_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a configuration
    pub async fn delete(&self, config_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM report_configs WHERE id = $1")
            .bind(config_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Report configuration".to_string()));
        }

        Ok(())
    }

    /// Validate that the configured attributes exist
    async fn ensure_attributes_exist(
        &self,
        primary: Uuid,
        secondary: Option<Uuid>,
    ) -> AppResult<()> {
        let mut ids = vec![primary];
        ids.extend(secondary);

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attributes WHERE id = ANY($1)",
        )
        .bind(&ids)
        .fetch_one(&self.db)
        .await?;

        if count != ids.len() as i64 {
            return Err(AppError::NotFound("Attribute".to_string()));
        }

        Ok(())
    }
}
