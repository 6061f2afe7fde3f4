//! Report configuration models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved report configuration
///
/// Selects the one or two attributes that classify the grid and the
/// display-time suppression rules. Loaded once per view session and
/// treated as read-only by the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub id: Uuid,
    pub name: String,
    pub primary_attribute_id: Uuid,
    pub secondary_attribute_id: Option<Uuid>,
    /// Display forecasted quantities instead of on-hand
    pub use_forecast: bool,
    /// Hide products whose variants are all at zero
    pub filter_zero: bool,
    /// Keep products with negative variant quantities
    pub include_negative: bool,
    pub active: bool,
    pub sequence: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReportConfig {
    /// Whether the config classifies variants along two axes
    pub fn has_matrix_axes(&self) -> bool {
        self.secondary_attribute_id.is_some()
    }

    /// The attribute ids this config reports on, primary first
    pub fn attribute_ids(&self) -> Vec<Uuid> {
        let mut ids = vec![self.primary_attribute_id];
        ids.extend(self.secondary_attribute_id);
        ids
    }
}

/// Input for creating a report configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReportConfigInput {
    pub name: String,
    pub primary_attribute_id: Uuid,
    pub secondary_attribute_id: Option<Uuid>,
    pub use_forecast: Option<bool>,
    pub filter_zero: Option<bool>,
    pub include_negative: Option<bool>,
    pub sequence: Option<i32>,
}

/// Input for updating a report configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReportConfigInput {
    pub name: Option<String>,
    pub primary_attribute_id: Option<Uuid>,
    pub secondary_attribute_id: Option<Option<Uuid>>,
    pub use_forecast: Option<bool>,
    pub filter_zero: Option<bool>,
    pub include_negative: Option<bool>,
    pub active: Option<bool>,
    pub sequence: Option<i32>,
}
