//! Product attribute models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A classifying dimension (e.g. Color) with an ordered set of values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    pub id: Uuid,
    pub name: String,
    pub values: Vec<AttributeValue>,
}

/// A single value of an attribute (e.g. "Red")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: Uuid,
    pub name: String,
    pub display_name: Option<String>,
}

impl AttributeValue {
    /// Name shown in the UI, falling back to the raw name
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

impl Attribute {
    /// Look up the display label for one of this attribute's values
    pub fn value_label(&self, value_id: Uuid) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.id == value_id)
            .map(|v| v.label())
    }
}
