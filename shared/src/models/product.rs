//! Product and variant models

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::QuantityFilter;

/// Fixed fallback image served by the host when a product has no image
pub const PLACEHOLDER_IMAGE_URL: &str = "/static/img/product-placeholder.png";

/// A product or variant name as delivered by the report endpoint
///
/// Names arrive either as a plain string or as a language-keyed map,
/// depending on whether translations are installed on the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LocalizedName {
    Plain(String),
    Localized(BTreeMap<String, String>),
}

impl LocalizedName {
    /// Resolve the name to display: English translations win, then the
    /// first available translation, then a fixed fallback.
    pub fn display(&self) -> &str {
        match self {
            LocalizedName::Plain(s) if !s.is_empty() => s,
            LocalizedName::Localized(map) => map
                .iter()
                .find(|(lang, _)| lang.starts_with("en"))
                .or_else(|| map.iter().next())
                .map(|(_, name)| name.as_str())
                .unwrap_or("Product"),
            _ => "Product",
        }
    }
}

impl Default for LocalizedName {
    fn default() -> Self {
        LocalizedName::Plain(String::new())
    }
}

impl From<&str> for LocalizedName {
    fn from(s: &str) -> Self {
        LocalizedName::Plain(s.to_string())
    }
}

/// A product template with its sellable variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: LocalizedName,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub variants: Vec<Variant>,
}

/// A concrete sellable item defined by a combination of attribute values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: Uuid,
    pub name: LocalizedName,
    pub default_code: Option<String>,
    pub qty_available: Decimal,
    pub virtual_available: Decimal,
    /// Quantity shown in the grid, resolved per the config's forecast mode
    pub display_qty: Decimal,
    pub qty_reserved: Decimal,
    pub incoming_qty: Decimal,
    pub outgoing_qty: Decimal,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    /// Attribute id -> attribute value id for this variant
    #[serde(default)]
    pub attributes: HashMap<Uuid, Uuid>,
}

impl Variant {
    /// Quantity to report for the given display mode
    pub fn qty_for(&self, use_forecast: bool) -> Decimal {
        if use_forecast {
            self.virtual_available
        } else {
            self.qty_available
        }
    }

    /// Whether this variant falls into the given quantity bucket
    pub fn matches_filter(&self, filter: QuantityFilter) -> bool {
        match filter {
            QuantityFilter::All => true,
            QuantityFilter::Negative => self.display_qty < Decimal::ZERO,
            QuantityFilter::Zero => self.display_qty == Decimal::ZERO,
            QuantityFilter::Positive => self.display_qty > Decimal::ZERO,
            QuantityFilter::Reserved => self.qty_reserved > Decimal::ZERO,
            QuantityFilter::Replenishment => self.incoming_qty > Decimal::ZERO,
            QuantityFilter::Outgoing => self.outgoing_qty > Decimal::ZERO,
        }
    }

    /// Whether the search term matches this variant's name or reference
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.display().to_lowercase().contains(term)
            || self
                .default_code
                .as_deref()
                .map(|code| code.to_lowercase().contains(term))
                .unwrap_or(false)
    }
}

impl Product {
    /// Whether the search term matches the product or any of its variants
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.display().to_lowercase().contains(term)
            || self.variants.iter().any(|v| v.matches_search(term))
    }

    /// True when at least one variant carries a nonzero display quantity
    pub fn has_nonzero_variant(&self) -> bool {
        self.variants
            .iter()
            .any(|v| v.display_qty != Decimal::ZERO)
    }

    /// True when every variant's display quantity is non-negative
    pub fn all_variants_non_negative(&self) -> bool {
        self.variants
            .iter()
            .all(|v| v.display_qty >= Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_displays_as_is() {
        let name = LocalizedName::from("Red Shirt");
        assert_eq!(name.display(), "Red Shirt");
    }

    #[test]
    fn localized_name_prefers_english() {
        let mut map = BTreeMap::new();
        map.insert("de_DE".to_string(), "Rotes Hemd".to_string());
        map.insert("en_US".to_string(), "Red Shirt".to_string());
        let name = LocalizedName::Localized(map);
        assert_eq!(name.display(), "Red Shirt");
    }

    #[test]
    fn localized_name_falls_back_to_first_translation() {
        let mut map = BTreeMap::new();
        map.insert("de_DE".to_string(), "Rotes Hemd".to_string());
        map.insert("fr_FR".to_string(), "Chemise rouge".to_string());
        let name = LocalizedName::Localized(map);
        assert_eq!(name.display(), "Rotes Hemd");
    }

    #[test]
    fn empty_name_falls_back() {
        assert_eq!(LocalizedName::default().display(), "Product");
        assert_eq!(LocalizedName::Localized(BTreeMap::new()).display(), "Product");
    }

    #[test]
    fn name_deserializes_from_string_or_map() {
        let plain: LocalizedName = serde_json::from_str(r#""Red Shirt""#).unwrap();
        assert_eq!(plain.display(), "Red Shirt");

        let localized: LocalizedName =
            serde_json::from_str(r#"{"en_US": "Red Shirt", "de_DE": "Rotes Hemd"}"#).unwrap();
        assert_eq!(localized.display(), "Red Shirt");
    }
}
