//! Report payload models and quantity classification

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Attribute, Product};
use crate::types::PaginationMeta;

/// Quantity bucket selectable in the grid's filter dropdown
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuantityFilter {
    #[default]
    All,
    Negative,
    Zero,
    Positive,
    Reserved,
    Replenishment,
    Outgoing,
}

impl QuantityFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityFilter::All => "all",
            QuantityFilter::Negative => "negative",
            QuantityFilter::Zero => "zero",
            QuantityFilter::Positive => "positive",
            QuantityFilter::Reserved => "reserved",
            QuantityFilter::Replenishment => "replenishment",
            QuantityFilter::Outgoing => "outgoing",
        }
    }
}

/// Visual classification of a quantity cell
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuantityClass {
    /// Negative stock
    StrongRed,
    /// Exactly zero
    LightRed,
    /// Up to 2 units
    LightYellow,
    /// Up to 4 units
    LightGreen,
    /// Up to 7 units
    StrongGreen,
    /// More than 7 units
    StrongBlue,
}

impl QuantityClass {
    /// CSS class applied to the quantity badge
    pub fn css_class(&self) -> &'static str {
        match self {
            QuantityClass::StrongRed => "qty-available strong-red",
            QuantityClass::LightRed => "qty-available light-red",
            QuantityClass::LightYellow => "qty-available light-yellow",
            QuantityClass::LightGreen => "qty-available light-green",
            QuantityClass::StrongGreen => "qty-available strong-green",
            QuantityClass::StrongBlue => "qty-available strong-blue",
        }
    }
}

/// Classify a quantity into its display bucket
///
/// Buckets are contiguous and exhaustive: every quantity, fractional or
/// not, maps to exactly one class.
pub fn classify_quantity(qty: Decimal) -> QuantityClass {
    if qty < Decimal::ZERO {
        QuantityClass::StrongRed
    } else if qty == Decimal::ZERO {
        QuantityClass::LightRed
    } else if qty <= Decimal::from(2) {
        QuantityClass::LightYellow
    } else if qty <= Decimal::from(4) {
        QuantityClass::LightGreen
    } else if qty <= Decimal::from(7) {
        QuantityClass::StrongGreen
    } else {
        QuantityClass::StrongBlue
    }
}

/// Format a quantity for display, always with two decimals
pub fn format_qty(qty: Decimal) -> String {
    format!("{:.2}", qty)
}

/// Payload returned by the report data endpoint
///
/// Backend-reported logical failures set `error` and leave the data fields
/// in their empty shape, so the controller always has something to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    pub pagination: PaginationMeta,
}

impl ReportData {
    /// An empty payload for configs with no matching products
    pub fn empty() -> Self {
        Self {
            error: None,
            products: Vec::new(),
            attributes: Vec::new(),
            pagination: PaginationMeta::empty(),
        }
    }

    /// An error payload with the empty data shape
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn classify_boundary_values() {
        assert_eq!(classify_quantity(dec("-0.01")), QuantityClass::StrongRed);
        assert_eq!(classify_quantity(Decimal::ZERO), QuantityClass::LightRed);
        assert_eq!(classify_quantity(dec("0.5")), QuantityClass::LightYellow);
        assert_eq!(classify_quantity(dec("2")), QuantityClass::LightYellow);
        assert_eq!(classify_quantity(dec("2.5")), QuantityClass::LightGreen);
        assert_eq!(classify_quantity(dec("4")), QuantityClass::LightGreen);
        assert_eq!(classify_quantity(dec("4.01")), QuantityClass::StrongGreen);
        assert_eq!(classify_quantity(dec("7")), QuantityClass::StrongGreen);
        assert_eq!(classify_quantity(dec("7.01")), QuantityClass::StrongBlue);
        assert_eq!(classify_quantity(dec("100")), QuantityClass::StrongBlue);
    }

    #[test]
    fn quantities_format_with_two_decimals() {
        assert_eq!(format_qty(Decimal::ZERO), "0.00");
        assert_eq!(format_qty(dec("1.5")), "1.50");
        assert_eq!(format_qty(dec("-3.1")), "-3.10");
    }

    #[test]
    fn classify_integer_buckets() {
        assert_eq!(classify_quantity(dec("1")), QuantityClass::LightYellow);
        assert_eq!(classify_quantity(dec("3")), QuantityClass::LightGreen);
        assert_eq!(classify_quantity(dec("5")), QuantityClass::StrongGreen);
        assert_eq!(classify_quantity(dec("8")), QuantityClass::StrongBlue);
    }

    proptest! {
        /// Every quantity maps to exactly one class, and neighbouring
        /// buckets share no values.
        #[test]
        fn classification_is_exhaustive(units in -100_000i64..100_000i64) {
            // Hundredths cover the fractional boundaries
            let qty = Decimal::new(units, 2);
            let class = classify_quantity(qty);

            let expected = if qty < Decimal::ZERO {
                QuantityClass::StrongRed
            } else if qty == Decimal::ZERO {
                QuantityClass::LightRed
            } else if qty <= dec("2") {
                QuantityClass::LightYellow
            } else if qty <= dec("4") {
                QuantityClass::LightGreen
            } else if qty <= dec("7") {
                QuantityClass::StrongGreen
            } else {
                QuantityClass::StrongBlue
            };
            prop_assert_eq!(class, expected);
        }
    }
}
