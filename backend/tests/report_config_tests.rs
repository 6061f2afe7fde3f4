//! Report configuration tests
//!
//! Tests for configuration validation and the defaults new configs get.

use uuid::Uuid;

use shared::models::LocalizedName;
use shared::validation::{validate_attribute_selection, validate_config_name};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test name validation
    #[test]
    fn test_config_name_validation() {
        assert!(validate_config_name("Size / Color").is_ok());
        assert!(validate_config_name("").is_err());
        assert!(validate_config_name("   ").is_err());
        assert!(validate_config_name(&"x".repeat(200)).is_err());
    }

    /// Test axis selection validation
    #[test]
    fn test_attribute_selection_validation() {
        let primary = Uuid::new_v4();

        // A single axis is a valid flat-list configuration
        assert!(validate_attribute_selection(primary, None).is_ok());

        // Two distinct axes form a matrix
        assert!(validate_attribute_selection(primary, Some(Uuid::new_v4())).is_ok());

        // The same attribute on both axes is rejected
        assert!(validate_attribute_selection(primary, Some(primary)).is_err());
    }

    /// Test configuration defaults
    #[test]
    fn test_config_defaults() {
        // Defaults applied by the create path
        let use_forecast = false;
        let filter_zero = true;
        let include_negative = true;
        let sequence = 10;

        assert!(!use_forecast);
        assert!(filter_zero);
        assert!(include_negative);
        assert_eq!(sequence, 10);
    }

    /// Test localized name resolution for config-driven displays
    #[test]
    fn test_name_resolution() {
        let plain = LocalizedName::from("Red Shirt");
        assert_eq!(plain.display(), "Red Shirt");

        let map: std::collections::BTreeMap<String, String> = [
            ("de_DE".to_string(), "Rotes Hemd".to_string()),
            ("en_US".to_string(), "Red Shirt".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(LocalizedName::Localized(map).display(), "Red Shirt");
    }
}
