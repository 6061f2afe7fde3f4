//! Local display filtering over the fetched product set

use shared::models::{Product, QuantityFilter, ReportConfig};
use shared::validation::normalize_search_term;

/// Apply the grid's display filters to an in-memory product set.
///
/// Pure over its inputs: products pass or fail as a whole, output order
/// preserves input order, and re-applying the same filters to the output
/// yields the output again.
///
/// Filters, in order:
/// - text search over product name, variant names and internal references
/// - the selected quantity bucket (a product passes when any variant does)
/// - config suppression: `filter_zero` drops products with no nonzero
///   variant, `include_negative = false` drops products with any negative
///   variant
pub fn apply_filters(
    products: &[Product],
    search_term: &str,
    filter: QuantityFilter,
    config: Option<&ReportConfig>,
) -> Vec<Product> {
    let term = normalize_search_term(search_term);

    products
        .iter()
        .filter(|product| term.is_empty() || product.matches_search(&term))
        .filter(|product| {
            filter == QuantityFilter::All
                || product.variants.iter().any(|v| v.matches_filter(filter))
        })
        .filter(|product| match config {
            Some(config) => {
                (!config.filter_zero || product.has_nonzero_variant())
                    && (config.include_negative || product.all_variants_non_negative())
            }
            None => true,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use shared::models::{LocalizedName, Variant};
    use std::collections::HashMap;
    use uuid::Uuid;

    fn variant(code: &str, qty: i64) -> Variant {
        Variant {
            id: Uuid::new_v4(),
            name: LocalizedName::from(code),
            default_code: Some(code.to_string()),
            qty_available: Decimal::from(qty),
            virtual_available: Decimal::from(qty),
            display_qty: Decimal::from(qty),
            qty_reserved: Decimal::ZERO,
            incoming_qty: Decimal::ZERO,
            outgoing_qty: Decimal::ZERO,
            image_url: None,
            product_url: None,
            attributes: HashMap::new(),
        }
    }

    fn product(name: &str, variants: Vec<Variant>) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: LocalizedName::from(name),
            image_url: None,
            product_url: None,
            variants,
        }
    }

    fn config(filter_zero: bool, include_negative: bool) -> ReportConfig {
        ReportConfig {
            id: Uuid::new_v4(),
            name: "Size / Color".to_string(),
            primary_attribute_id: Uuid::new_v4(),
            secondary_attribute_id: Some(Uuid::new_v4()),
            use_forecast: false,
            filter_zero,
            include_negative,
            active: true,
            sequence: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn search_matches_product_names() {
        let products = vec![
            product("Red Shirt", vec![variant("SHIRT-R", 3)]),
            product("Blue Pants", vec![variant("PANTS-B", 3)]),
        ];

        let filtered = apply_filters(&products, "red", QuantityFilter::All, None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name.display(), "Red Shirt");
    }

    #[test]
    fn search_matches_variant_references() {
        let products = vec![
            product("Shirt", vec![variant("SKU-RED-01", 3)]),
            product("Pants", vec![variant("SKU-BLU-02", 3)]),
        ];

        let filtered = apply_filters(&products, "red-01", QuantityFilter::All, None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name.display(), "Shirt");
    }

    #[test]
    fn bucket_filter_keeps_products_with_a_matching_variant() {
        let products = vec![
            product("Mixed", vec![variant("A", 0), variant("B", -2)]),
            product("Healthy", vec![variant("C", 5)]),
        ];

        let negative = apply_filters(&products, "", QuantityFilter::Negative, None);
        assert_eq!(negative.len(), 1);
        assert_eq!(negative[0].name.display(), "Mixed");

        let positive = apply_filters(&products, "", QuantityFilter::Positive, None);
        assert_eq!(positive.len(), 1);
        assert_eq!(positive[0].name.display(), "Healthy");
    }

    #[test]
    fn filter_zero_drops_all_zero_products() {
        let products = vec![
            product("Empty", vec![variant("A", 0), variant("B", 0)]),
            product("Stocked", vec![variant("C", 0), variant("D", 2)]),
        ];

        let cfg = config(true, true);
        let filtered = apply_filters(&products, "", QuantityFilter::All, Some(&cfg));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name.display(), "Stocked");
    }

    #[test]
    fn exclude_negative_drops_products_with_negative_variants() {
        let products = vec![
            product("Oversold", vec![variant("A", -1), variant("B", 5)]),
            product("Fine", vec![variant("C", 5)]),
        ];

        let cfg = config(false, false);
        let filtered = apply_filters(&products, "", QuantityFilter::All, Some(&cfg));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name.display(), "Fine");
    }

    #[test]
    fn filtering_is_idempotent_and_order_preserving() {
        let products = vec![
            product("Alpha Red", vec![variant("A", 1)]),
            product("Beta Red", vec![variant("B", 0)]),
            product("Gamma Red", vec![variant("C", -1)]),
            product("Delta Blue", vec![variant("D", 9)]),
        ];
        let cfg = config(true, true);

        let once = apply_filters(&products, "red", QuantityFilter::All, Some(&cfg));
        let twice = apply_filters(&once, "red", QuantityFilter::All, Some(&cfg));

        let names =
            |ps: &[Product]| ps.iter().map(|p| p.name.display().to_string()).collect::<Vec<_>>();
        assert_eq!(names(&once), names(&twice));
        // Input order is preserved
        assert_eq!(names(&once), vec!["Alpha Red", "Gamma Red"]);
    }

    #[test]
    fn empty_term_and_all_bucket_pass_everything() {
        let products = vec![
            product("One", vec![variant("A", 1)]),
            product("Two", vec![variant("B", 2)]),
        ];
        let filtered = apply_filters(&products, "  ", QuantityFilter::All, None);
        assert_eq!(filtered.len(), 2);
    }
}
