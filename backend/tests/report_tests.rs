//! Report service tests
//!
//! Tests for report data shaping:
//! - pagination metadata
//! - search term normalization
//! - stock aggregation arithmetic
//! - config-driven product suppression

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::types::{Pagination, PaginationMeta};
use shared::validation::{normalize_search_term, sanitize_pagination, MAX_PAGE_SIZE};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Forecast arithmetic mirrored from the stock service
fn virtual_available(on_hand: Decimal, incoming: Decimal, outgoing: Decimal) -> Decimal {
    on_hand + incoming - outgoing
}

/// The display quantity a variant reports for a given mode
fn display_qty(on_hand: Decimal, incoming: Decimal, outgoing: Decimal, use_forecast: bool) -> Decimal {
    if use_forecast {
        virtual_available(on_hand, incoming, outgoing)
    } else {
        on_hand
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test page count arithmetic
    #[test]
    fn test_page_count() {
        let cases = [
            (0u64, 20u32, 1u32),
            (1, 20, 1),
            (20, 20, 1),
            (21, 20, 2),
            (40, 20, 2),
            (41, 20, 3),
        ];

        for (total, page_size, pages) in cases {
            let meta = PaginationMeta::for_total(total, Pagination { page: 1, page_size });
            assert_eq!(meta.pages, pages, "total={total} page_size={page_size}");
        }
    }

    /// Test raw query parameter sanitization
    #[test]
    fn test_pagination_sanitization() {
        let p = sanitize_pagination(None, None);
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, 20);

        let p = sanitize_pagination(Some(0), Some(0));
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, 1);

        let p = sanitize_pagination(Some(7), Some(100_000));
        assert_eq!(p.page, 7);
        assert_eq!(p.page_size, MAX_PAGE_SIZE);
    }

    /// Test search term normalization
    #[test]
    fn test_search_term_normalization() {
        assert_eq!(normalize_search_term("  Red SHIRT  "), "red shirt");
        assert_eq!(normalize_search_term(""), "");
        assert_eq!(normalize_search_term("   "), "");
    }

    /// Test forecast quantity calculation
    #[test]
    fn test_virtual_available() {
        // 10 on hand + 5 incoming - 3 outgoing = 12
        assert_eq!(
            virtual_available(dec("10"), dec("5"), dec("3")),
            dec("12")
        );
        // Forecast can go negative when more is leaving than exists
        assert_eq!(
            virtual_available(dec("2"), dec("0"), dec("5")),
            dec("-3")
        );
    }

    /// Test display quantity selection per mode
    #[test]
    fn test_display_qty_mode() {
        assert_eq!(display_qty(dec("10"), dec("5"), dec("3"), false), dec("10"));
        assert_eq!(display_qty(dec("10"), dec("5"), dec("3"), true), dec("12"));
    }

    /// Test zero suppression rule
    #[test]
    fn test_filter_zero_suppression() {
        let all_zero = [dec("0"), dec("0")];
        let mixed = [dec("0"), dec("2")];

        // A product is suppressed when no variant has a nonzero quantity
        assert!(!all_zero.iter().any(|q| *q != Decimal::ZERO));
        assert!(mixed.iter().any(|q| *q != Decimal::ZERO));
    }

    /// Test negative suppression rule
    #[test]
    fn test_exclude_negative_suppression() {
        let oversold = [dec("5"), dec("-1")];
        let healthy = [dec("5"), dec("0")];

        assert!(oversold.iter().any(|q| *q < Decimal::ZERO));
        assert!(!healthy.iter().any(|q| *q < Decimal::ZERO));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating stock quantities (can be negative)
    fn qty_strategy() -> impl Strategy<Value = Decimal> {
        (-10_000i64..=10_000i64).prop_map(|n| Decimal::new(n, 1))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every row belongs to exactly one page and page count covers
        /// the whole result set
        #[test]
        fn prop_pages_cover_all_rows(
            total in 0u64..100_000,
            page_size in 1u32..=200
        ) {
            let meta = PaginationMeta::for_total(total, Pagination { page: 1, page_size });

            // Enough pages for every row
            prop_assert!(u64::from(meta.pages) * u64::from(page_size) >= total);

            // Never a fully-empty trailing page (except the single page of
            // an empty result set)
            if total > 0 {
                prop_assert!(u64::from(meta.pages - 1) * u64::from(page_size) < total);
            } else {
                prop_assert_eq!(meta.pages, 1);
            }
        }

        /// Sanitized pagination always lands in the servable range
        #[test]
        fn prop_sanitized_pagination_in_range(
            page in proptest::option::of(0u32..1_000_000),
            page_size in proptest::option::of(0u32..1_000_000)
        ) {
            let p = sanitize_pagination(page, page_size);
            prop_assert!(p.page >= 1);
            prop_assert!(p.page_size >= 1 && p.page_size <= MAX_PAGE_SIZE);
        }

        /// Forecast arithmetic is consistent: on-hand mode ignores moves,
        /// forecast mode applies them exactly once
        #[test]
        fn prop_display_qty_modes(
            on_hand in qty_strategy(),
            incoming in qty_strategy(),
            outgoing in qty_strategy()
        ) {
            let plain = display_qty(on_hand, incoming, outgoing, false);
            let forecast = display_qty(on_hand, incoming, outgoing, true);

            prop_assert_eq!(plain, on_hand);
            prop_assert_eq!(forecast, on_hand + incoming - outgoing);
        }

        /// Normalization is idempotent
        #[test]
        fn prop_normalization_idempotent(term in ".{0,40}") {
            let once = normalize_search_term(&term);
            let twice = normalize_search_term(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
