//! Validation utilities for the Stock Report Platform

use uuid::Uuid;

use crate::types::Pagination;

/// Maximum page size the report endpoint will serve
pub const MAX_PAGE_SIZE: u32 = 200;

/// Validate a report configuration name
pub fn validate_config_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Configuration name cannot be empty");
    }
    if name.len() > 128 {
        return Err("Configuration name is too long");
    }
    Ok(())
}

/// Validate the attribute selection of a configuration
///
/// The secondary axis is optional, but it must differ from the primary
/// one or the matrix would collapse to a single dimension.
pub fn validate_attribute_selection(
    primary: Uuid,
    secondary: Option<Uuid>,
) -> Result<(), &'static str> {
    if secondary == Some(primary) {
        return Err("Primary and secondary attributes must differ");
    }
    Ok(())
}

/// Clamp raw pagination parameters into the servable range
pub fn sanitize_pagination(page: Option<u32>, page_size: Option<u32>) -> Pagination {
    let defaults = Pagination::default();
    Pagination {
        page: page.unwrap_or(defaults.page).max(1),
        page_size: page_size
            .unwrap_or(defaults.page_size)
            .clamp(1, MAX_PAGE_SIZE),
    }
}

/// Normalize a search term the way the grid's search box does
pub fn normalize_search_term(term: &str) -> String {
    term.trim().to_lowercase()
}
