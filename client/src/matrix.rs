//! Attribute matrix derivation
//!
//! When a configuration classifies variants along two attributes, the grid
//! shows each product as a rows-by-columns matrix instead of a flat list.

use rust_decimal::Decimal;
use uuid::Uuid;

use shared::models::{Attribute, Product, Variant};

/// A filled matrix cell: the variant holding the (row, column) combination
#[derive(Debug, Clone)]
pub struct MatrixCell {
    pub qty: Decimal,
    pub variant: Variant,
}

/// One row of the matrix, keyed by a primary attribute value
#[derive(Debug, Clone)]
pub struct MatrixRow {
    pub header: String,
    pub cells: Vec<Option<MatrixCell>>,
}

/// Two-axis grid of a product's variants
#[derive(Debug, Clone)]
pub struct AttributeMatrix {
    pub column_headers: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

/// Build the variant matrix for one product.
///
/// Requires two active attributes and at least one variant; otherwise the
/// caller falls back to the flat variant list. Axes are the attribute
/// values actually observed on the product's variants, sorted by display
/// name. Combinations no variant covers yield empty cells.
pub fn build_attribute_matrix(
    product: &Product,
    attributes: &[Attribute],
    use_forecast: bool,
) -> Option<AttributeMatrix> {
    let [primary, secondary] = attributes else {
        return None;
    };
    if product.variants.is_empty() {
        return None;
    }

    let row_values = observed_values(product, primary);
    let column_values = observed_values(product, secondary);
    if row_values.is_empty() || column_values.is_empty() {
        return None;
    }

    let column_headers = column_values.iter().map(|(_, name)| name.clone()).collect();

    let rows = row_values
        .into_iter()
        .map(|(row_id, header)| MatrixRow {
            cells: column_values
                .iter()
                .map(|&(column_id, _)| {
                    product
                        .variants
                        .iter()
                        .find(|v| {
                            v.attributes.get(&primary.id) == Some(&row_id)
                                && v.attributes.get(&secondary.id) == Some(&column_id)
                        })
                        .map(|variant| MatrixCell {
                            qty: variant.qty_for(use_forecast),
                            variant: variant.clone(),
                        })
                })
                .collect(),
            header,
        })
        .collect();

    Some(AttributeMatrix {
        column_headers,
        rows,
    })
}

/// Distinct values of `attribute` observed across the product's variants,
/// sorted ascending by display name (value id breaks ties).
fn observed_values(product: &Product, attribute: &Attribute) -> Vec<(Uuid, String)> {
    let mut values: Vec<(Uuid, String)> = Vec::new();
    for variant in &product.variants {
        if let Some(&value_id) = variant.attributes.get(&attribute.id) {
            if values.iter().all(|(id, _)| *id != value_id) {
                let name = attribute
                    .value_label(value_id)
                    .map(str::to_string)
                    .unwrap_or_else(|| value_id.to_string());
                values.push((value_id, name));
            }
        }
    }
    values.sort_by(|(a_id, a_name), (b_id, b_name)| {
        a_name.cmp(b_name).then_with(|| a_id.cmp(b_id))
    });
    values
}
