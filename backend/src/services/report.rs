//! Report data service
//!
//! Builds the `{products, attributes, pagination}` payload the grid
//! renders: one page of products matching the configuration's attributes
//! and search term, with per-variant stock levels resolved.

use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::{
    Attribute, AttributeValue, LocalizedName, Product, ReportConfig, ReportData, Variant,
};
use shared::types::{Pagination, PaginationMeta};
use shared::validation::normalize_search_term;

use crate::error::AppResult;
use crate::services::report_config::ReportConfigService;
use crate::services::stock::StockService;

/// Service producing report payloads
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: serde_json::Value,
    image_url: Option<String>,
}

#[derive(Debug, FromRow)]
struct VariantRow {
    id: Uuid,
    product_id: Uuid,
    name: serde_json::Value,
    default_code: Option<String>,
    image_url: Option<String>,
}

/// Product search: active products carrying either configured attribute,
/// optionally narrowed by a name/reference search term.
const PRODUCT_SEARCH_DOMAIN: &str = r#"
    p.active = true
    AND EXISTS (
        SELECT 1
        FROM product_variants v
        JOIN variant_attribute_values vav ON vav.variant_id = v.id
        JOIN attribute_values av ON av.id = vav.attribute_value_id
        WHERE v.product_id = p.id AND av.attribute_id = ANY($1)
    )
    AND ($2 = ''
        OR p.name::text ILIKE $3
        OR EXISTS (
            SELECT 1 FROM product_variants v
            WHERE v.product_id = p.id
              AND (v.default_code ILIKE $3 OR v.name::text ILIKE $3)
        ))
"#;

impl ReportService {
    /// Create a new ReportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Build one page of report data for a configuration.
    ///
    /// Unknown configurations yield the empty payload rather than an
    /// error: the grid renders an empty state, not a failure.
    pub async fn get_report_data(
        &self,
        config_id: Uuid,
        pagination: Pagination,
        search_term: &str,
    ) -> AppResult<ReportData> {
        let Some(config) = ReportConfigService::new(self.db.clone())
            .find(config_id)
            .await?
        else {
            return Ok(ReportData::empty());
        };

        let attribute_ids = config.attribute_ids();
        let term = normalize_search_term(search_term);
        let pattern = format!("%{}%", term);

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM products p WHERE {PRODUCT_SEARCH_DOMAIN}"
        ))
        .bind(&attribute_ids)
        .bind(&term)
        .bind(&pattern)
        .fetch_one(&self.db)
        .await?;

        let meta = PaginationMeta::for_total(total.max(0) as u64, pagination);

        let product_rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT p.id, p.name, p.image_url
            FROM products p
            WHERE {PRODUCT_SEARCH_DOMAIN}
            ORDER BY p.name::text
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(&attribute_ids)
        .bind(&term)
        .bind(&pattern)
        .bind(i64::from(pagination.page_size))
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        if product_rows.is_empty() {
            return Ok(ReportData {
                pagination: meta,
                ..ReportData::empty()
            });
        }

        let product_ids: Vec<Uuid> = product_rows.iter().map(|p| p.id).collect();

        let variant_rows = sqlx::query_as::<_, VariantRow>(
            r#"
            SELECT v.id, v.product_id, v.name, v.default_code, v.image_url
            FROM product_variants v
            WHERE v.product_id = ANY($1) AND v.active = true
            ORDER BY v.default_code NULLS LAST, v.id
            "#,
        )
        .bind(&product_ids)
        .fetch_all(&self.db)
        .await?;

        let variant_ids: Vec<Uuid> = variant_rows.iter().map(|v| v.id).collect();
        let stock = StockService::new(self.db.clone())
            .get_stock_levels(&variant_ids)
            .await?;
        let attribute_maps = self.get_variant_attribute_maps(&variant_ids).await?;
        let attributes = self.get_attribute_data(&attribute_ids).await?;

        let products = assemble_products(
            product_rows,
            variant_rows,
            &stock,
            attribute_maps,
            &config,
        );

        Ok(ReportData {
            error: None,
            products,
            attributes,
            pagination: meta,
        })
    }

    /// Attribute id -> value id per variant
    async fn get_variant_attribute_maps(
        &self,
        variant_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, HashMap<Uuid, Uuid>>> {
        let rows = sqlx::query_as::<_, (Uuid, Uuid, Uuid)>(
            r#"
            SELECT vav.variant_id, av.attribute_id, av.id
            FROM variant_attribute_values vav
            JOIN attribute_values av ON av.id = vav.attribute_value_id
            WHERE vav.variant_id = ANY($1)
            "#,
        )
        .bind(variant_ids)
        .fetch_all(&self.db)
        .await?;

        let mut maps: HashMap<Uuid, HashMap<Uuid, Uuid>> = HashMap::new();
        for (variant_id, attribute_id, value_id) in rows {
            maps.entry(variant_id)
                .or_default()
                .insert(attribute_id, value_id);
        }
        Ok(maps)
    }

    /// The configured attributes with their ordered values, primary first
    async fn get_attribute_data(&self, attribute_ids: &[Uuid]) -> AppResult<Vec<Attribute>> {
        let names = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, name FROM attributes WHERE id = ANY($1)",
        )
        .bind(attribute_ids)
        .fetch_all(&self.db)
        .await?;

        let value_rows = sqlx::query_as::<_, (Uuid, Uuid, String, Option<String>)>(
            r#"
            SELECT attribute_id, id, name, display_name
            FROM attribute_values
            WHERE attribute_id = ANY($1)
            ORDER BY sequence, name
            "#,
        )
        .bind(attribute_ids)
        .fetch_all(&self.db)
        .await?;

        let mut values_by_attribute: HashMap<Uuid, Vec<AttributeValue>> = HashMap::new();
        for (attribute_id, id, name, display_name) in value_rows {
            values_by_attribute
                .entry(attribute_id)
                .or_default()
                .push(AttributeValue {
                    id,
                    name,
                    display_name,
                });
        }

        // Preserve the configured order: primary axis first
        let attributes = attribute_ids
            .iter()
            .filter_map(|id| {
                names.iter().find(|(name_id, _)| name_id == id).map(|(id, name)| Attribute {
                    id: *id,
                    name: name.clone(),
                    values: values_by_attribute.remove(id).unwrap_or_default(),
                })
            })
            .collect();

        Ok(attributes)
    }
}

/// Group variant rows under their products and apply the configuration's
/// suppression rules.
fn assemble_products(
    product_rows: Vec<ProductRow>,
    variant_rows: Vec<VariantRow>,
    stock: &HashMap<Uuid, crate::services::stock::StockLevels>,
    mut attribute_maps: HashMap<Uuid, HashMap<Uuid, Uuid>>,
    config: &ReportConfig,
) -> Vec<Product> {
    let mut variants_by_product: HashMap<Uuid, Vec<Variant>> = HashMap::new();
    for row in variant_rows {
        let levels = stock.get(&row.id).cloned().unwrap_or_default();
        let virtual_available = levels.virtual_available();
        let display_qty = if config.use_forecast {
            virtual_available
        } else {
            levels.qty_available
        };

        variants_by_product
            .entry(row.product_id)
            .or_default()
            .push(Variant {
                id: row.id,
                name: parse_name(row.name),
                default_code: row.default_code,
                qty_available: levels.qty_available,
                virtual_available,
                display_qty,
                qty_reserved: levels.reserved_qty,
                incoming_qty: levels.incoming_qty,
                outgoing_qty: levels.outgoing_qty,
                image_url: row.image_url,
                product_url: None,
                attributes: attribute_maps.remove(&row.id).unwrap_or_default(),
            });
    }

    product_rows
        .into_iter()
        .filter_map(|row| {
            let variants = variants_by_product.remove(&row.id)?;

            if config.filter_zero && !has_nonzero(&variants) {
                tracing::debug!(product_id = %row.id, "suppressing all-zero product");
                return None;
            }
            if !config.include_negative && has_negative(&variants) {
                tracing::debug!(product_id = %row.id, "suppressing negative-stock product");
                return None;
            }

            Some(Product {
                id: row.id,
                name: parse_name(row.name),
                image_url: row.image_url,
                product_url: None,
                variants,
            })
        })
        .collect()
}

fn has_nonzero(variants: &[Variant]) -> bool {
    variants
        .iter()
        .any(|v| v.display_qty != rust_decimal::Decimal::ZERO)
}

fn has_negative(variants: &[Variant]) -> bool {
    variants
        .iter()
        .any(|v| v.display_qty < rust_decimal::Decimal::ZERO)
}

/// Decode a stored name, which is either a JSON string or a translation map
fn parse_name(value: serde_json::Value) -> LocalizedName {
    serde_json::from_value(value).unwrap_or_default()
}
