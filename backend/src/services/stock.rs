//! Stock aggregation service
//!
//! Resolves per-variant stock levels from quant and pending-move data.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

/// Aggregated stock position of a single variant
#[derive(Debug, Clone, Default)]
pub struct StockLevels {
    pub qty_available: Decimal,
    pub reserved_qty: Decimal,
    pub incoming_qty: Decimal,
    pub outgoing_qty: Decimal,
}

impl StockLevels {
    /// Forecasted quantity: on hand plus expected in, minus expected out
    pub fn virtual_available(&self) -> Decimal {
        self.qty_available + self.incoming_qty - self.outgoing_qty
    }
}

/// Service aggregating stock quantities per variant
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Aggregate stock levels for the given variants.
    ///
    /// Every requested variant appears in the result; variants without
    /// stock records report zeros.
    pub async fn get_stock_levels(
        &self,
        variant_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, StockLevels>> {
        let mut levels: HashMap<Uuid, StockLevels> = variant_ids
            .iter()
            .map(|id| (*id, StockLevels::default()))
            .collect();

        if variant_ids.is_empty() {
            return Ok(levels);
        }

        // On-hand and reserved quantities from internal locations
        let quants = sqlx::query_as::<_, (Uuid, Decimal, Decimal)>(
            r#"
            SELECT variant_id,
                   COALESCE(SUM(quantity), 0),
                   COALESCE(SUM(reserved_quantity), 0)
            FROM stock_quants
            WHERE variant_id = ANY($1) AND location_usage = 'internal'
            GROUP BY variant_id
            "#,
        )
        .bind(variant_ids)
        .fetch_all(&self.db)
        .await?;

        for (variant_id, quantity, reserved) in quants {
            if let Some(entry) = levels.get_mut(&variant_id) {
                entry.qty_available = quantity;
                entry.reserved_qty = reserved;
            }
        }

        // Expected incoming stock
        let incoming = sqlx::query_as::<_, (Uuid, Decimal)>(
            r#"
            SELECT variant_id, COALESCE(SUM(product_qty), 0)
            FROM stock_moves
            WHERE variant_id = ANY($1)
              AND state IN ('assigned', 'confirmed', 'waiting')
              AND dest_usage = 'internal'
              AND source_usage <> 'internal'
            GROUP BY variant_id
            "#,
        )
        .bind(variant_ids)
        .fetch_all(&self.db)
        .await?;

        for (variant_id, quantity) in incoming {
            if let Some(entry) = levels.get_mut(&variant_id) {
                entry.incoming_qty = quantity;
            }
        }

        // Expected outgoing stock
        let outgoing = sqlx::query_as::<_, (Uuid, Decimal)>(
            r#"
            SELECT variant_id, COALESCE(SUM(product_qty), 0)
            FROM stock_moves
            WHERE variant_id = ANY($1)
              AND state IN ('assigned', 'confirmed', 'waiting')
              AND source_usage = 'internal'
              AND dest_usage <> 'internal'
            GROUP BY variant_id
            "#,
        )
        .bind(variant_ids)
        .fetch_all(&self.db)
        .await?;

        for (variant_id, quantity) in outgoing {
            if let Some(entry) = levels.get_mut(&variant_id) {
                entry.outgoing_qty = quantity;
            }
        }

        Ok(levels)
    }
}
