//! The estimator entry points.
//!
//! Pure and synchronous: one `(products, sales, now)` snapshot in, one
//! `ProductInsight` per product out. Identical inputs produce identical
//! output, so callers are free to recompute on every data change and
//! discard stale results. Degenerate inputs (no history, zero prices)
//! resolve to the documented fallbacks, never to an error.

use chrono::{DateTime, Utc};

use crate::config::InsightConfig;
use crate::demand::estimate_demand;
use crate::margin::average_margin;
use crate::pricing::recommend_price;
use crate::reorder::{stockout_horizon, suggested_purchase};
use crate::trend::estimate_trend;
use crate::types::{Product, ProductInsight, Sale};
use crate::window::SalesWindows;

/// Compute insights for every product in the snapshot.
pub fn product_insights(
    products: &[Product],
    sales: &[Sale],
    now: DateTime<Utc>,
    config: &InsightConfig,
) -> Vec<ProductInsight> {
    products
        .iter()
        .map(|p| insight_for(p, sales, now, config))
        .collect()
}

/// Compute the insight for a single product.
pub fn insight_for(
    product: &Product,
    sales: &[Sale],
    now: DateTime<Utc>,
    config: &InsightConfig,
) -> ProductInsight {
    let windows = SalesWindows::select(&product.id, sales, now, config);
    let demand = estimate_demand(&windows, product.stock_min, config);
    let trend = estimate_trend(windows.recent_qty, windows.prior_qty, config);
    let margin = average_margin(&windows.window, product.purchase_price, config);
    let price = recommend_price(
        product.purchase_price,
        product.sale_price,
        margin,
        &demand.level,
        &trend,
        config,
    );

    ProductInsight {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        category: product.category.clone(),
        weekly_demand: demand.weekly,
        daily_demand: demand.daily,
        demand_level: demand.level,
        trend: trend.direction,
        trend_ratio: trend.ratio,
        average_margin: margin,
        stockout_in_days: stockout_horizon(demand.daily, product.stock),
        suggested_purchase: suggested_purchase(
            demand.daily,
            product.stock,
            product.stock_min,
            config,
        ),
        price,
    }
}
