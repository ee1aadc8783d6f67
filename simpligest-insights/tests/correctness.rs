//! Correctness tests for simpligest-insights.
//!
//! Validates that:
//! 1. Products with no windowed sales get the documented zero-demand fallbacks
//! 2. Degenerate prices never produce errors, NaN or infinite output
//! 3. Demand classification honors its boundary values
//! 4. The worked pricing scenario comes out as specified
//! 5. Determinism: same (products, sales, now) always produces the same insights

use chrono::{DateTime, Duration, Utc};

use simpligest_insights::{
    product_insights, DemandLevel, InsightConfig, Product, Sale, SalesTrend,
};

fn frozen_now() -> DateTime<Utc> {
    "2026-07-01T09:00:00Z".parse().unwrap()
}

// ---------------------------------------------------------------------------
// Fixture builders
// ---------------------------------------------------------------------------

fn product(id: &str, stock: f64, stock_min: f64, purchase: f64, sale: f64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {}", id),
        category: "general".to_string(),
        stock,
        stock_min,
        unit: "un".to_string(),
        purchase_price: purchase,
        sale_price: sale,
        supplier: "ACME Ltda.".to_string(),
        created_at: Some(frozen_now() - Duration::days(365)),
    }
}

fn sale(product_id: &str, qty: f64, unit_price: f64, days_ago: i64) -> Sale {
    Sale {
        id: format!("sale-{}-{}", product_id, days_ago),
        product_id: product_id.to_string(),
        product_name: format!("Product {}", product_id),
        quantity: qty,
        unit_price,
        total: qty * unit_price,
        timestamp: frozen_now() - Duration::days(days_ago),
    }
}

// ---------------------------------------------------------------------------
// Zero-history fallbacks
// ---------------------------------------------------------------------------

#[test]
fn no_sales_in_window_yields_zero_demand() {
    let products = vec![product("p1", 2.0, 5.0, 1000.0, 1500.0)];
    // One sale far outside the 90-day window must not count.
    let sales = vec![sale("p1", 10.0, 1500.0, 200)];

    let insights = product_insights(&products, &sales, frozen_now(), &InsightConfig::default());
    assert_eq!(insights.len(), 1);
    let i = &insights[0];

    assert_eq!(i.weekly_demand, 0.0);
    assert_eq!(i.daily_demand, 0.0);
    assert_eq!(i.demand_level, DemandLevel::Low);
    assert_eq!(i.stockout_in_days, None);
    // max(0, stock_min - stock) = 3
    assert_eq!(i.suggested_purchase, 3);
}

#[test]
fn overstocked_idle_product_suggests_nothing() {
    let products = vec![product("p1", 20.0, 5.0, 1000.0, 1500.0)];
    let insights = product_insights(&products, &[], frozen_now(), &InsightConfig::default());
    assert_eq!(insights[0].suggested_purchase, 0);
}

// ---------------------------------------------------------------------------
// Degenerate prices
// ---------------------------------------------------------------------------

#[test]
fn zero_purchase_price_uses_fallbacks() {
    let products = vec![product("p1", 10.0, 5.0, 0.0, 890.0)];
    let sales = vec![sale("p1", 2.0, 890.0, 3)];

    let insights = product_insights(&products, &sales, frozen_now(), &InsightConfig::default());
    let i = &insights[0];

    assert_eq!(i.average_margin, 0.25);
    assert_eq!(i.price.recommended_price, 890.0);
    assert_eq!(i.price.variation_pct, 0.0);
}

#[test]
fn zero_sale_price_never_produces_nan_variation() {
    let products = vec![product("p1", 10.0, 5.0, 1000.0, 0.0)];
    let sales = vec![sale("p1", 2.0, 1200.0, 3)];

    let insights = product_insights(&products, &sales, frozen_now(), &InsightConfig::default());
    let i = &insights[0];

    assert_eq!(i.price.variation_pct, 0.0);
    assert!(i.price.recommended_price.is_finite());
}

#[test]
fn every_field_is_finite_for_hostile_input() {
    let products = vec![
        product("p1", 0.0, 0.0, 0.0, 0.0),
        product("p2", -3.0, 0.0, -50.0, 100.0),
    ];
    let sales = vec![sale("p1", 0.0, 0.0, 1), sale("p2", 1.0, 0.0, 1)];

    for i in product_insights(&products, &sales, frozen_now(), &InsightConfig::default()) {
        assert!(i.weekly_demand.is_finite());
        assert!(i.daily_demand.is_finite());
        assert!(i.trend_ratio.is_finite());
        assert!(i.average_margin.is_finite());
        assert!(i.price.recommended_price.is_finite());
        assert!(i.price.variation_pct.is_finite());
    }
}

// ---------------------------------------------------------------------------
// Trend edge cases
// ---------------------------------------------------------------------------

#[test]
fn fresh_product_with_only_recent_sales_reads_flat() {
    let products = vec![product("p1", 30.0, 5.0, 1000.0, 1500.0)];
    // Sales only in the last 30 days; the prior window is empty.
    let sales = vec![sale("p1", 8.0, 1500.0, 2), sale("p1", 8.0, 1500.0, 9)];

    let insights = product_insights(&products, &sales, frozen_now(), &InsightConfig::default());
    let i = &insights[0];
    assert_eq!(i.trend_ratio, 0.0);
    assert_eq!(i.trend, SalesTrend::Stable);
}

#[test]
fn declining_sales_are_flagged() {
    let products = vec![product("p1", 30.0, 5.0, 1000.0, 1500.0)];
    let sales = vec![
        sale("p1", 2.0, 1500.0, 10), // recent window
        sale("p1", 9.0, 1500.0, 40), // prior window
    ];

    let insights = product_insights(&products, &sales, frozen_now(), &InsightConfig::default());
    let i = &insights[0];
    assert!((i.trend_ratio - (2.0 - 9.0) / 9.0).abs() < 1e-9);
    assert_eq!(i.trend, SalesTrend::Declining);
}

// ---------------------------------------------------------------------------
// Worked scenario from the pricing design
// ---------------------------------------------------------------------------

#[test]
fn worked_scenario_medium_demand_half_margin() {
    let products = vec![product("p1", 20.0, 5.0, 1000.0, 1400.0)];
    // 3 sales of 2 units each over the last 7 days at $1500.
    let sales = vec![
        sale("p1", 2.0, 1500.0, 1),
        sale("p1", 2.0, 1500.0, 4),
        sale("p1", 2.0, 1500.0, 7),
    ];

    let insights = product_insights(&products, &sales, frozen_now(), &InsightConfig::default());
    let i = &insights[0];

    // 6 units over 7 elapsed days = 6/week.
    assert!((i.weekly_demand - 6.0).abs() < 1e-9);
    // medium at max(3, 0.8 x 5) = 4; high would need max(10, 7.5) = 10.
    assert_eq!(i.demand_level, DemandLevel::Medium);
    assert!((i.average_margin - 0.5).abs() < 1e-9);
    // Prior trend window empty -> stable -> +0.01; medium demand -> +0.
    // 1000 x (1 + 0.5 + 0 + 0.01) = 1510.
    assert!((i.price.recommended_price - 1510.0).abs() < 1e-6);
    // Stockout: 20 on hand at 6/7 per day -> ceil(23.3) = 24 days.
    assert_eq!(i.stockout_in_days, Some(24));
    // Coverage: 6/7 x 14 + 5 = 17 -> already holding 20 -> nothing to buy.
    assert_eq!(i.suggested_purchase, 0);
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn identical_snapshots_produce_identical_insights() {
    let products = vec![
        product("p1", 20.0, 5.0, 1000.0, 1400.0),
        product("p2", 0.0, 8.0, 0.0, 990.0),
        product("p3", 4.0, 2.0, 750.0, 1090.0),
    ];
    let sales = vec![
        sale("p1", 2.0, 1500.0, 1),
        sale("p1", 2.0, 1500.0, 40),
        sale("p3", 6.0, 1090.0, 12),
        sale("p3", 1.0, 1190.0, 55),
    ];
    let now = frozen_now();
    let config = InsightConfig::default();

    let first = product_insights(&products, &sales, now, &config);
    let second = product_insights(&products, &sales, now, &config);
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Output shape
// ---------------------------------------------------------------------------

#[test]
fn one_insight_per_product_in_input_order() {
    let products = vec![
        product("a", 1.0, 1.0, 100.0, 150.0),
        product("b", 1.0, 1.0, 100.0, 150.0),
        product("c", 1.0, 1.0, 100.0, 150.0),
    ];
    let insights = product_insights(&products, &[], frozen_now(), &InsightConfig::default());
    let ids: Vec<&str> = insights.iter().map(|i| i.product_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}
