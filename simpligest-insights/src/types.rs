use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as the inventory subsystem stores it.
///
/// Stock and prices are expected to be non-negative; `stock_min` is a
/// policy threshold for restocking, not a hard constraint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Current on-hand quantity, in `unit`s. Fractional for bulk goods.
    pub stock: f64,
    /// Restock policy threshold configured per product.
    pub stock_min: f64,
    /// Unit of measure ("un", "kg", "lt", ...).
    pub unit: String,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub supplier: String,
    /// Missing in catalog exports predating the timestamp column.
    pub created_at: Option<DateTime<Utc>>,
}

/// A point-of-sale record. Sales are immutable once created; this crate
/// only ever reads them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub product_id: String,
    /// Name snapshot taken at sale time; the catalog name may have
    /// changed since.
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// quantity x unit_price, precomputed by the recording subsystem.
    pub total: f64,
    pub timestamp: DateTime<Utc>,
}

/// Coarse classification of a product's recent sales velocity relative
/// to its configured minimum stock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandLevel::High => write!(f, "high"),
            DemandLevel::Medium => write!(f, "medium"),
            DemandLevel::Low => write!(f, "low"),
        }
    }
}

/// Sales momentum between the two most recent 30-day windows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesTrend {
    Growing,
    Stable,
    Declining,
}

impl fmt::Display for SalesTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalesTrend::Growing => write!(f, "\u{2191} growing"),
            SalesTrend::Stable => write!(f, "\u{2192} stable"),
            SalesTrend::Declining => write!(f, "\u{2193} declining"),
        }
    }
}

/// A suggested sale price with its deviation from the current one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRecommendation {
    pub recommended_price: f64,
    /// Percent deviation from the current sale price. Defined as 0 when
    /// the current sale price is 0.
    pub variation_pct: f64,
    /// One-sentence explanation assembled from the demand, margin and
    /// trend readings.
    pub rationale: String,
}

/// Everything the estimator derives for one product from one
/// (products, sales, now) snapshot. Recomputed from scratch on every
/// invocation, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductInsight {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    /// Projected units sold per week at the observed velocity.
    pub weekly_demand: f64,
    /// Projected units sold per day.
    pub daily_demand: f64,
    pub demand_level: DemandLevel,
    pub trend: SalesTrend,
    /// Relative quantity change between the two trend windows. 0 when
    /// the prior window had no sales.
    pub trend_ratio: f64,
    /// Average observed sale margin over the analysis window, or the
    /// configured fallback when no usable history exists.
    pub average_margin: f64,
    /// Days until stock reaches zero at the current daily rate. `None`
    /// means no near-term risk (daily demand is zero).
    pub stockout_in_days: Option<u32>,
    /// Units to reorder now; 0 means no reorder is warranted.
    pub suggested_purchase: u32,
    pub price: PriceRecommendation,
}
