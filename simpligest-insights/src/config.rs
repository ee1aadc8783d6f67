//! Centralized policy values for the insight estimators.
//!
//! These started life as constants tuned for small-retail catalogs.
//! They are plain struct fields so a deployment can adjust them without
//! touching the estimator code; the defaults below are the calibrated
//! values. Changing a threshold here affects demand classification,
//! price recommendations and reorder suggestions together.

/// Tunable policy knobs for [`crate::engine::product_insights`].
#[derive(Clone, Debug, PartialEq)]
pub struct InsightConfig {
    /// Length of the trailing analysis window, in days.
    pub window_days: i64,
    /// Length of each of the two momentum comparison windows, in days.
    pub trend_window_days: i64,
    /// Days of projected demand a reorder should cover on top of the
    /// configured minimum stock.
    pub safety_coverage_days: f64,
    /// Weekly demand qualifies as high at `max(high_demand_floor,
    /// stock_min * high_demand_stock_min_factor)`.
    pub high_demand_floor: f64,
    pub high_demand_stock_min_factor: f64,
    /// Weekly demand qualifies as medium at `max(medium_demand_floor,
    /// stock_min * medium_demand_stock_min_factor)`.
    pub medium_demand_floor: f64,
    pub medium_demand_stock_min_factor: f64,
    /// Momentum ratio above which sales count as growing.
    pub trend_growth_threshold: f64,
    /// Momentum ratio below which sales count as declining.
    pub trend_decline_threshold: f64,
    /// Assumed margin for products with no usable sale history or a
    /// non-positive purchase price. Keeps recommendations out of
    /// degenerate territory for brand-new products.
    pub fallback_margin: f64,
    /// Markup adjustments applied on top of the historical margin.
    pub high_demand_price_adjustment: f64,
    pub low_demand_price_adjustment: f64,
    pub growing_trend_price_adjustment: f64,
    pub declining_trend_price_adjustment: f64,
    /// Mild upward bias applied when the trend is flat.
    pub stable_trend_price_adjustment: f64,
    /// Margin tiers used only for the recommendation rationale text.
    pub good_margin_tier: f64,
    pub healthy_margin_tier: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            window_days: 90,
            trend_window_days: 30,
            safety_coverage_days: 14.0,
            high_demand_floor: 10.0,
            high_demand_stock_min_factor: 1.5,
            medium_demand_floor: 3.0,
            medium_demand_stock_min_factor: 0.8,
            trend_growth_threshold: 0.05,
            trend_decline_threshold: -0.05,
            fallback_margin: 0.25,
            high_demand_price_adjustment: 0.05,
            low_demand_price_adjustment: -0.03,
            growing_trend_price_adjustment: 0.03,
            declining_trend_price_adjustment: -0.02,
            stable_trend_price_adjustment: 0.01,
            good_margin_tier: 0.35,
            healthy_margin_tier: 0.20,
        }
    }
}
