//! Demand rate estimation and classification.

use crate::config::InsightConfig;
use crate::types::DemandLevel;
use crate::window::SalesWindows;

/// Projected demand for one product.
#[derive(Clone, Debug, PartialEq)]
pub struct DemandEstimate {
    pub weekly: f64,
    pub daily: f64,
    pub level: DemandLevel,
}

/// Convert windowed sale quantities into weekly/daily rates.
///
/// The divisor is the elapsed history inside the window, not the full
/// window length: a product selling 6 units in its first week on the
/// shelf moves 6/week, not 6/90ths of a unit per day.
pub fn estimate_demand(
    windows: &SalesWindows<'_>,
    stock_min: f64,
    config: &InsightConfig,
) -> DemandEstimate {
    let total_qty = windows.total_qty();
    let weekly = if total_qty <= 0.0 {
        0.0
    } else {
        total_qty / windows.elapsed_days * 7.0
    };
    let daily = weekly / 7.0;
    let level = classify_demand(weekly, stock_min, config);

    DemandEstimate {
        weekly,
        daily,
        level,
    }
}

/// Classify a weekly rate against thresholds that scale with the
/// product's own minimum-stock policy: a product configured with a high
/// safety threshold needs proportionally more movement to count as
/// high demand.
pub fn classify_demand(weekly: f64, stock_min: f64, config: &InsightConfig) -> DemandLevel {
    let high_at = config
        .high_demand_floor
        .max(stock_min * config.high_demand_stock_min_factor);
    let medium_at = config
        .medium_demand_floor
        .max(stock_min * config.medium_demand_stock_min_factor);

    if weekly >= high_at {
        DemandLevel::High
    } else if weekly >= medium_at {
        DemandLevel::Medium
    } else {
        DemandLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_classify_upward() {
        let config = InsightConfig::default();
        // stock_min 10: high at max(10, 15) = 15, medium at max(3, 8) = 8.
        assert_eq!(classify_demand(15.0, 10.0, &config), DemandLevel::High);
        assert_eq!(classify_demand(14.99, 10.0, &config), DemandLevel::Medium);
        assert_eq!(classify_demand(8.0, 10.0, &config), DemandLevel::Medium);
        assert_eq!(classify_demand(7.99, 10.0, &config), DemandLevel::Low);
    }

    #[test]
    fn floors_apply_when_stock_min_is_small() {
        let config = InsightConfig::default();
        // stock_min 1: high at max(10, 1.5) = 10, medium at max(3, 0.8) = 3.
        assert_eq!(classify_demand(10.0, 1.0, &config), DemandLevel::High);
        assert_eq!(classify_demand(9.5, 1.0, &config), DemandLevel::Medium);
        assert_eq!(classify_demand(3.0, 1.0, &config), DemandLevel::Medium);
        assert_eq!(classify_demand(2.9, 1.0, &config), DemandLevel::Low);
    }

    #[test]
    fn zero_weekly_demand_is_low() {
        let config = InsightConfig::default();
        assert_eq!(classify_demand(0.0, 0.0, &config), DemandLevel::Low);
    }
}
