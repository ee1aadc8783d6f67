//! Stockout horizon and reorder quantity.

use crate::config::InsightConfig;

/// Days until stock reaches zero at the current daily rate.
///
/// `None` when daily demand is zero (no near-term risk). Zero stock
/// with positive demand reports 0 days.
pub fn stockout_horizon(daily_demand: f64, stock: f64) -> Option<u32> {
    if daily_demand <= 0.0 {
        return None;
    }
    if stock <= 0.0 {
        return Some(0);
    }
    Some((stock / daily_demand).ceil() as u32)
}

/// Units to reorder now: enough to cover the safety window of projected
/// demand plus the configured minimum stock, net of what is on hand.
/// Always a non-negative whole number of units; 0 means no reorder is
/// warranted.
pub fn suggested_purchase(
    daily_demand: f64,
    stock: f64,
    stock_min: f64,
    config: &InsightConfig,
) -> u32 {
    let target_coverage = daily_demand * config.safety_coverage_days + stock_min;
    let shortfall = (target_coverage - stock).ceil();
    if shortfall > 0.0 {
        shortfall as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_demand_means_no_horizon() {
        assert_eq!(stockout_horizon(0.0, 50.0), None);
    }

    #[test]
    fn horizon_rounds_up_to_whole_days() {
        // 10 units at 3/day runs out during day 4.
        assert_eq!(stockout_horizon(3.0, 10.0), Some(4));
        assert_eq!(stockout_horizon(2.0, 10.0), Some(5));
    }

    #[test]
    fn empty_shelf_with_demand_is_day_zero() {
        assert_eq!(stockout_horizon(1.5, 0.0), Some(0));
    }

    #[test]
    fn reorder_covers_safety_window_plus_minimum() {
        let config = InsightConfig::default();
        // 2/day x 14 days + 5 minimum - 10 on hand = 23.
        assert_eq!(suggested_purchase(2.0, 10.0, 5.0, &config), 23);
    }

    #[test]
    fn reorder_never_negative() {
        let config = InsightConfig::default();
        assert_eq!(suggested_purchase(0.0, 100.0, 5.0, &config), 0);
        assert_eq!(suggested_purchase(1.0, 100.0, 5.0, &config), 0);
    }

    #[test]
    fn zero_demand_reorder_tops_up_to_minimum() {
        let config = InsightConfig::default();
        assert_eq!(suggested_purchase(0.0, 2.0, 5.0, &config), 3);
        assert_eq!(suggested_purchase(0.0, 5.0, 5.0, &config), 0);
    }

    #[test]
    fn fractional_shortfall_rounds_up() {
        let config = InsightConfig::default();
        // 0.5/day x 14 + 0 - 5 = 2 exactly; 0.55/day -> 2.7 -> 3.
        assert_eq!(suggested_purchase(0.5, 5.0, 0.0, &config), 2);
        assert_eq!(suggested_purchase(0.55, 5.0, 0.0, &config), 3);
    }
}
