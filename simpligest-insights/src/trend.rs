//! Sales momentum between the two most recent 30-day windows.

use crate::config::InsightConfig;
use crate::types::SalesTrend;

/// Relative quantity change between the two momentum windows.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendEstimate {
    /// (recent - prior) / prior, or 0 when the prior window sold
    /// nothing. A newly listed product reads as flat, not as infinite
    /// growth.
    pub ratio: f64,
    pub direction: SalesTrend,
}

pub fn estimate_trend(recent_qty: f64, prior_qty: f64, config: &InsightConfig) -> TrendEstimate {
    let ratio = if prior_qty <= 0.0 {
        0.0
    } else {
        (recent_qty - prior_qty) / prior_qty
    };

    let direction = if ratio > config.trend_growth_threshold {
        SalesTrend::Growing
    } else if ratio < config.trend_decline_threshold {
        SalesTrend::Declining
    } else {
        SalesTrend::Stable
    };

    TrendEstimate { ratio, direction }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_prior_window_reads_flat() {
        let t = estimate_trend(50.0, 0.0, &InsightConfig::default());
        assert_eq!(t.ratio, 0.0);
        assert_eq!(t.direction, SalesTrend::Stable);
    }

    #[test]
    fn growth_and_decline_thresholds() {
        let config = InsightConfig::default();
        assert_eq!(
            estimate_trend(110.0, 100.0, &config).direction,
            SalesTrend::Growing
        );
        assert_eq!(
            estimate_trend(105.0, 100.0, &config).direction,
            SalesTrend::Stable // exactly +5% is not yet growing
        );
        assert_eq!(
            estimate_trend(90.0, 100.0, &config).direction,
            SalesTrend::Declining
        );
        assert_eq!(
            estimate_trend(95.0, 100.0, &config).direction,
            SalesTrend::Stable
        );
    }
}
