//! Historical margin estimation from observed sale prices.

use crate::config::InsightConfig;
use crate::types::Sale;

/// Average fractional markup of observed sale prices over the purchase
/// price, across the analysis window.
///
/// Falls back to the configured assumed margin when the purchase price
/// is non-positive or there is no usable history. A wrong-but-sane
/// assumption beats propagating a NaN into a price recommendation.
pub fn average_margin(window: &[&Sale], purchase_price: f64, config: &InsightConfig) -> f64 {
    if purchase_price <= 0.0 {
        return config.fallback_margin;
    }

    let mut sum = 0.0;
    let mut count = 0usize;
    for sale in window {
        let margin = (sale.unit_price - purchase_price) / purchase_price;
        if margin.is_finite() {
            sum += margin;
            count += 1;
        }
    }

    if count == 0 {
        config.fallback_margin
    } else {
        sum / count as f64
    }
}
