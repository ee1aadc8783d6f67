//! Price recommendation from demand, margin and momentum.

use crate::config::InsightConfig;
use crate::trend::TrendEstimate;
use crate::types::{DemandLevel, PriceRecommendation, SalesTrend};

/// Combine the historical margin with demand and momentum adjustments
/// into a suggested sale price.
///
/// recommended = purchase_price x (1 + margin + demand_adj + trend_adj)
///
/// A non-positive purchase price (or any non-finite result) keeps the
/// current sale price unchanged; pricing advice for a product with no
/// cost basis would be noise.
pub fn recommend_price(
    purchase_price: f64,
    current_sale_price: f64,
    average_margin: f64,
    demand: &DemandLevel,
    trend: &TrendEstimate,
    config: &InsightConfig,
) -> PriceRecommendation {
    let demand_adjustment = match demand {
        DemandLevel::High => config.high_demand_price_adjustment,
        DemandLevel::Medium => 0.0,
        DemandLevel::Low => config.low_demand_price_adjustment,
    };
    let trend_adjustment = match trend.direction {
        SalesTrend::Growing => config.growing_trend_price_adjustment,
        SalesTrend::Declining => config.declining_trend_price_adjustment,
        SalesTrend::Stable => config.stable_trend_price_adjustment,
    };

    let raw = purchase_price * (1.0 + average_margin + demand_adjustment + trend_adjustment);
    let recommended_price = if purchase_price <= 0.0 || !raw.is_finite() {
        current_sale_price
    } else {
        raw
    };

    let variation_pct = if current_sale_price == 0.0 {
        0.0
    } else {
        (recommended_price - current_sale_price) / current_sale_price * 100.0
    };

    PriceRecommendation {
        recommended_price,
        variation_pct,
        rationale: rationale(demand, average_margin, &trend.direction, config),
    }
}

/// One sentence assembled from three canned phrase groups: demand
/// level, margin tier and trend direction.
fn rationale(
    demand: &DemandLevel,
    average_margin: f64,
    trend: &SalesTrend,
    config: &InsightConfig,
) -> String {
    let demand_phrase = match demand {
        DemandLevel::High => "strong recent demand supports a premium",
        DemandLevel::Medium => "steady demand holds the current positioning",
        DemandLevel::Low => "slow movement calls for a cautious price",
    };
    let margin_phrase = if average_margin >= config.good_margin_tier {
        "the historical margin is good"
    } else if average_margin >= config.healthy_margin_tier {
        "the historical margin is healthy"
    } else {
        "the historical margin is tight"
    };
    let trend_phrase = match trend {
        SalesTrend::Growing => "sales are trending up",
        SalesTrend::Declining => "sales are trending down",
        SalesTrend::Stable => "sales are holding steady",
    };

    format!(
        "{}; {}; {}.",
        capitalize(demand_phrase),
        margin_phrase,
        trend_phrase
    )
}

fn capitalize(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
