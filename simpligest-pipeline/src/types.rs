use chrono::{DateTime, Utc};
use serde::Serialize;

use simpligest_insights::{DemandLevel, PriceRecommendation, SalesTrend};

use crate::candidate_pipeline::HasRequestId;
use crate::roles::UserRole;

/// A request for the daily inventory report.
#[derive(Clone, Debug)]
pub struct ReportQuery {
    pub request_id: String,
    pub user_id: String,
    pub role: UserRole,
    /// Snapshot instant the report is computed against. Left empty by
    /// callers that want "now"; the as-of query hydrator fills it.
    pub as_of: Option<DateTime<Utc>>,
    /// Restrict the report to these categories. Empty means all.
    pub categories: Vec<String>,
}

impl HasRequestId for ReportQuery {
    fn request_id(&self) -> &str {
        &self.request_id
    }
}

/// One product's entry in the report, as it moves through the pipeline.
///
/// The estimator fields are filled by the source; the `Option` scoring
/// fields are populated by hydrators and scorers further down.
#[derive(Clone, Debug, Serialize)]
pub struct InsightCandidate {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub current_stock: f64,
    pub stock_min: f64,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub weekly_demand: f64,
    pub daily_demand: f64,
    pub demand_level: DemandLevel,
    pub trend: SalesTrend,
    pub trend_ratio: f64,
    pub stockout_in_days: Option<u32>,
    pub suggested_purchase: u32,
    /// Absent when the requesting role lacks the pricing permission.
    pub price: Option<PriceRecommendation>,
    pub as_of: DateTime<Utc>,

    // Populated by hydrators/scorers.
    pub urgency_score: Option<f64>,
    pub attention_score: Option<f64>,
}

impl Default for InsightCandidate {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            product_name: String::new(),
            category: String::new(),
            current_stock: 0.0,
            stock_min: 0.0,
            purchase_price: 0.0,
            sale_price: 0.0,
            weekly_demand: 0.0,
            daily_demand: 0.0,
            demand_level: DemandLevel::Low,
            trend: SalesTrend::Stable,
            trend_ratio: 0.0,
            stockout_in_days: None,
            suggested_purchase: 0,
            price: None,
            as_of: DateTime::<Utc>::MIN_UTC,
            urgency_score: None,
            attention_score: None,
        }
    }
}
