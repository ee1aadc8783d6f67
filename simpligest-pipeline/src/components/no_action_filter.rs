use async_trait::async_trait;

use crate::filter::{Filter, FilterResult};
use crate::types::{InsightCandidate, ReportQuery};
use simpligest_insights::SalesTrend;

/// Removes candidates with nothing actionable about them: no suggested
/// purchase, a flat trend, and a price recommendation within the noise
/// band around the current price. Those products are healthy; a report
/// full of them buries the ones that need attention.
pub struct NoActionFilter {
    /// Price variations below this percentage (absolute) are noise.
    pub min_variation_pct: f64,
}

impl Default for NoActionFilter {
    fn default() -> Self {
        Self {
            min_variation_pct: 5.0,
        }
    }
}

impl NoActionFilter {
    fn actionable(&self, candidate: &InsightCandidate) -> bool {
        if candidate.suggested_purchase > 0 {
            return true;
        }
        if candidate.trend != SalesTrend::Stable {
            return true;
        }
        candidate
            .price
            .as_ref()
            .is_some_and(|p| p.variation_pct.abs() >= self.min_variation_pct)
    }
}

#[async_trait]
impl Filter<ReportQuery, InsightCandidate> for NoActionFilter {
    async fn filter(
        &self,
        _query: &ReportQuery,
        candidates: Vec<InsightCandidate>,
    ) -> Result<FilterResult<InsightCandidate>, String> {
        let (kept, removed): (Vec<_>, Vec<_>) =
            candidates.into_iter().partition(|c| self.actionable(c));

        Ok(FilterResult { kept, removed })
    }
}
