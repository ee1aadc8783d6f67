use async_trait::async_trait;

use simpligest_insights::DemandLevel;

use crate::scorer::Scorer;
use crate::types::{InsightCandidate, ReportQuery};

/// Scores candidates by the capital a restock would tie up, on a log
/// scale, weighted by demand level and stockout urgency.
///
/// Log scaling keeps one expensive product from drowning out every
/// cheaper one; the urgency weight comes from the hydrator upstream.
pub struct RestockStakeScorer;

#[async_trait]
impl Scorer<ReportQuery, InsightCandidate> for RestockStakeScorer {
    async fn score(
        &self,
        _query: &ReportQuery,
        candidates: &[InsightCandidate],
    ) -> Result<Vec<InsightCandidate>, String> {
        let scored = candidates
            .iter()
            .map(|c| {
                let stake = c.suggested_purchase as f64 * c.purchase_price;
                let base_score = (stake + 1.0).ln(); // +1 keeps a zero stake at 0
                let demand_multiplier = match c.demand_level {
                    DemandLevel::High => 1.5,
                    DemandLevel::Medium => 1.0,
                    DemandLevel::Low => 0.7,
                };
                let urgency_weight = 1.0 + c.urgency_score.unwrap_or(0.0);

                InsightCandidate {
                    attention_score: Some(base_score * demand_multiplier * urgency_weight),
                    ..InsightCandidate::default()
                }
            })
            .collect();

        Ok(scored)
    }

    fn update(&self, candidate: &mut InsightCandidate, scored: InsightCandidate) {
        candidate.attention_score = scored.attention_score;
    }
}
