use async_trait::async_trait;

use crate::hydrator::Hydrator;
use crate::types::{InsightCandidate, ReportQuery};

/// Derives an urgency score from the stockout horizon.
///
/// A product running out today scores 1.0; urgency decays linearly to
/// the floor over `horizon_days`. No stockout horizon (zero demand)
/// scores 0.
pub struct StockoutUrgencyHydrator {
    /// Days over which urgency decays from 1.0 to the floor.
    pub horizon_days: f64,
    pub floor: f64,
}

impl Default for StockoutUrgencyHydrator {
    fn default() -> Self {
        Self {
            horizon_days: 30.0,
            floor: 0.05,
        }
    }
}

impl StockoutUrgencyHydrator {
    fn urgency(&self, stockout_in_days: Option<u32>) -> f64 {
        match stockout_in_days {
            None => 0.0,
            Some(days) => {
                let linear = 1.0 - days as f64 / self.horizon_days;
                linear.max(self.floor)
            }
        }
    }
}

#[async_trait]
impl Hydrator<ReportQuery, InsightCandidate> for StockoutUrgencyHydrator {
    async fn hydrate(
        &self,
        _query: &ReportQuery,
        candidates: &[InsightCandidate],
    ) -> Result<Vec<InsightCandidate>, String> {
        let hydrated = candidates
            .iter()
            .map(|c| InsightCandidate {
                urgency_score: Some(self.urgency(c.stockout_in_days)),
                ..InsightCandidate::default()
            })
            .collect();
        Ok(hydrated)
    }

    fn update(&self, candidate: &mut InsightCandidate, hydrated: InsightCandidate) {
        candidate.urgency_score = hydrated.urgency_score;
    }
}
