use crate::selector::Selector;
use crate::types::{InsightCandidate, ReportQuery};

/// Selects the top K candidates by attention score.
pub struct TopKSelector {
    pub k: usize,
}

impl Default for TopKSelector {
    fn default() -> Self {
        Self { k: 5 }
    }
}

impl Selector<ReportQuery, InsightCandidate> for TopKSelector {
    fn score(&self, candidate: &InsightCandidate) -> f64 {
        candidate.attention_score.unwrap_or(f64::NEG_INFINITY)
    }

    fn size(&self) -> Option<usize> {
        Some(self.k)
    }
}
