use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::scorer::Scorer;
use crate::types::{InsightCandidate, ReportQuery};

/// Attenuates scores for repeated categories so the report covers the
/// whole store instead of surfacing five variations of the same shelf.
///
/// Candidates are walked in descending score order; each further
/// appearance of a category is attenuated by `decay_factor^position`,
/// never below `floor`.
pub struct CategoryDiversityScorer {
    pub decay_factor: f64,
    pub floor: f64,
}

impl Default for CategoryDiversityScorer {
    fn default() -> Self {
        Self {
            decay_factor: 0.7,
            floor: 0.1,
        }
    }
}

impl CategoryDiversityScorer {
    fn multiplier(&self, position: usize) -> f64 {
        (1.0 - self.floor) * self.decay_factor.powf(position as f64) + self.floor
    }
}

#[async_trait]
impl Scorer<ReportQuery, InsightCandidate> for CategoryDiversityScorer {
    async fn score(
        &self,
        _query: &ReportQuery,
        candidates: &[InsightCandidate],
    ) -> Result<Vec<InsightCandidate>, String> {
        let mut category_counts: HashMap<String, usize> = HashMap::new();
        let mut scored = vec![InsightCandidate::default(); candidates.len()];

        let mut ordered: Vec<(usize, &InsightCandidate)> =
            candidates.iter().enumerate().collect();
        ordered.sort_by(|(_, a), (_, b)| {
            let a_score = a.attention_score.unwrap_or(f64::NEG_INFINITY);
            let b_score = b.attention_score.unwrap_or(f64::NEG_INFINITY);
            b_score.partial_cmp(&a_score).unwrap_or(Ordering::Equal)
        });

        for (original_idx, candidate) in ordered {
            let entry = category_counts
                .entry(candidate.category.clone())
                .or_insert(0);
            let position = *entry;
            *entry += 1;

            let multiplier = self.multiplier(position);
            let adjusted = candidate.attention_score.map(|s| s * multiplier);

            scored[original_idx] = InsightCandidate {
                attention_score: adjusted,
                ..InsightCandidate::default()
            };
        }

        Ok(scored)
    }

    fn update(&self, candidate: &mut InsightCandidate, scored: InsightCandidate) {
        candidate.attention_score = scored.attention_score;
    }
}
