use async_trait::async_trait;
use std::sync::Arc;

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::{InsightCandidate, ReportQuery};

/// Logs the finished report through the `log` facade. The report
/// itself is the pipeline's return value; this exists so operators can
/// follow report production in the application log.
pub struct ReportLogSideEffect;

#[async_trait]
impl SideEffect<ReportQuery, InsightCandidate> for ReportLogSideEffect {
    async fn run(
        &self,
        input: Arc<SideEffectInput<ReportQuery, InsightCandidate>>,
    ) -> Result<(), String> {
        let restock_units: u32 = input
            .selected_candidates
            .iter()
            .map(|c| c.suggested_purchase)
            .sum();
        log::info!(
            "request_id={} report ready: {} items selected, {} units suggested for restock",
            input.query.request_id,
            input.selected_candidates.len(),
            restock_units
        );
        Ok(())
    }
}
