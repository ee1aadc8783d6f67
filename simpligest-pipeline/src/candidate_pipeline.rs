//! The pipeline driver.
//!
//! A `CandidatePipeline` is a bundle of stage components plus a default
//! `execute` that runs them in a fixed order. A failing component is
//! logged under its `name()` and skipped; a report with one enrichment
//! missing beats no report at all.

use std::sync::Arc;

use async_trait::async_trait;

use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;

/// Queries carry a request id for log correlation across stages.
pub trait HasRequestId {
    fn request_id(&self) -> &str;
}

/// Everything the pipeline observed while producing a selection.
#[derive(Clone)]
pub struct PipelineResult<Q, C> {
    /// The query after hydration.
    pub query: Q,
    /// Every candidate any source produced.
    pub retrieved_candidates: Vec<C>,
    /// Candidates removed by filters, pre- and post-selection.
    pub filtered_candidates: Vec<C>,
    /// The final ranked selection.
    pub selected_candidates: Vec<C>,
}

#[async_trait]
pub trait CandidatePipeline<Q, C>: Send + Sync
where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<Q>>];
    fn sources(&self) -> &[Box<dyn Source<Q, C>>];
    fn hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn scorers(&self) -> &[Box<dyn Scorer<Q, C>>];
    fn selector(&self) -> &dyn Selector<Q, C>;
    fn post_selection_hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn post_selection_filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<Q, C>>>>;
    /// Hard cap on the selection size, applied after the selector.
    fn result_size(&self) -> usize;

    /// Run the full stage sequence for one query.
    async fn execute(&self, query: Q) -> PipelineResult<Q, C> {
        let mut query = query;

        for qh in self.query_hydrators() {
            if !qh.enable(&query) {
                continue;
            }
            match qh.hydrate(&query).await {
                Ok(hydrated) => qh.update(&mut query, hydrated),
                Err(e) => log::warn!(
                    "request_id={} query hydrator {} failed: {}",
                    query.request_id(),
                    qh.name(),
                    e
                ),
            }
        }

        let mut retrieved: Vec<C> = Vec::new();
        for source in self.sources() {
            if !source.enable(&query) {
                continue;
            }
            match source.get_candidates(&query).await {
                Ok(mut candidates) => retrieved.append(&mut candidates),
                Err(e) => log::warn!(
                    "request_id={} source {} failed: {}",
                    query.request_id(),
                    source.name(),
                    e
                ),
            }
        }

        let mut candidates = retrieved.clone();
        run_hydrators(self.hydrators(), &query, &mut candidates).await;

        let mut removed_total: Vec<C> = Vec::new();
        run_filters(self.filters(), &query, &mut candidates, &mut removed_total).await;

        for scorer in self.scorers() {
            if !scorer.enable(&query) {
                continue;
            }
            match scorer.score(&query, &candidates).await {
                Ok(scored) if scored.len() == candidates.len() => {
                    for (candidate, scored) in candidates.iter_mut().zip(scored) {
                        scorer.update(candidate, scored);
                    }
                }
                Ok(scored) => log::warn!(
                    "request_id={} scorer {} returned {} results for {} candidates; skipped",
                    query.request_id(),
                    scorer.name(),
                    scored.len(),
                    candidates.len()
                ),
                Err(e) => log::warn!(
                    "request_id={} scorer {} failed: {}",
                    query.request_id(),
                    scorer.name(),
                    e
                ),
            }
        }

        let selector = self.selector();
        let mut selected = if selector.enable(&query) {
            selector.select(&query, candidates)
        } else {
            candidates
        };
        selected.truncate(self.result_size());

        run_hydrators(self.post_selection_hydrators(), &query, &mut selected).await;
        run_filters(
            self.post_selection_filters(),
            &query,
            &mut selected,
            &mut removed_total,
        )
        .await;

        let side_effects = self.side_effects();
        let input = Arc::new(SideEffectInput {
            query: Arc::new(query.clone()),
            selected_candidates: selected.clone(),
        });
        tokio::spawn(async move {
            for effect in side_effects.iter() {
                if !effect.enable(Arc::clone(&input.query)) {
                    continue;
                }
                if let Err(e) = effect.run(Arc::clone(&input)).await {
                    log::warn!("side effect {} failed: {}", effect.name(), e);
                }
            }
        });

        PipelineResult {
            query,
            retrieved_candidates: retrieved,
            filtered_candidates: removed_total,
            selected_candidates: selected,
        }
    }
}

async fn run_hydrators<Q, C>(hydrators: &[Box<dyn Hydrator<Q, C>>], query: &Q, candidates: &mut [C])
where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    for hydrator in hydrators {
        if !hydrator.enable(query) {
            continue;
        }
        match hydrator.hydrate(query, candidates).await {
            Ok(hydrated) if hydrated.len() == candidates.len() => {
                for (candidate, hydrated) in candidates.iter_mut().zip(hydrated) {
                    hydrator.update(candidate, hydrated);
                }
            }
            Ok(hydrated) => log::warn!(
                "request_id={} hydrator {} returned {} results for {} candidates; skipped",
                query.request_id(),
                hydrator.name(),
                hydrated.len(),
                candidates.len()
            ),
            Err(e) => log::warn!(
                "request_id={} hydrator {} failed: {}",
                query.request_id(),
                hydrator.name(),
                e
            ),
        }
    }
}

async fn run_filters<Q, C>(
    filters: &[Box<dyn Filter<Q, C>>],
    query: &Q,
    candidates: &mut Vec<C>,
    removed_total: &mut Vec<C>,
) where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    for filter in filters {
        if !filter.enable(query) {
            continue;
        }
        match filter.filter(query, candidates.clone()).await {
            Ok(result) => {
                *candidates = result.kept;
                removed_total.extend(result.removed);
            }
            Err(e) => log::warn!(
                "request_id={} filter {} failed: {}",
                query.request_id(),
                filter.name(),
                e
            ),
        }
    }
}
