use async_trait::async_trait;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use simpligest_insights::{InsightConfig, Product, Sale};

use crate::candidate_pipeline::CandidatePipeline;
use crate::components::as_of_query_hydrator::AsOfQueryHydrator;
use crate::components::category_diversity_scorer::CategoryDiversityScorer;
use crate::components::no_action_filter::NoActionFilter;
use crate::components::report_log_side_effect::ReportLogSideEffect;
use crate::components::restock_stake_scorer::RestockStakeScorer;
use crate::components::snapshot_source::SnapshotInsightSource;
use crate::components::stockout_urgency_hydrator::StockoutUrgencyHydrator;
use crate::components::top_k_selector::TopKSelector;
use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{InsightCandidate, ReportQuery};

/// The daily inventory report pipeline.
///
/// Flow:
/// 1. AsOfQueryHydrator pins the report to a snapshot instant
/// 2. SnapshotInsightSource runs the estimator, one candidate per product
/// 3. StockoutUrgencyHydrator scores how soon each product runs out
/// 4. NoActionFilter drops products with nothing to act on
/// 5. RestockStakeScorer ranks by capital at stake
/// 6. CategoryDiversityScorer attenuates repeated categories
/// 7. TopKSelector keeps the top N
/// 8. ReportLogSideEffect logs completion
pub struct DailyReportPipeline {
    query_hydrators: Vec<Box<dyn QueryHydrator<ReportQuery>>>,
    sources: Vec<Box<dyn Source<ReportQuery, InsightCandidate>>>,
    hydrators: Vec<Box<dyn Hydrator<ReportQuery, InsightCandidate>>>,
    filters: Vec<Box<dyn Filter<ReportQuery, InsightCandidate>>>,
    scorers: Vec<Box<dyn Scorer<ReportQuery, InsightCandidate>>>,
    selector: TopKSelector,
    post_selection_hydrators: Vec<Box<dyn Hydrator<ReportQuery, InsightCandidate>>>,
    post_selection_filters: Vec<Box<dyn Filter<ReportQuery, InsightCandidate>>>,
    side_effects: Arc<Vec<Box<dyn SideEffect<ReportQuery, InsightCandidate>>>>,
    result_size: usize,
}

impl DailyReportPipeline {
    /// Build the pipeline over a (products, sales) snapshot.
    ///
    /// `clock` fills queries that arrive without an `as_of`; pass a
    /// frozen instant in tests and `Utc::now()` in production callers.
    pub fn with_snapshot(
        products: Vec<Product>,
        sales: Vec<Sale>,
        clock: DateTime<Utc>,
    ) -> Self {
        Self::with_snapshot_and_size(products, sales, clock, 5)
    }

    /// Build the pipeline with a custom selection size.
    pub fn with_snapshot_and_size(
        products: Vec<Product>,
        sales: Vec<Sale>,
        clock: DateTime<Utc>,
        result_size: usize,
    ) -> Self {
        let query_hydrators: Vec<Box<dyn QueryHydrator<ReportQuery>>> =
            vec![Box::new(AsOfQueryHydrator::new(clock))];

        let sources: Vec<Box<dyn Source<ReportQuery, InsightCandidate>>> = vec![Box::new(
            SnapshotInsightSource::with_config(products, sales, InsightConfig::default()),
        )];

        let hydrators: Vec<Box<dyn Hydrator<ReportQuery, InsightCandidate>>> =
            vec![Box::new(StockoutUrgencyHydrator::default())];

        let filters: Vec<Box<dyn Filter<ReportQuery, InsightCandidate>>> =
            vec![Box::new(NoActionFilter::default())];

        let scorers: Vec<Box<dyn Scorer<ReportQuery, InsightCandidate>>> = vec![
            Box::new(RestockStakeScorer),
            Box::new(CategoryDiversityScorer::default()),
        ];

        let selector = TopKSelector { k: result_size };

        let side_effects: Arc<Vec<Box<dyn SideEffect<ReportQuery, InsightCandidate>>>> =
            Arc::new(vec![Box::new(ReportLogSideEffect)]);

        Self {
            query_hydrators,
            sources,
            hydrators,
            filters,
            scorers,
            selector,
            post_selection_hydrators: Vec::new(),
            post_selection_filters: Vec::new(),
            side_effects,
            result_size,
        }
    }
}

#[async_trait]
impl CandidatePipeline<ReportQuery, InsightCandidate> for DailyReportPipeline {
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<ReportQuery>>] {
        &self.query_hydrators
    }

    fn sources(&self) -> &[Box<dyn Source<ReportQuery, InsightCandidate>>] {
        &self.sources
    }

    fn hydrators(&self) -> &[Box<dyn Hydrator<ReportQuery, InsightCandidate>>] {
        &self.hydrators
    }

    fn filters(&self) -> &[Box<dyn Filter<ReportQuery, InsightCandidate>>] {
        &self.filters
    }

    fn scorers(&self) -> &[Box<dyn Scorer<ReportQuery, InsightCandidate>>] {
        &self.scorers
    }

    fn selector(&self) -> &dyn Selector<ReportQuery, InsightCandidate> {
        &self.selector
    }

    fn post_selection_hydrators(&self) -> &[Box<dyn Hydrator<ReportQuery, InsightCandidate>>] {
        &self.post_selection_hydrators
    }

    fn post_selection_filters(&self) -> &[Box<dyn Filter<ReportQuery, InsightCandidate>>] {
        &self.post_selection_filters
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<ReportQuery, InsightCandidate>>>> {
        Arc::clone(&self.side_effects)
    }

    fn result_size(&self) -> usize {
        self.result_size
    }
}
