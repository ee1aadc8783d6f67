use async_trait::async_trait;

use crate::util;

/// Outcome of one filter pass. Removed candidates are reported, not
/// dropped silently, so the final result can account for them.
pub struct FilterResult<C> {
    pub kept: Vec<C>,
    pub removed: Vec<C>,
}

/// Filters partition the candidate set; only kept candidates continue
/// to the next stage.
#[async_trait]
pub trait Filter<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Whether this filter applies to the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Partition `candidates` into kept and removed sets.
    async fn filter(&self, query: &Q, candidates: Vec<C>) -> Result<FilterResult<C>, String>;

    /// Stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
