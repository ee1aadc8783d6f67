use async_trait::async_trait;

use crate::util;

/// Scorers assign or adjust ranking scores. `score` returns one scored
/// copy per input candidate, index-aligned; `update` merges only the
/// score fields this scorer owns.
#[async_trait]
pub trait Scorer<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Whether this scorer applies to the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Return scored copies, index-aligned with `candidates`.
    async fn score(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy the owned score fields from `scored` into `candidate`.
    fn update(&self, candidate: &mut C, scored: C);

    /// Stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
