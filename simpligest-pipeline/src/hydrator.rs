use async_trait::async_trait;

use crate::util;

/// Hydrators enrich candidates with derived or looked-up data. Like
/// query hydrators they work copy-then-update so each component only
/// ever touches the fields it owns: `hydrate` returns one enriched
/// candidate per input, `update` merges the owned fields back.
#[async_trait]
pub trait Hydrator<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Whether this hydrator applies to the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Return enriched copies, index-aligned with `candidates`.
    async fn hydrate(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy the owned fields from `hydrated` into `candidate`.
    fn update(&self, candidate: &mut C, hydrated: C);

    /// Stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
