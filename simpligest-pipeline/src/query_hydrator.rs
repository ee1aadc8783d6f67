use async_trait::async_trait;

use crate::util;

/// Query hydrators fill in missing query context before any candidates
/// are fetched. Each one owns specific fields: `hydrate` computes a
/// fully populated copy, `update` copies only the owned fields back.
#[async_trait]
pub trait QueryHydrator<Q>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
{
    /// Whether this hydrator applies to the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Return a copy of the query with this hydrator's fields filled in.
    async fn hydrate(&self, query: &Q) -> Result<Q, String>;

    /// Copy the owned fields from `hydrated` into `query`.
    fn update(&self, query: &mut Q, hydrated: Q);

    /// Stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
