use async_trait::async_trait;

use crate::util;

/// Sources produce the initial candidate set for a query.
#[async_trait]
pub trait Source<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Whether this source applies to the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Produce candidates for the query.
    async fn get_candidates(&self, query: &Q) -> Result<Vec<C>, String>;

    /// Stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
