use crate::util;

/// Selectors order the scored candidates and cut the list down to the
/// requested size.
pub trait Selector<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Sort descending by score, then truncate to `size()` if set.
    fn select(&self, _query: &Q, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = self.sort(candidates);
        if let Some(limit) = self.size() {
            sorted.truncate(limit);
        }
        sorted
    }

    /// Whether this selector applies to the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// The ranking score of a candidate.
    fn score(&self, candidate: &C) -> f64;

    /// Sort candidates by score, best first. NaN scores sink to the
    /// end so a scoring bug can never occupy the top of a report.
    fn sort(&self, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = candidates;
        sorted.sort_by(|a, b| {
            let sa = self.score(a);
            let sb = self.score(b);
            match (sa.is_nan(), sb.is_nan()) {
                (true, true) => std::cmp::Ordering::Equal,
                (true, false) => std::cmp::Ordering::Greater,
                (false, true) => std::cmp::Ordering::Less,
                (false, false) => sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal),
            }
        });
        sorted
    }

    /// Maximum number of candidates to keep; `None` means no cut.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
