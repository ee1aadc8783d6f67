use async_trait::async_trait;

use chrono::{DateTime, Utc};

use crate::query_hydrator::QueryHydrator;
use crate::types::ReportQuery;

/// Fills in a missing `as_of` instant on the query.
///
/// The clock value is injected at construction rather than read from
/// the system clock here, so a pipeline built for a test produces the
/// same report every time it runs.
pub struct AsOfQueryHydrator {
    pub clock: DateTime<Utc>,
}

impl AsOfQueryHydrator {
    pub fn new(clock: DateTime<Utc>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl QueryHydrator<ReportQuery> for AsOfQueryHydrator {
    fn enable(&self, query: &ReportQuery) -> bool {
        query.as_of.is_none()
    }

    async fn hydrate(&self, query: &ReportQuery) -> Result<ReportQuery, String> {
        Ok(ReportQuery {
            as_of: Some(self.clock),
            ..query.clone()
        })
    }

    fn update(&self, query: &mut ReportQuery, hydrated: ReportQuery) {
        query.as_of = hydrated.as_of;
    }
}
