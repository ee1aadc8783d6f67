use async_trait::async_trait;

use simpligest_insights::{product_insights, InsightConfig, Product, Sale};

use crate::roles::{role_permissions, Permission, UserRole};
use crate::source::Source;
use crate::types::{InsightCandidate, ReportQuery};

/// Source that runs the insight estimator over an in-memory
/// (products, sales) snapshot and emits one candidate per product.
///
/// Role gating happens here, at the edge of the candidate set: a
/// department manager only ever receives their own category, and a
/// role without the pricing permission receives candidates with the
/// price recommendation stripped. Nothing downstream needs to know
/// roles exist.
pub struct SnapshotInsightSource {
    products: Vec<Product>,
    sales: Vec<Sale>,
    config: InsightConfig,
}

impl SnapshotInsightSource {
    /// Create a source with the default estimator policy.
    pub fn new(products: Vec<Product>, sales: Vec<Sale>) -> Self {
        Self::with_config(products, sales, InsightConfig::default())
    }

    /// Create a source with custom estimator policy values.
    pub fn with_config(products: Vec<Product>, sales: Vec<Sale>, config: InsightConfig) -> Self {
        Self {
            products,
            sales,
            config,
        }
    }
}

#[async_trait]
impl Source<ReportQuery, InsightCandidate> for SnapshotInsightSource {
    fn enable(&self, _query: &ReportQuery) -> bool {
        !self.products.is_empty()
    }

    async fn get_candidates(&self, query: &ReportQuery) -> Result<Vec<InsightCandidate>, String> {
        let as_of = query
            .as_of
            .ok_or_else(|| "query has no as_of instant; hydrate it first".to_string())?;

        let insights = product_insights(&self.products, &self.sales, as_of, &self.config);
        let can_view_pricing =
            role_permissions(&query.role).contains(&Permission::ViewPricing);

        // product_insights emits one insight per product, index-aligned.
        let mut candidates: Vec<InsightCandidate> = self
            .products
            .iter()
            .zip(insights)
            .map(|(product, insight)| InsightCandidate {
                product_id: insight.product_id,
                product_name: insight.product_name,
                category: insight.category,
                current_stock: product.stock,
                stock_min: product.stock_min,
                purchase_price: product.purchase_price,
                sale_price: product.sale_price,
                weekly_demand: insight.weekly_demand,
                daily_demand: insight.daily_demand,
                demand_level: insight.demand_level,
                trend: insight.trend,
                trend_ratio: insight.trend_ratio,
                stockout_in_days: insight.stockout_in_days,
                suggested_purchase: insight.suggested_purchase,
                price: can_view_pricing.then_some(insight.price),
                as_of,
                urgency_score: None,
                attention_score: None,
            })
            .collect();

        if let UserRole::DepartmentManager { ref category } = query.role {
            candidates.retain(|c| c.category == *category);
        }
        if !query.categories.is_empty() {
            candidates.retain(|c| query.categories.contains(&c.category));
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn frozen_now() -> DateTime<Utc> {
        "2026-07-01T09:00:00Z".parse().unwrap()
    }

    fn sample_product(id: &str, category: &str) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {}", id),
            category: category.into(),
            stock: 10.0,
            stock_min: 5.0,
            unit: "un".into(),
            purchase_price: 1000.0,
            sale_price: 1500.0,
            supplier: "ACME Ltda.".into(),
            created_at: None,
        }
    }

    fn sample_sale(product_id: &str, days_ago: i64) -> Sale {
        Sale {
            id: format!("s-{}-{}", product_id, days_ago),
            product_id: product_id.into(),
            product_name: product_id.into(),
            quantity: 2.0,
            unit_price: 1500.0,
            total: 3000.0,
            timestamp: frozen_now() - Duration::days(days_ago),
        }
    }

    fn owner_query() -> ReportQuery {
        ReportQuery {
            request_id: "req-001".into(),
            user_id: "owner-1".into(),
            role: UserRole::Owner,
            as_of: Some(frozen_now()),
            categories: vec![],
        }
    }

    #[tokio::test]
    async fn one_candidate_per_product() {
        let source = SnapshotInsightSource::new(
            vec![
                sample_product("p1", "almacen"),
                sample_product("p2", "limpieza"),
            ],
            vec![sample_sale("p1", 3), sample_sale("p1", 10)],
        );
        let candidates = source.get_candidates(&owner_query()).await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].weekly_demand > 0.0);
        assert_eq!(candidates[1].weekly_demand, 0.0);
    }

    #[tokio::test]
    async fn department_manager_sees_only_their_category() {
        let source = SnapshotInsightSource::new(
            vec![
                sample_product("p1", "almacen"),
                sample_product("p2", "limpieza"),
            ],
            vec![],
        );
        let query = ReportQuery {
            role: UserRole::DepartmentManager {
                category: "limpieza".into(),
            },
            ..owner_query()
        };
        let candidates = source.get_candidates(&query).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].category, "limpieza");
    }

    #[tokio::test]
    async fn cashier_gets_no_pricing() {
        let source =
            SnapshotInsightSource::new(vec![sample_product("p1", "almacen")], vec![]);
        let query = ReportQuery {
            role: UserRole::Cashier,
            ..owner_query()
        };
        let candidates = source.get_candidates(&query).await.unwrap();
        assert!(candidates[0].price.is_none());

        let candidates = source.get_candidates(&owner_query()).await.unwrap();
        assert!(candidates[0].price.is_some());
    }

    #[tokio::test]
    async fn unhydrated_query_is_an_error() {
        let source =
            SnapshotInsightSource::new(vec![sample_product("p1", "almacen")], vec![]);
        let query = ReportQuery {
            as_of: None,
            ..owner_query()
        };
        assert!(source.get_candidates(&query).await.is_err());
    }

    #[tokio::test]
    async fn source_disabled_for_empty_catalog() {
        let source = SnapshotInsightSource::new(vec![], vec![]);
        assert!(!source.enable(&owner_query()));
    }
}
