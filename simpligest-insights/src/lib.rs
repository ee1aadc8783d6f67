pub mod config;
pub mod demand;
pub mod engine;
pub mod margin;
pub mod pricing;
pub mod reorder;
pub mod trend;
pub mod types;
pub mod window;

pub use config::InsightConfig;
pub use demand::{classify_demand, DemandEstimate};
pub use engine::{insight_for, product_insights};
pub use pricing::recommend_price;
pub use trend::TrendEstimate;
pub use types::{DemandLevel, PriceRecommendation, Product, ProductInsight, Sale, SalesTrend};
pub use window::SalesWindows;
