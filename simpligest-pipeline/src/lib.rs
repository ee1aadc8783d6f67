//! The daily-report candidate pipeline.
//!
//! A report is produced the way a recommender assembles a feed: hydrate
//! the query, fetch candidates from sources, enrich them, filter, score,
//! select the top few, then fire side effects. Every stage is a trait so
//! pipelines are wired from interchangeable components.

pub mod candidate_pipeline;
pub mod catalog_loader;
pub mod components;
pub mod filter;
pub mod hydrator;
pub mod pipelines;
pub mod query_hydrator;
pub mod roles;
pub mod scorer;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod types;
pub mod util;

pub use candidate_pipeline::{CandidatePipeline, HasRequestId, PipelineResult};
pub use roles::{merge_permissions, role_permissions, Permission, UserRole};
pub use types::{InsightCandidate, ReportQuery};
