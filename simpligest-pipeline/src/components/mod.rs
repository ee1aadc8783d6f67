pub mod as_of_query_hydrator;
pub mod category_diversity_scorer;
pub mod no_action_filter;
pub mod report_log_side_effect;
pub mod restock_stake_scorer;
pub mod snapshot_source;
pub mod stockout_urgency_hydrator;
pub mod top_k_selector;
