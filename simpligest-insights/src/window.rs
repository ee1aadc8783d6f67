//! Sales window selection.
//!
//! Every estimator reads the same partition of a product's sale history:
//! the trailing analysis window (default 90 days) plus two adjacent
//! momentum windows (days 0-30 and 30-60 ago). Selection is the only
//! place that compares timestamps; the arithmetic downstream works on
//! the partition alone.

use chrono::{DateTime, Duration, Utc};

use crate::config::InsightConfig;
use crate::types::Sale;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// One product's sale history partitioned into the analysis windows.
pub struct SalesWindows<'a> {
    /// Sales inside the trailing analysis window, unordered.
    pub window: Vec<&'a Sale>,
    /// Quantity sold in the most recent momentum window.
    pub recent_qty: f64,
    /// Quantity sold in the preceding momentum window.
    pub prior_qty: f64,
    /// Fractional days between the earliest windowed sale and `now`,
    /// clamped to `[1, window_days]`. 1 when the window is empty.
    pub elapsed_days: f64,
}

impl<'a> SalesWindows<'a> {
    /// Partition `sales` for a single product relative to `now`.
    ///
    /// `now` is always supplied by the caller; nothing in this crate
    /// reads the system clock.
    pub fn select(
        product_id: &str,
        sales: &'a [Sale],
        now: DateTime<Utc>,
        config: &InsightConfig,
    ) -> Self {
        let window_start = now - Duration::days(config.window_days);
        let recent_start = now - Duration::days(config.trend_window_days);
        let prior_start = now - Duration::days(2 * config.trend_window_days);

        let mut window = Vec::new();
        let mut recent_qty = 0.0;
        let mut prior_qty = 0.0;
        let mut earliest: Option<DateTime<Utc>> = None;

        for sale in sales {
            if sale.product_id != product_id || sale.timestamp < window_start {
                continue;
            }
            if sale.timestamp >= recent_start {
                recent_qty += sale.quantity;
            } else if sale.timestamp >= prior_start {
                prior_qty += sale.quantity;
            }
            earliest = match earliest {
                Some(t) if t <= sale.timestamp => Some(t),
                _ => Some(sale.timestamp),
            };
            window.push(sale);
        }

        let elapsed_days = earliest
            .map(|t| (now - t).num_seconds() as f64 / SECONDS_PER_DAY)
            .unwrap_or(1.0)
            .clamp(1.0, config.window_days as f64);

        Self {
            window,
            recent_qty,
            prior_qty,
            elapsed_days,
        }
    }

    /// Total quantity sold inside the analysis window.
    pub fn total_qty(&self) -> f64 {
        self.window.iter().map(|s| s.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(product_id: &str, qty: f64, days_ago: i64, now: DateTime<Utc>) -> Sale {
        Sale {
            id: format!("s-{product_id}-{days_ago}"),
            product_id: product_id.into(),
            product_name: "test".into(),
            quantity: qty,
            unit_price: 1000.0,
            total: qty * 1000.0,
            timestamp: now - Duration::days(days_ago),
        }
    }

    fn frozen_now() -> DateTime<Utc> {
        "2026-08-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn partitions_into_momentum_windows() {
        let now = frozen_now();
        let sales = vec![
            sale("p1", 2.0, 5, now),   // recent
            sale("p1", 3.0, 45, now),  // prior
            sale("p1", 4.0, 80, now),  // analysis window only
            sale("p1", 9.0, 120, now), // outside everything
            sale("p2", 7.0, 5, now),   // other product
        ];
        let w = SalesWindows::select("p1", &sales, now, &InsightConfig::default());
        assert_eq!(w.window.len(), 3);
        assert!((w.recent_qty - 2.0).abs() < 1e-9);
        assert!((w.prior_qty - 3.0).abs() < 1e-9);
        assert!((w.total_qty() - 9.0).abs() < 1e-9);
        assert!((w.elapsed_days - 80.0).abs() < 1e-6);
    }

    #[test]
    fn empty_window_has_unit_elapsed() {
        let now = frozen_now();
        let w = SalesWindows::select("p1", &[], now, &InsightConfig::default());
        assert!(w.window.is_empty());
        assert!((w.elapsed_days - 1.0).abs() < 1e-9);
        assert_eq!(w.total_qty(), 0.0);
    }

    #[test]
    fn very_recent_history_is_floored_at_one_day() {
        let now = frozen_now();
        let sales = vec![Sale {
            timestamp: now - Duration::hours(3),
            ..sale("p1", 5.0, 0, now)
        }];
        let w = SalesWindows::select("p1", &sales, now, &InsightConfig::default());
        assert!((w.elapsed_days - 1.0).abs() < 1e-9);
    }
}
