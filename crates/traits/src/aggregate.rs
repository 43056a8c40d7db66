//! Window aggregation trait definitions.

use statline_primitives::{DailyStat, RollingFeatureRow};

/// Trailing window aggregation over per-player daily rollups.
///
/// Implementations must treat each player independently and emit one row per
/// calendar day between the player's first and last observed date.
pub trait WindowAggregator: Send + Sync {
    /// Width in days of the short window.
    fn short_window(&self) -> usize;

    /// Width in days of the long window.
    fn long_window(&self) -> usize;

    /// Aggregate daily rollups into rolling rows.
    ///
    /// # Arguments
    /// * `daily` - Daily rollups for a single role, any order
    ///
    /// # Returns
    /// Rows sorted by player, then date.
    fn aggregate(&self, daily: &[DailyStat]) -> Vec<RollingFeatureRow>;
}
