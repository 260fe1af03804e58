// crates/adminbound-core/src/common.rs
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Counters for one aggregation run.
///
/// Returned inside [`crate::aggregate::Aggregated`]; partial counts from
/// parallel workers are summed with `+=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Units handed to the pipeline.
    pub units_seen: usize,
    /// Units skipped because their own code is not canonical.
    pub units_skipped: usize,
    /// Units whose fragment source failed.
    pub units_failed: usize,
    pub fragments_kept: usize,
    pub fragments_discarded: usize,
    /// Codes dropped by the merger (no rings) or by the county/city overlap check.
    pub codes_dropped: usize,
    pub city_features: usize,
    pub county_features: usize,
}

impl AddAssign for RunStats {
    fn add_assign(&mut self, rhs: Self) {
        self.units_seen += rhs.units_seen;
        self.units_skipped += rhs.units_skipped;
        self.units_failed += rhs.units_failed;
        self.fragments_kept += rhs.fragments_kept;
        self.fragments_discarded += rhs.fragments_discarded;
        self.codes_dropped += rhs.codes_dropped;
        self.city_features += rhs.city_features;
        self.county_features += rhs.county_features;
    }
}
