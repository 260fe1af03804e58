// crates/adminbound-core/src/aggregate.rs
//! Owns the per-run fragment buckets and turns them into finished collections.
//!
//! One [`Aggregator`] per worker: units are ingested into it, partial
//! aggregators are unioned with [`Aggregator::absorb`], and
//! [`Aggregator::finish`] merges and enriches every code exactly once.

use crate::classify::{classify, Classification};
use crate::code::is_canonical;
use crate::common::RunStats;
use crate::enrich::Enricher;
use crate::error::Result;
use crate::merge::merge;
use crate::model::GeometryFragment;
use crate::raw::UnitRaw;
use crate::serialize::FeatureMap;
use crate::store::FragmentStore;
use crate::traits::FragmentSource;
use tracing::{debug, info, warn};

/// Classification counts for one ingested unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitReport {
    pub own: usize,
    pub child: usize,
    pub discarded: usize,
}

/// Fragment buckets for the city-level and county-level collections.
#[derive(Debug, Default)]
pub struct Aggregator {
    city: FragmentStore,
    county: FragmentStore,
    stats: RunStats,
}

/// The two finished collections of a run.
#[derive(Debug, Default)]
pub struct Aggregated {
    pub county: FeatureMap,
    pub city: FeatureMap,
    pub stats: RunStats,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Classifies the fragments found for `unit_code` and files the kept ones.
    pub fn ingest_unit<I>(&mut self, unit_code: &str, fragments: I) -> UnitReport
    where
        I: IntoIterator<Item = GeometryFragment>,
    {
        let mut report = UnitReport::default();
        for fragment in fragments {
            match classify(&fragment.code, unit_code) {
                Classification::OwnUnit => {
                    report.own += 1;
                    self.city.push(fragment);
                }
                Classification::ChildUnit => {
                    report.child += 1;
                    self.county.push(fragment);
                }
                Classification::Discard => {
                    debug!(unit = unit_code, code = %fragment.code, "discarding fragment");
                    report.discarded += 1;
                }
            }
        }
        self.stats.fragments_kept += report.own + report.child;
        self.stats.fragments_discarded += report.discarded;
        report
    }

    /// Fetches one unit's fragments from `source` and ingests them.
    ///
    /// Failures are logged and counted; they never stop the run.
    pub fn process_unit<S>(&mut self, unit: &UnitRaw, source: &S)
    where
        S: FragmentSource + ?Sized,
    {
        self.stats.units_seen += 1;
        if !is_canonical(&unit.code) {
            warn!(code = %unit.code, name = unit.display_name(), "skipping unit with malformed code");
            self.stats.units_skipped += 1;
            return;
        }
        match source.fragments(unit) {
            Ok(fragments) => {
                let report = self.ingest_unit(&unit.code, fragments);
                info!(
                    code = %unit.code,
                    name = unit.display_name(),
                    own = report.own,
                    child = report.child,
                    discarded = report.discarded,
                    "unit ingested"
                );
            }
            Err(e) => {
                warn!(code = %unit.code, name = unit.display_name(), error = %e, "skipping unit");
                self.stats.units_failed += 1;
            }
        }
    }

    /// Unions another worker's buckets and counters into this one.
    pub fn absorb(&mut self, other: Aggregator) {
        self.city.absorb(other.city);
        self.county.absorb(other.county);
        self.stats += other.stats;
    }

    /// Merges and enriches every collected code.
    ///
    /// A code filed as a unit's own polygon is kept in the city collection
    /// only, even if another unit reported it as a child.
    pub fn finish(self, enricher: &Enricher) -> Aggregated {
        let Aggregator {
            city,
            mut county,
            mut stats,
        } = self;

        debug!(
            city = city.fragment_count(),
            county = county.fragment_count(),
            "merging collected fragments"
        );
        for code in city.codes() {
            if county.remove(code).is_some() {
                warn!(code, "code filed at both levels, keeping the city-level polygons");
                stats.codes_dropped += 1;
            }
        }

        let city = finish_store(city, enricher, &mut stats);
        let county = finish_store(county, enricher, &mut stats);
        stats.city_features = city.len();
        stats.county_features = county.len();
        info!(
            city = city.len(),
            county = county.len(),
            dropped = stats.codes_dropped,
            "aggregation finished"
        );

        Aggregated {
            county,
            city,
            stats,
        }
    }
}

fn finish_store(store: FragmentStore, enricher: &Enricher, stats: &mut RunStats) -> FeatureMap {
    let mut out = FeatureMap::new();
    for (code, fragments) in store {
        let name = fragments
            .iter()
            .find_map(GeometryFragment::name)
            .unwrap_or("")
            .to_string();
        match merge(&code, fragments) {
            Ok(mut feature) => {
                enricher.enrich(&mut feature);
                out.insert(code, feature);
            }
            Err(e) => {
                warn!(code = %code, name = %name, error = %e, "dropping unit");
                stats.codes_dropped += 1;
            }
        }
    }
    out
}

/// Ingests `units` one after another.
pub fn collect_sequential<S>(units: &[UnitRaw], source: &S) -> Aggregator
where
    S: FragmentSource + ?Sized,
{
    let mut agg = Aggregator::new();
    for unit in units {
        agg.process_unit(unit, source);
    }
    agg
}

/// Ingests `units` on a pool of `jobs` workers, each with its own aggregator.
///
/// `jobs <= 1` runs sequentially.
#[cfg(feature = "parallel")]
pub fn collect_parallel<S>(units: &[UnitRaw], source: &S, jobs: usize) -> Result<Aggregator>
where
    S: FragmentSource,
{
    use rayon::prelude::*;

    if jobs <= 1 {
        return Ok(collect_sequential(units, source));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| {
            crate::error::BoundaryError::InvalidData(format!("cannot start worker pool: {e}"))
        })?;

    Ok(pool.install(|| {
        units
            .par_iter()
            .fold(Aggregator::new, |mut agg, unit| {
                agg.process_unit(unit, source);
                agg
            })
            .reduce(Aggregator::new, |mut a, b| {
                a.absorb(b);
                a
            })
    }))
}

#[cfg(not(feature = "parallel"))]
pub fn collect_parallel<S>(units: &[UnitRaw], source: &S, jobs: usize) -> Result<Aggregator>
where
    S: FragmentSource,
{
    if jobs > 1 {
        debug!(jobs, "'parallel' feature disabled, running sequentially");
    }
    Ok(collect_sequential(units, source))
}

/// Full pipeline: ingest every unit, then merge and enrich.
pub fn aggregate<S>(
    units: &[UnitRaw],
    source: &S,
    enricher: &Enricher,
    jobs: usize,
) -> Result<Aggregated>
where
    S: FragmentSource,
{
    let agg = collect_parallel(units, source, jobs)?;
    Ok(agg.finish(enricher))
}
