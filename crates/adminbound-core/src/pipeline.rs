// crates/adminbound-core/src/pipeline.rs
//! End-to-end runs over local files, callable without the CLI.

use crate::aggregate::aggregate;
use crate::common::RunStats;
use crate::enrich::Enricher;
use crate::error::Result;
use crate::flatten::{flatten_response, Flattened};
use crate::loader::{
    load_basic_stats, load_cartographic, load_label_placement, load_reference_tables,
    load_tree_responses, load_units, GeoJsonDir,
};
use crate::serialize::{write_to_path, CompressionMode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

/// Inputs and outputs of an aggregation run over converted boundary files.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Prefecture-level unit list.
    pub units: PathBuf,
    /// Directory holding one `<code>.<fragment_extension>` per unit.
    pub fragments_dir: PathBuf,
    pub fragment_extension: String,
    /// Basic statistics table (required).
    pub stats: PathBuf,
    /// Cartographic metadata table (required).
    pub meta: PathBuf,
    /// Label-placement table (optional).
    pub labels: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub compression: CompressionMode,
    /// Worker count; `1` runs sequentially.
    pub jobs: usize,
}

impl AggregateConfig {
    pub const COUNTY_FILE: &'static str = "county.geojsonl";
    pub const CITY_FILE: &'static str = "city.geojsonl";

    pub fn county_output(&self) -> PathBuf {
        output_path(&self.out_dir, Self::COUNTY_FILE, self.compression)
    }

    pub fn city_output(&self) -> PathBuf {
        output_path(&self.out_dir, Self::CITY_FILE, self.compression)
    }
}

/// Inputs and output of a flattening run over mapping-service payloads.
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Response files, processed in order.
    pub inputs: Vec<PathBuf>,
    pub stats: Option<PathBuf>,
    pub meta: Option<PathBuf>,
    pub labels: Option<PathBuf>,
    pub output: PathBuf,
    pub compression: CompressionMode,
}

/// Counts reported by [`run_flatten`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenSummary {
    pub features: usize,
    pub failures: usize,
}

fn output_path(dir: &Path, file: &str, compression: CompressionMode) -> PathBuf {
    match compression {
        CompressionMode::Gzip => dir.join(format!("{file}.gz")),
        CompressionMode::None => dir.join(file),
    }
}

// -----------------------------------------------------------------------------
// RUNS
// -----------------------------------------------------------------------------

/// Loads the tables and unit list, aggregates every unit, writes both
/// collections.
///
/// Reference tables are loaded first: without them there is nothing sensible
/// to write, so a failure here aborts before any unit is touched.
pub fn run_aggregate(config: &AggregateConfig) -> Result<RunStats> {
    let enricher =
        load_reference_tables(&config.stats, &config.meta, config.labels.as_deref())?
            .into_enricher();
    let units = load_units(&config.units)?;
    let source =
        GeoJsonDir::new(&config.fragments_dir).with_extension(config.fragment_extension.clone());

    let out = aggregate(&units, &source, &enricher, config.jobs)?;

    fs::create_dir_all(&config.out_dir)?;
    let county_path = config.county_output();
    let city_path = config.city_output();
    let county = write_to_path(&county_path, out.county.values(), config.compression)?;
    info!(path = %county_path.display(), features = county, "county collection written");
    let city = write_to_path(&city_path, out.city.values(), config.compression)?;
    info!(path = %city_path.display(), features = city, "city collection written");

    Ok(out.stats)
}

/// Flattens every response file into one feature stream, optionally enriched.
pub fn run_flatten(config: &FlattenConfig) -> Result<FlattenSummary> {
    let mut enricher = Enricher::new();
    if let Some(path) = &config.stats {
        enricher.push(Box::new(load_basic_stats(path)?));
    }
    if let Some(path) = &config.meta {
        enricher.push(Box::new(load_cartographic(path)?));
    }
    if let Some(path) = &config.labels {
        enricher.push(Box::new(load_label_placement(path)?));
    }

    info!(tables = enricher.len(), "reference tables loaded");

    let mut all = Flattened::default();
    for input in &config.inputs {
        for response in load_tree_responses(input)? {
            all.extend(flatten_response(&response));
        }
        info!(path = %input.display(), features = all.features.len(), "payload flattened");
    }

    if !enricher.is_empty() {
        for feature in &mut all.features {
            enricher.enrich(feature);
        }
    }

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let written = write_to_path(&config.output, &all.features, config.compression)?;
    info!(
        path = %config.output.display(),
        features = written,
        failures = all.failures.len(),
        "flattened collection written"
    );

    Ok(FlattenSummary {
        features: written,
        failures: all.failures.len(),
    })
}
