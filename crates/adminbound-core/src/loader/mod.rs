// crates/adminbound-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (file I/O, decompression) and hands parsed
//! inputs to the pipeline: the unit list, the reference tables, converted
//! boundary files and mapping-service tree payloads.

use crate::enrich::{
    BasicStatsTable, CartographicTable, LabelPlacementTable, ReferenceTables,
};
use crate::error::{BoundaryError, Result};
use crate::model::GeometryFragment;
use crate::raw::{
    BasicStatsRaw, CartoTableRaw, LabelTableRaw, TreeResponseRaw, UnitRaw, UnitsRaw,
};
use crate::traits::FragmentSource;
use geojson::GeoJson;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod common_io;

pub use common_io::{open_stream, read_json};

/// Loads the prefecture-level unit list.
pub fn load_units(path: impl AsRef<Path>) -> Result<UnitsRaw> {
    let path = path.as_ref();
    let units: UnitsRaw = read_json(path)?;
    info!(path = %path.display(), units = units.len(), "loaded unit list");
    Ok(units)
}

/// Loads the basic statistics table (code → positional row).
pub fn load_basic_stats(path: impl AsRef<Path>) -> Result<BasicStatsTable> {
    let rows: BasicStatsRaw = read_json(path.as_ref())?;
    Ok(BasicStatsTable::from_raw(rows))
}

/// Loads the cartographic metadata table.
pub fn load_cartographic(path: impl AsRef<Path>) -> Result<CartographicTable> {
    let entries: CartoTableRaw = read_json(path.as_ref())?;
    Ok(CartographicTable::from_raw(entries))
}

/// Loads the label-placement table.
pub fn load_label_placement(path: impl AsRef<Path>) -> Result<LabelPlacementTable> {
    let entries: LabelTableRaw = read_json(path.as_ref())?;
    Ok(LabelPlacementTable::from_raw(entries))
}

/// Loads the reference tables. The label table is optional; the other two are
/// required and any failure aborts.
pub fn load_reference_tables(
    stats_path: impl AsRef<Path>,
    meta_path: impl AsRef<Path>,
    labels_path: Option<&Path>,
) -> Result<ReferenceTables> {
    let basic = load_basic_stats(stats_path)?;
    let cartographic = load_cartographic(meta_path)?;
    let labels = labels_path.map(load_label_placement).transpose()?;

    info!(
        basic = basic.len(),
        cartographic = cartographic.len(),
        labels = labels.as_ref().map_or(0, |l| l.len()),
        "loaded reference tables"
    );
    Ok(ReferenceTables {
        basic,
        cartographic,
        labels,
    })
}

/// Reads one converted GeoJSON file into fragments.
///
/// The file holds a `FeatureCollection` or a single `Feature`.
pub fn read_fragments(path: impl AsRef<Path>) -> Result<Vec<GeometryFragment>> {
    let path = path.as_ref();
    let value: serde_json::Value = read_json(path)?;
    let features = match GeoJson::from_json_value(value)? {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => {
            return Err(BoundaryError::InvalidData(format!(
                "{} holds a bare geometry, expected features",
                path.display()
            )))
        }
    };
    Ok(features
        .into_iter()
        .flat_map(GeometryFragment::from_feature)
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TreePayload {
    Many(Vec<TreeResponseRaw>),
    One(TreeResponseRaw),
}

/// Loads mapping-service responses. The file holds either one response
/// object or an array of them (one per province).
pub fn load_tree_responses(path: impl AsRef<Path>) -> Result<Vec<TreeResponseRaw>> {
    let payload: TreePayload = read_json(path.as_ref())?;
    Ok(match payload {
        TreePayload::Many(v) => v,
        TreePayload::One(r) => vec![r],
    })
}

/// Converted boundary files on disk, one `<code>.<extension>` per unit.
#[derive(Debug, Clone)]
pub struct GeoJsonDir {
    dir: PathBuf,
    extension: String,
}

impl GeoJsonDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: "geojson".to_string(),
        }
    }

    /// Overrides the file extension (e.g. `geojson.gz`).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn path_for(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{code}.{}", self.extension))
    }
}

impl FragmentSource for GeoJsonDir {
    fn fragments(&self, unit: &UnitRaw) -> Result<Vec<GeometryFragment>> {
        let path = self.path_for(&unit.code);
        if !path.is_file() {
            return Err(BoundaryError::NotFound(format!(
                "no converted boundary file at {}",
                path.display()
            )));
        }
        read_fragments(&path)
    }
}
