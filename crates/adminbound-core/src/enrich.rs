// crates/adminbound-core/src/enrich.rs
//! Joins merged features against the code-keyed reference tables.

use crate::model::{keys, BoundingBox, MergedFeature};
use crate::raw::{BasicStatsRaw, CartoTableRaw, LabelTableRaw};
use crate::traits::MetadataSource;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Positions inside a basic-statistics row. Index 0 (name) and 5 are not used.
mod column {
    pub const SEAT: usize = 1;
    pub const POPULATION: usize = 2;
    pub const AREA: usize = 3;
    pub const AREA_CODE: usize = 4;
    pub const UNIT_TYPE: usize = 6;
}

/// Lenient integer parse: anything unparseable counts as zero.
fn parse_count(s: &str) -> i64 {
    s.trim().parse().unwrap_or(0)
}

/// Seat of government, population, area, area code and unit type.
#[derive(Debug, Clone, Default)]
pub struct BasicStatsTable {
    rows: HashMap<String, Vec<String>>,
}

impl BasicStatsTable {
    /// `null` cells become empty strings (and so count as zero).
    pub fn from_raw(rows: BasicStatsRaw) -> Self {
        let rows = rows
            .into_iter()
            .map(|(code, row)| (code, row.into_iter().map(Option::unwrap_or_default).collect()))
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl MetadataSource for BasicStatsTable {
    fn table_name(&self) -> &'static str {
        "basic-stats"
    }

    fn enrich(&self, feature: &mut MergedFeature) -> bool {
        let Some(row) = self.rows.get(&feature.code) else {
            return false;
        };
        // Short rows leave the missing positions unset.
        if let Some(seat) = row.get(column::SEAT) {
            feature.set_property(keys::SEAT, seat.as_str());
        }
        if let Some(pop) = row.get(column::POPULATION) {
            feature.set_property(keys::POPULATION, parse_count(pop));
        }
        if let Some(area) = row.get(column::AREA) {
            feature.set_property(keys::AREA, parse_count(area));
        }
        if let Some(area_code) = row.get(column::AREA_CODE) {
            feature.set_property(keys::AREA_CODE, area_code.as_str());
        }
        if let Some(unit_type) = row.get(column::UNIT_TYPE) {
            feature.set_property(keys::UNIT_TYPE, unit_type.as_str());
        }
        true
    }
}

/// Abbreviation, English names, level and bounding box.
#[derive(Debug, Clone, Default)]
pub struct CartographicTable {
    entries: CartoTableRaw,
}

impl CartographicTable {
    pub fn from_raw(entries: CartoTableRaw) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataSource for CartographicTable {
    fn table_name(&self) -> &'static str {
        "cartographic"
    }

    fn enrich(&self, feature: &mut MergedFeature) -> bool {
        let Some(entry) = self.entries.get(&feature.code) else {
            return false;
        };
        feature.set_property(keys::ABBREVIATION, entry.abbr.as_str());
        feature.set_property(keys::ENGLISH_NAME, entry.en_name.as_str());
        feature.set_property(keys::ENGLISH_ABBREVIATION, entry.en_abbr.as_str());
        feature.set_property(keys::LEVEL, entry.level);
        match BoundingBox::from_slice(&entry.bound) {
            Some(bbox) => feature.bbox = Some(bbox),
            None if entry.bound.is_empty() => {}
            None => warn!(
                code = %feature.code,
                len = entry.bound.len(),
                "bound does not have four numbers, keeping existing bbox"
            ),
        }
        true
    }
}

/// Label anchor, alignment and preferred position.
#[derive(Debug, Clone, Default)]
pub struct LabelPlacementTable {
    entries: LabelTableRaw,
}

impl LabelPlacementTable {
    pub fn from_raw(entries: LabelTableRaw) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataSource for LabelPlacementTable {
    fn table_name(&self) -> &'static str {
        "label-placement"
    }

    fn enrich(&self, feature: &mut MergedFeature) -> bool {
        let Some(entry) = self.entries.get(&feature.code) else {
            return false;
        };
        feature.set_property(keys::ANCHOR, entry.anchor.to_vec());
        feature.set_property(keys::ALIGNMENT, entry.alignment.code());
        feature.set_property(keys::LABEL_POSITION, entry.position.code());
        true
    }
}

/// Ordered list of metadata sources applied to every feature.
#[derive(Default)]
pub struct Enricher {
    sources: Vec<Box<dyn MetadataSource>>,
}

impl Enricher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl MetadataSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn push(&mut self, source: Box<dyn MetadataSource>) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Writes `name` and `code`, then lets every source add its fields.
    ///
    /// Returns how many sources had an entry for the code.
    pub fn enrich(&self, feature: &mut MergedFeature) -> usize {
        let name = feature.name.clone();
        let code = feature.code.clone();
        feature.set_property(keys::NAME, name);
        feature.set_property(keys::CODE, code);

        let mut hits = 0;
        for source in &self.sources {
            if source.enrich(feature) {
                hits += 1;
            } else {
                debug!(code = %feature.code, table = source.table_name(), "no reference entry");
            }
        }
        hits
    }
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.sources.iter().map(|s| s.table_name()).collect();
        f.debug_struct("Enricher").field("sources", &names).finish()
    }
}

/// The three reference tables of a run, already parsed.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub basic: BasicStatsTable,
    pub cartographic: CartographicTable,
    pub labels: Option<LabelPlacementTable>,
}

impl ReferenceTables {
    pub fn new(
        basic: BasicStatsRaw,
        cartographic: CartoTableRaw,
        labels: Option<LabelTableRaw>,
    ) -> Self {
        Self {
            basic: BasicStatsTable::from_raw(basic),
            cartographic: CartographicTable::from_raw(cartographic),
            labels: labels.map(LabelPlacementTable::from_raw),
        }
    }

    /// Enricher applying basic stats, then cartographic metadata, then labels.
    pub fn into_enricher(self) -> Enricher {
        let mut enricher = Enricher::new()
            .with_source(self.basic)
            .with_source(self.cartographic);
        if let Some(labels) = self.labels {
            enricher = enricher.with_source(labels);
        }
        enricher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{Alignment, CartoRaw, LabelPosition, LabelRaw};
    use geojson::Value;

    fn stats_row_map(code: &str, row: &[&str]) -> BasicStatsRaw {
        let mut rows = BasicStatsRaw::new();
        rows.insert(code.to_string(), row.iter().map(|s| Some(s.to_string())).collect());
        rows
    }

    fn feature(code: &str) -> MergedFeature {
        MergedFeature::new(code, "东宝区", Value::Polygon(vec![]))
    }

    fn tables() -> ReferenceTables {
        let basic = stats_row_map(
            "420802",
            &["东宝区", "龙泉街道", "37", "1203", "0724", "", "市辖区"],
        );
        let mut carto = CartoTableRaw::new();
        carto.insert(
            "420802".into(),
            CartoRaw {
                level: 3,
                abbr: "东宝".into(),
                en_name: "Dongbao District".into(),
                en_abbr: "Dongbao".into(),
                bound: vec![111.8, 30.9, 112.4, 31.4],
                ..Default::default()
            },
        );
        let mut labels = LabelTableRaw::new();
        labels.insert(
            "420802".into(),
            LabelRaw {
                anchor: [112.2, 31.1],
                alignment: Alignment::Left,
                position: LabelPosition::Top,
            },
        );
        ReferenceTables::new(basic, carto, Some(labels))
    }

    #[test]
    fn all_tables_contribute() {
        let enricher = tables().into_enricher();
        let mut f = feature("420802");
        assert_eq!(enricher.enrich(&mut f), 3);

        assert_eq!(f.property(keys::NAME).unwrap(), "东宝区");
        assert_eq!(f.property(keys::CODE).unwrap(), "420802");
        assert_eq!(f.property(keys::SEAT).unwrap(), "龙泉街道");
        assert_eq!(f.property(keys::POPULATION).unwrap(), 37);
        assert_eq!(f.property(keys::AREA).unwrap(), 1203);
        assert_eq!(f.property(keys::AREA_CODE).unwrap(), "0724");
        assert_eq!(f.property(keys::UNIT_TYPE).unwrap(), "市辖区");
        assert_eq!(f.property(keys::ABBREVIATION).unwrap(), "东宝");
        assert_eq!(f.property(keys::ENGLISH_NAME).unwrap(), "Dongbao District");
        assert_eq!(f.property(keys::LEVEL).unwrap(), 3);
        assert_eq!(f.property(keys::ALIGNMENT).unwrap(), "left");
        assert_eq!(f.property(keys::LABEL_POSITION).unwrap(), "top");
        assert_eq!(f.bbox, Some(BoundingBox::new(111.8, 30.9, 112.4, 31.4)));
    }

    #[test]
    fn missing_entries_only_set_name_and_code() {
        let enricher = tables().into_enricher();
        let mut f = feature("420881");
        f.set_property(keys::FILL_COLOR, "#abc");
        assert_eq!(enricher.enrich(&mut f), 0);
        assert_eq!(f.properties.len(), 3);
        assert_eq!(f.property(keys::FILL_COLOR).unwrap(), "#abc");
        assert!(f.bbox.is_none());
    }

    #[test]
    fn malformed_numbers_degrade_to_zero() {
        let basic = stats_row_map("420802", &["x", "seat", "n/a", "12.5", "0724", "", "区"]);
        let enricher = Enricher::new().with_source(BasicStatsTable::from_raw(basic));
        let mut f = feature("420802");
        enricher.enrich(&mut f);
        assert_eq!(f.property(keys::POPULATION).unwrap(), 0);
        assert_eq!(f.property(keys::AREA).unwrap(), 0);
        assert_eq!(f.property(keys::UNIT_TYPE).unwrap(), "区");
    }

    #[test]
    fn null_cells_degrade_to_defaults() {
        let mut basic = stats_row_map("420802", &["x", "seat", "12", "7"]);
        basic.get_mut("420802").unwrap()[2] = None;
        let enricher = Enricher::new().with_source(BasicStatsTable::from_raw(basic));
        let mut f = feature("420802");
        enricher.enrich(&mut f);
        assert_eq!(f.property(keys::POPULATION).unwrap(), 0);
        assert_eq!(f.property(keys::AREA).unwrap(), 7);
    }

    #[test]
    fn short_rows_leave_positions_unset() {
        let basic = stats_row_map("420802", &["x", "seat", "12"]);
        let enricher = Enricher::new().with_source(BasicStatsTable::from_raw(basic));
        let mut f = feature("420802");
        enricher.enrich(&mut f);
        assert_eq!(f.property(keys::POPULATION).unwrap(), 12);
        assert!(f.property(keys::AREA).is_none());
        assert!(f.property(keys::UNIT_TYPE).is_none());
    }

    #[test]
    fn bad_bound_keeps_existing_bbox() {
        let mut carto = CartoTableRaw::new();
        carto.insert(
            "420802".into(),
            CartoRaw {
                bound: vec![1.0, 2.0],
                ..Default::default()
            },
        );
        let enricher = Enricher::new().with_source(CartographicTable::from_raw(carto));
        let mut f = feature("420802");
        let before = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        f.bbox = Some(before);
        enricher.enrich(&mut f);
        assert_eq!(f.bbox, Some(before));
    }

    #[test]
    fn enrichment_never_removes_keys() {
        let enricher = tables().into_enricher();
        let mut f = feature("420802");
        f.set_property("custom", 1);
        let before: Vec<String> = f.properties.keys().cloned().collect();
        enricher.enrich(&mut f);
        assert!(before.iter().all(|k| f.properties.contains_key(k)));
    }
}
