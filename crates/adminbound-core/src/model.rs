// crates/adminbound-core/src/model.rs
//! Normalized domain types: fragments in, merged features out.

use geojson::{feature::Id, Feature, Geometry, JsonObject, JsonValue, PolygonType, Value};
use serde::{Deserialize, Serialize};

/// Property keys written on output features.
pub mod keys {
    pub const NAME: &str = "name";
    pub const CODE: &str = "code";
    pub const SEAT: &str = "seat";
    pub const POPULATION: &str = "population";
    pub const AREA: &str = "area";
    pub const AREA_CODE: &str = "area_code";
    pub const UNIT_TYPE: &str = "unit_type";
    pub const ABBREVIATION: &str = "abbreviation";
    pub const ENGLISH_NAME: &str = "english_name";
    pub const ENGLISH_ABBREVIATION: &str = "english_abbreviation";
    pub const LEVEL: &str = "level";
    pub const ANCHOR: &str = "anchor";
    pub const ALIGNMENT: &str = "alignment";
    pub const LABEL_POSITION: &str = "label_position";
    pub const CATEGORY: &str = "category";
    pub const POSITION: &str = "position";
    pub const FILL_COLOR: &str = "FillColor";

    /// Keys of the converted boundary-service records.
    pub const SOURCE_CODE: &str = "QUHUADAIMA";
    pub const SOURCE_NAME: &str = "NAME";
}

/// Axis-aligned bounds in `(west, south, east, north)` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Builds a box from exactly four numbers; any other length is rejected.
    pub fn from_slice(v: &[f64]) -> Option<Self> {
        match v {
            [w, s, e, n] => Some(Self::new(*w, *s, *e, *n)),
            _ => None,
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.west, self.south, self.east, self.north]
    }
}

/// One raw polygon claimed by an administrative code.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryFragment {
    pub code: String,
    /// `None` when the source record carried no polygon geometry.
    pub polygon: Option<PolygonType>,
    /// Flat property bag of the source record.
    pub properties: JsonObject,
}

impl GeometryFragment {
    pub fn new(code: impl Into<String>, polygon: Option<PolygonType>) -> Self {
        Self {
            code: code.into(),
            polygon,
            properties: JsonObject::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Splits one converted GeoJSON record into fragments.
    ///
    /// A `MultiPolygon` yields one fragment per member polygon, a `Polygon`
    /// exactly one. Any other (or missing) geometry yields a single ring-less
    /// fragment so the code is still accounted for.
    pub fn from_feature(feature: Feature) -> Vec<GeometryFragment> {
        let properties = feature.properties.unwrap_or_default();
        let code = properties
            .get(keys::SOURCE_CODE)
            .map(json_to_code)
            .unwrap_or_default();

        let polygons: Vec<Option<PolygonType>> = match feature.geometry.map(|g| g.value) {
            Some(Value::Polygon(p)) => vec![Some(p)],
            Some(Value::MultiPolygon(mp)) if !mp.is_empty() => mp.into_iter().map(Some).collect(),
            _ => vec![None],
        };

        polygons
            .into_iter()
            .map(|polygon| GeometryFragment {
                code: code.clone(),
                polygon,
                properties: properties.clone(),
            })
            .collect()
    }

    /// `true` if the fragment has at least one ring.
    pub fn has_rings(&self) -> bool {
        self.polygon.as_ref().is_some_and(|p| !p.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.properties
            .get(keys::SOURCE_NAME)
            .and_then(JsonValue::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn fill_color(&self) -> Option<&JsonValue> {
        self.properties.get(keys::FILL_COLOR)
    }
}

/// Codes sometimes arrive as numbers after format conversion.
fn json_to_code(v: &JsonValue) -> String {
    match v {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// One administrative unit with its final geometry and properties.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedFeature {
    pub code: String,
    pub name: String,
    /// `Value::Polygon` or `Value::MultiPolygon`.
    pub geometry: Value,
    pub properties: JsonObject,
    pub bbox: Option<BoundingBox>,
    /// Feature-level id; only the flattener sets one.
    pub id: Option<String>,
}

impl MergedFeature {
    pub fn new(code: impl Into<String>, name: impl Into<String>, geometry: Value) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            geometry,
            properties: JsonObject::new(),
            bbox: None,
            id: None,
        }
    }

    pub fn set_property(&mut self, key: &str, value: impl Into<JsonValue>) {
        self.properties.insert(key.to_string(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&JsonValue> {
        self.properties.get(key)
    }

    /// Number of polygons in the geometry.
    pub fn polygon_count(&self) -> usize {
        match &self.geometry {
            Value::Polygon(_) => 1,
            Value::MultiPolygon(mp) => mp.len(),
            _ => 0,
        }
    }

    pub fn to_feature(&self) -> Feature {
        Feature {
            bbox: self.bbox.map(|b| b.to_vec()),
            geometry: Some(Geometry::new(self.geometry.clone())),
            id: self.id.clone().map(Id::String),
            properties: Some(self.properties.clone()),
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square(x: f64) -> PolygonType {
        vec![vec![
            vec![x, 0.0],
            vec![x + 1.0, 0.0],
            vec![x + 1.0, 1.0],
            vec![x, 0.0],
        ]]
    }

    fn feature(props: serde_json::Value, geometry: Option<Value>) -> Feature {
        Feature {
            bbox: None,
            geometry: geometry.map(Geometry::new),
            id: None,
            properties: props.as_object().cloned(),
            foreign_members: None,
        }
    }

    #[test]
    fn multipolygon_records_split_into_fragments() {
        let f = feature(
            json!({"QUHUADAIMA": "420802", "NAME": "东宝区"}),
            Some(Value::MultiPolygon(vec![square(0.0), square(2.0)])),
        );
        let frags = GeometryFragment::from_feature(f);
        assert_eq!(frags.len(), 2);
        assert!(frags.iter().all(|f| f.code == "420802" && f.has_rings()));
        assert_eq!(frags[0].name(), Some("东宝区"));
    }

    #[test]
    fn non_polygon_geometry_is_ringless() {
        let f = feature(
            json!({"QUHUADAIMA": 420802}),
            Some(Value::Point(vec![1.0, 2.0])),
        );
        let frags = GeometryFragment::from_feature(f);
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].code, "420802");
        assert!(!frags[0].has_rings());
    }

    #[test]
    fn missing_code_becomes_empty() {
        let frags = GeometryFragment::from_feature(feature(json!({}), None));
        assert_eq!(frags[0].code, "");
    }

    #[test]
    fn bounding_box_requires_four_numbers() {
        assert!(BoundingBox::from_slice(&[1.0, 2.0, 3.0]).is_none());
        let b = BoundingBox::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(b.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn feature_conversion_carries_bbox_and_id() {
        let mut m = MergedFeature::new("420802", "东宝区", Value::Polygon(square(0.0)));
        m.bbox = Some(BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        m.id = Some("420802".into());
        let f = m.to_feature();
        assert_eq!(f.bbox, Some(vec![0.0, 0.0, 1.0, 1.0]));
        assert_eq!(f.id, Some(Id::String("420802".into())));
        assert_eq!(m.polygon_count(), 1);
    }
}
