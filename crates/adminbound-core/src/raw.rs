// crates/adminbound-core/src/raw.rs
//! Raw input structures as they come from JSON.
//!
//! NOTE: These types mirror the upstream datasets field for field (including
//! their pinyin key names). Everything downstream works on the normalized
//! types in [`crate::model`].
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// One entry of the prefecture-level unit list:
/// {
///   "diji": "襄阳市",
///   "quHuaDaiMa": "420600",
///   "quhao": "0710",
///   "shengji": "湖北省",
///   "xianji": ""
/// }
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UnitRaw {
    #[serde(default)]
    pub diji: String,
    #[serde(rename = "quHuaDaiMa")]
    pub code: String,
    #[serde(default)]
    pub quhao: String,
    #[serde(default)]
    pub shengji: String,
    #[serde(default)]
    pub xianji: String,
}

impl UnitRaw {
    /// Most specific non-empty name of the unit.
    pub fn display_name(&self) -> &str {
        [&self.xianji, &self.diji, &self.shengji]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }
}

pub type UnitsRaw = Vec<UnitRaw>;

/// Reads `null` as the type's default, the way the upstream tables mean it.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Basic statistics rows, keyed by code. Positions are fixed:
/// `[name, seat, population, area, area_code, reserved, unit_type, ...]`.
/// Cells may be `null`.
pub type BasicStatsRaw = HashMap<String, Vec<Option<String>>>;

/// Cartographic metadata entry, keyed by code. Other upstream keys
/// (`Type`, `Position`) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CartoRaw {
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: i64,
    #[serde(rename = "Abbr", default, deserialize_with = "null_as_default")]
    pub abbr: String,
    #[serde(rename = "EnName", default, deserialize_with = "null_as_default")]
    pub en_name: String,
    #[serde(rename = "EnAbbr", default, deserialize_with = "null_as_default")]
    pub en_abbr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bound: Vec<f64>,
}

pub type CartoTableRaw = HashMap<String, CartoRaw>;

/// Horizontal alignment of a label relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn code(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Preferred side of the anchor for placing a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

impl LabelPosition {
    pub fn code(&self) -> &'static str {
        match self {
            LabelPosition::Center => "center",
            LabelPosition::Top => "top",
            LabelPosition::Bottom => "bottom",
            LabelPosition::Left => "left",
            LabelPosition::Right => "right",
        }
    }
}

/// Label-placement entry, keyed by code:
/// { "anchor": [112.14, 32.04], "alignment": "center", "position": "right" }
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LabelRaw {
    pub anchor: [f64; 2],
    #[serde(default = "default_alignment")]
    pub alignment: Alignment,
    #[serde(default = "default_position")]
    pub position: LabelPosition,
}

fn default_alignment() -> Alignment {
    Alignment::Center
}

fn default_position() -> LabelPosition {
    LabelPosition::Center
}

pub type LabelTableRaw = HashMap<String, LabelRaw>;

/// Response envelope of the mapping service's administrative endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TreeResponseRaw {
    #[serde(default)]
    pub returncode: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Vec<TreeNodeRaw>,
}

impl TreeResponseRaw {
    /// The service reports success as return code `"100"`.
    pub fn is_ok(&self) -> bool {
        self.returncode == "100"
    }
}

/// One province, city or county in the mapping service's nested payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TreeNodeRaw {
    #[serde(default)]
    pub level: i64,
    #[serde(rename = "nameabbrevation", default)]
    pub name_abbreviation: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "adminType", default)]
    pub admin_type: String,
    #[serde(rename = "cityCode", default)]
    pub city_code: String,
    #[serde(default)]
    pub lnt: f64,
    #[serde(default)]
    pub lat: f64,
    #[serde(rename = "englishabbrevation", default)]
    pub english_abbreviation: String,
    #[serde(default)]
    pub english: String,
    /// `"west,north,east,south"`
    #[serde(default)]
    pub bound: String,
    #[serde(default)]
    pub points: Vec<RingRaw>,
    #[serde(default)]
    pub child: Vec<TreeNodeRaw>,
}

/// One ring as `"x y,x y,..."`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RingRaw {
    #[serde(default)]
    pub region: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_cells_read_as_defaults() {
        let carto: CartoTableRaw = serde_json::from_str(
            r#"{"420802":{"level":3,"Abbr":"东宝","EnName":null,"bound":null,"Type":"区"}}"#,
        )
        .unwrap();
        let entry = &carto["420802"];
        assert_eq!(entry.level, 3);
        assert_eq!(entry.abbr, "东宝");
        assert!(entry.en_name.is_empty());
        assert!(entry.bound.is_empty());

        let stats: BasicStatsRaw =
            serde_json::from_str(r#"{"420802":["东宝区","龙泉街道",null,"1651"]}"#).unwrap();
        assert_eq!(stats["420802"][2], None);
        assert_eq!(stats["420802"][3].as_deref(), Some("1651"));
    }

    #[test]
    fn unit_list_entry_deserializes() {
        let json = r#"{"diji":"襄阳市","quHuaDaiMa":"420600","quhao":"0710","shengji":"湖北省"}"#;
        let unit: UnitRaw = serde_json::from_str(json).unwrap();
        assert_eq!(unit.code, "420600");
        assert_eq!(unit.display_name(), "襄阳市");
        assert!(unit.xianji.is_empty());
    }

    #[test]
    fn label_entry_defaults_to_center() {
        let label: LabelRaw = serde_json::from_str(r#"{"anchor":[112.1,32.0]}"#).unwrap();
        assert_eq!(label.alignment, Alignment::Center);
        assert_eq!(label.position.code(), "center");
    }

    #[test]
    fn tree_node_keeps_children() {
        let json = r#"{
            "name": "湖北省", "adminType": "province", "cityCode": "156420000",
            "bound": "108.3,33.2,116.1,29.0",
            "points": [{"region": "110.0 30.0,111.0 30.0,111.0 31.0,110.0 30.0"}],
            "child": [{"name": "黄石市", "adminType": "city", "cityCode": "156420200"}]
        }"#;
        let node: TreeNodeRaw = serde_json::from_str(json).unwrap();
        assert_eq!(node.child.len(), 1);
        assert_eq!(node.points.len(), 1);
        assert_eq!(node.child[0].admin_type, "city");
    }
}
