// crates/adminbound-core/src/flatten.rs
//! Flattens the mapping service's nested province → city → county payload.
//!
//! Every node becomes one feature, emitted before its children. The hierarchy
//! survives only in the slash-separated name (`湖北省/荆门市/东宝区`) and in the
//! code, which is the node's `cityCode` without the country prefix.

use crate::code::{strip_country_prefix, AdminLevel};
use crate::error::{BoundaryError, Result};
use crate::model::{keys, BoundingBox, MergedFeature};
use crate::raw::{TreeNodeRaw, TreeResponseRaw};
use geojson::{LineStringType, PolygonType, Value};
use tracing::warn;

/// Output of a flattening pass: converted nodes plus the ones that failed.
#[derive(Debug, Default)]
pub struct Flattened {
    pub features: Vec<MergedFeature>,
    pub failures: Vec<BoundaryError>,
}

impl Flattened {
    /// Appends another pass, keeping order.
    pub fn extend(&mut self, other: Flattened) {
        self.features.extend(other.features);
        self.failures.extend(other.failures);
    }
}

/// Flattens `node` and all its descendants in pre-order.
///
/// A node whose geometry cannot be parsed is reported in
/// [`Flattened::failures`]; its children are still visited.
pub fn flatten(node: &TreeNodeRaw, name_prefix: &str) -> Flattened {
    let mut out = Flattened::default();
    flatten_into(node, name_prefix, &mut out);
    out
}

/// Flattens every top-level node of a service response.
pub fn flatten_response(response: &TreeResponseRaw) -> Flattened {
    if !response.is_ok() {
        warn!(
            returncode = %response.returncode,
            msg = %response.msg,
            "mapping service reported a non-success code"
        );
    }
    let mut out = Flattened::default();
    for node in &response.data {
        flatten_into(node, "", &mut out);
    }
    out
}

fn flatten_into(node: &TreeNodeRaw, name_prefix: &str, out: &mut Flattened) {
    let full_name = format!("{name_prefix}{}", node.name);
    match convert_node(node, &full_name) {
        Ok(feature) => out.features.push(feature),
        Err(e) => {
            warn!(code = %node.city_code, name = %full_name, error = %e, "skipping node");
            out.failures.push(e);
        }
    }

    let child_prefix = format!("{full_name}/");
    for child in &node.child {
        flatten_into(child, &child_prefix, out);
    }
}

/// Converts a single node (children are ignored).
pub fn convert_node(node: &TreeNodeRaw, full_name: &str) -> Result<MergedFeature> {
    let code = strip_country_prefix(&node.city_code);

    let rings = node
        .points
        .iter()
        .map(|p| parse_ring(code, &p.region))
        .collect::<Result<PolygonType>>()?;
    let bbox = parse_bound(code, &node.bound)?;

    let mut feature = MergedFeature::new(code, full_name, Value::Polygon(rings));
    feature.id = Some(code.to_string());
    feature.bbox = bbox;

    let category = AdminLevel::from_admin_type(&node.admin_type)
        .map(|l| l.label())
        .unwrap_or("");
    feature.set_property(keys::NAME, full_name);
    feature.set_property(keys::CODE, code);
    feature.set_property(keys::LEVEL, node.level);
    feature.set_property(keys::ABBREVIATION, node.name_abbreviation.as_str());
    feature.set_property(keys::CATEGORY, category);
    feature.set_property(keys::POSITION, vec![node.lnt, node.lat]);
    feature.set_property(keys::ENGLISH_NAME, node.english.as_str());
    feature.set_property(keys::ENGLISH_ABBREVIATION, node.english_abbreviation.as_str());
    Ok(feature)
}

/// Parses `"west,north,east,south"` into `(west, south, east, north)`.
///
/// The service lists the vertical bounds the other way round; the swap here
/// restores natural order. An empty string means no bound.
///
/// ```
/// use adminbound_core::flatten::parse_bound;
/// use adminbound_core::model::BoundingBox;
///
/// let b = parse_bound("420800", "115.0,20.0,117.0,18.0").unwrap();
/// assert_eq!(b, Some(BoundingBox::new(115.0, 18.0, 117.0, 20.0)));
/// ```
pub fn parse_bound(code: &str, s: &str) -> Result<Option<BoundingBox>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let nums = s
        .split(',')
        .map(parse_coord)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| BoundaryError::malformed(code, format!("bound {s:?} is not numeric")))?;
    match nums.as_slice() {
        [x0, y1, x1, y0] => Ok(Some(BoundingBox::new(*x0, *y0, *x1, *y1))),
        _ => Err(BoundaryError::malformed(
            code,
            format!("bound {s:?} has {} numbers, expected 4", nums.len()),
        )),
    }
}

/// Parses one ring given as `"x y,x y,..."`.
///
/// Every pair must hold exactly two numbers; a ring is never truncated.
pub fn parse_ring(code: &str, region: &str) -> Result<LineStringType> {
    region
        .split(',')
        .enumerate()
        .map(|(i, pair)| {
            parse_pair(pair).ok_or_else(|| {
                BoundaryError::malformed(code, format!("coordinate pair {i} {pair:?}"))
            })
        })
        .collect()
}

/// A finite number; `NaN` and infinities cannot be written as JSON.
fn parse_coord(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_pair(pair: &str) -> Option<Vec<f64>> {
    let mut it = pair.split_whitespace();
    let x = parse_coord(it.next()?)?;
    let y = parse_coord(it.next()?)?;
    if it.next().is_some() {
        return None;
    }
    Some(vec![x, y])
}
