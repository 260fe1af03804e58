// crates/adminbound-core/src/merge.rs
use crate::error::{BoundaryError, Result};
use crate::model::{keys, GeometryFragment, MergedFeature};
use geojson::Value;
use tracing::warn;

/// Collapses all fragments of one code into a single feature.
///
/// - one fragment: its polygon is passed through untouched
/// - several: a `MultiPolygon` of every fragment that has rings, in the order
///   the fragments were discovered
///
/// The fill color of the first fragment, when present, is carried over. The
/// display name is the first non-empty `NAME` among the fragments.
///
/// Fails with [`BoundaryError::EmptyFragmentSet`] when no fragment has rings.
pub fn merge(code: &str, fragments: Vec<GeometryFragment>) -> Result<MergedFeature> {
    let name = fragments
        .iter()
        .find_map(GeometryFragment::name)
        .map(str::to_owned)
        .unwrap_or_else(|| {
            warn!(code, "no fragment carries a name");
            String::new()
        });
    let fill_color = fragments.first().and_then(|f| f.fill_color().cloned());

    let geometry = match fragments.len() {
        0 => return Err(BoundaryError::EmptyFragmentSet(code.to_string())),
        1 => {
            let only = fragments.into_iter().next().and_then(|f| f.polygon);
            match only {
                Some(polygon) if !polygon.is_empty() => Value::Polygon(polygon),
                _ => return Err(BoundaryError::EmptyFragmentSet(code.to_string())),
            }
        }
        _ => {
            let polygons: Vec<_> = fragments
                .into_iter()
                .filter_map(|f| f.polygon)
                .filter(|p| !p.is_empty())
                .collect();
            if polygons.is_empty() {
                return Err(BoundaryError::EmptyFragmentSet(code.to_string()));
            }
            Value::MultiPolygon(polygons)
        }
    };

    let mut feature = MergedFeature::new(code, name, geometry);
    if let Some(color) = fill_color {
        feature.set_property(keys::FILL_COLOR, color);
    }
    Ok(feature)
}
