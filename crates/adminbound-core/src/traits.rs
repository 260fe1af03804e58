// crates/adminbound-core/src/traits.rs
use crate::error::Result;
use crate::model::{GeometryFragment, MergedFeature};
use crate::raw::UnitRaw;

/// A code-keyed lookup table that contributes properties to merged features.
///
/// The enricher walks its sources in order and hands each the feature; a
/// source writes only the fields it owns and leaves everything else alone.
/// Implementors must be `Send + Sync` so one enricher can be shared by the
/// worker pool.
///
/// # Examples
/// ```rust
/// use adminbound_core::model::MergedFeature;
/// use adminbound_core::traits::MetadataSource;
///
/// struct Region(&'static str);
/// impl MetadataSource for Region {
///     fn table_name(&self) -> &'static str { "region" }
///     fn enrich(&self, feature: &mut MergedFeature) -> bool {
///         feature.set_property("region", self.0);
///         true
///     }
/// }
///
/// let mut f = MergedFeature::new("420802", "东宝区", geojson::Value::Polygon(vec![]));
/// assert!(Region("central").enrich(&mut f));
/// assert_eq!(f.property("region").unwrap(), "central");
/// ```
pub trait MetadataSource: Send + Sync {
    /// Short name used in log lines.
    fn table_name(&self) -> &'static str;

    /// Writes this table's fields for `feature.code`.
    ///
    /// Returns `false` when the table has no entry for the code; that is not
    /// an error.
    fn enrich(&self, feature: &mut MergedFeature) -> bool;
}

/// Supplies the converted boundary records for one prefecture-level unit.
///
/// This is the seam to the fetch/convert collaborators: implementations may
/// read cached files, call a service, or hand back fixtures in tests.
pub trait FragmentSource: Sync {
    fn fragments(&self, unit: &UnitRaw) -> Result<Vec<GeometryFragment>>;
}

impl<F> FragmentSource for F
where
    F: Fn(&UnitRaw) -> Result<Vec<GeometryFragment>> + Sync,
{
    fn fragments(&self, unit: &UnitRaw) -> Result<Vec<GeometryFragment>> {
        self(unit)
    }
}
