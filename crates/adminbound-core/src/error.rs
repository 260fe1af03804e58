// crates/adminbound-core/src/error.rs
use thiserror::Error;

/// Errors produced while loading, aggregating or writing boundary data.
///
/// Only [`BoundaryError::NotFound`], [`BoundaryError::Io`] and
/// [`BoundaryError::Json`] coming from the reference-table loader abort a run.
/// The geometry variants are scoped to a single administrative unit: the
/// pipeline logs them and moves on to the next unit.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// A coordinate pair or bound string could not be parsed.
    #[error("malformed geometry for {code}: {reason}")]
    MalformedGeometry { code: String, reason: String },

    /// The merger was handed no fragment carrying ring data.
    #[error("no polygon fragments for {0}")]
    EmptyFragmentSet(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

impl BoundaryError {
    pub(crate) fn malformed(code: &str, reason: impl Into<String>) -> Self {
        BoundaryError::MalformedGeometry {
            code: code.to_string(),
            reason: reason.into(),
        }
    }

    /// `true` for failures contained at unit granularity.
    pub fn is_unit_scoped(&self) -> bool {
        matches!(
            self,
            BoundaryError::MalformedGeometry { .. } | BoundaryError::EmptyFragmentSet(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BoundaryError>;
