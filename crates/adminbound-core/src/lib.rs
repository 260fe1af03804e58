// crates/adminbound-core/src/lib.rs

//! Aggregation and enrichment of administrative-boundary geometry.
//!
//! Converted boundary records are classified per prefecture-level unit,
//! merged into one (multi-)polygon per administrative code, enriched from
//! code-keyed reference tables, and written as newline-delimited GeoJSON.
//! A second path flattens the mapping service's nested tree payload into the
//! same feature shape.

pub mod aggregate;
pub mod classify;
pub mod code;
pub mod common;
pub mod enrich;
pub mod error;
pub mod flatten;
pub mod loader;
pub mod merge;
pub mod model;
pub mod pipeline;
// Wire shapes of the input files
#[doc(hidden)]
pub mod raw;
pub mod serialize;
pub mod store;
pub mod traits;

// Re-exports
pub use crate::error::{BoundaryError, Result};

pub use crate::aggregate::{aggregate, Aggregated, Aggregator};
pub use crate::classify::{classify, Classification};
pub use crate::common::RunStats;
pub use crate::enrich::{Enricher, ReferenceTables};
pub use crate::flatten::{flatten, flatten_response, Flattened};
pub use crate::merge::merge;
pub use crate::model::{BoundingBox, GeometryFragment, MergedFeature};
pub use crate::pipeline::{run_aggregate, run_flatten, AggregateConfig, FlattenConfig};
pub use crate::serialize::{write_collection, write_features, CompressionMode, FeatureMap};
pub use crate::store::FragmentStore;
pub use crate::traits::{FragmentSource, MetadataSource};
