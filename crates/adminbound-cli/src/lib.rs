//! adminbound-cli
//! ==============
//!
//! Command-line interface for the `adminbound-core` boundary aggregation
//! engine.
//!
//! This crate primarily provides a binary (`adminbound`). We include a small
//! library target so that the docs render a page with this overview.
//!
//! Basic usage
//! -----------
//!
//! ```text
//! adminbound --help
//! adminbound aggregate --units units.json --fragments geojson/ \
//!     --stats stats.json --meta meta.json --out-dir out/ --jobs 4
//! adminbound flatten --input hubei.json hunan.json --output tree.geojsonl
//! ```
//!
//! For programmatic access, use `adminbound_core::pipeline` directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
