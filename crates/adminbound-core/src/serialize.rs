// crates/adminbound-core/src/serialize.rs
//! Newline-delimited GeoJSON output: one `Feature` object per line.

use crate::error::{BoundaryError, Result};
use crate::model::MergedFeature;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};

/// Finished features keyed by code; iteration order is the output order.
pub type FeatureMap = BTreeMap<String, MergedFeature>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMode {
    Gzip,
    #[default]
    None,
}

/// Writes features one per line, in iteration order. Returns the count.
pub fn write_features<'a, W, I>(features: I, writer: &mut W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a MergedFeature>,
{
    let mut count = 0;
    for feature in features {
        serde_json::to_writer(&mut *writer, &feature.to_feature())?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    Ok(count)
}

/// Writes a keyed collection in code order.
pub fn write_collection<W: Write>(collection: &FeatureMap, writer: &mut W) -> Result<usize> {
    write_features(collection.values(), writer)
}

/// Creates `path` and streams the features into it.
pub fn write_to_path<'a, I>(path: &Path, features: I, compression: CompressionMode) -> Result<usize>
where
    I: IntoIterator<Item = &'a MergedFeature>,
{
    let file = File::create(path).map_err(|e| {
        BoundaryError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot create {}: {e}", path.display()),
        ))
    })?;
    let mut writer = BufWriter::new(file);

    let count = match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                let mut encoder = GzEncoder::new(writer, Compression::default());
                let count = write_features(features, &mut encoder)?;
                // Writes the gzip trailer.
                close(encoder.finish()?)?;
                count
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(BoundaryError::InvalidData(
                    "Gzip requested but 'compact' disabled".into(),
                ));
            }
        }
        CompressionMode::None => {
            let count = write_features(features, &mut writer)?;
            close(writer)?;
            count
        }
    };
    Ok(count)
}

/// Flushes the buffer, returning any pending write error.
fn close(writer: BufWriter<File>) -> Result<()> {
    writer.into_inner().map_err(|e| e.into_error())?;
    Ok(())
}
