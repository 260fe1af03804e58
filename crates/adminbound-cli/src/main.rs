//! adminbound: command-line driver for adminbound-core
//!
//! Usage examples
//! --------------
//!
//! - Aggregate every unit's converted boundaries, four workers, gzip output
//!   $ adminbound aggregate --units units.json --fragments geojson/ \
//!       --stats stats.json --meta meta.json --labels labels.json \
//!       --out-dir out/ --gzip --jobs 4
//!
//! - Flatten one mapping-service response per province
//!   $ adminbound flatten --input hubei.json hunan.json --output tree.geojsonl
//!
//! Inputs ending in `.gz` are decompressed transparently. Logging goes to
//! stderr (`RUST_LOG` or `--verbose`); the run summary is printed to stdout
//! as JSON.
mod args;

use crate::args::{AggregateArgs, CliArgs, Commands, FlattenArgs};
use adminbound_core::pipeline::{run_aggregate, run_flatten, AggregateConfig, FlattenConfig};
use adminbound_core::serialize::CompressionMode;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Aggregate(a) => {
            let config = aggregate_config(a);
            let stats = run_aggregate(&config).with_context(|| {
                format!(
                    "aggregation of {} into {} failed",
                    config.units.display(),
                    config.out_dir.display()
                )
            })?;
            info!(
                city = %config.city_output().display(),
                county = %config.county_output().display(),
                "done"
            );
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }

        Commands::Flatten(f) => {
            let config = flatten_config(f);
            let summary = run_flatten(&config).with_context(|| {
                format!("flattening into {} failed", config.output.display())
            })?;
            println!(
                "{}",
                serde_json::json!({
                    "features": summary.features,
                    "failures": summary.failures,
                })
            );
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn compression(gzip: bool) -> CompressionMode {
    if gzip {
        CompressionMode::Gzip
    } else {
        CompressionMode::None
    }
}

fn aggregate_config(a: AggregateArgs) -> AggregateConfig {
    AggregateConfig {
        units: a.units,
        fragments_dir: a.fragments,
        fragment_extension: a.fragment_ext,
        stats: a.stats,
        meta: a.meta,
        labels: a.labels,
        out_dir: a.out_dir,
        compression: compression(a.gzip),
        jobs: a.jobs,
    }
}

fn flatten_config(f: FlattenArgs) -> FlattenConfig {
    FlattenConfig {
        inputs: f.input,
        stats: f.stats,
        meta: f.meta,
        labels: f.labels,
        output: f.output,
        compression: compression(f.gzip),
    }
}
