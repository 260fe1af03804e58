use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for adminbound
#[derive(Debug, Parser)]
#[command(
    name = "adminbound",
    version,
    about = "Aggregate, enrich and flatten administrative-boundary geometry"
)]
pub struct CliArgs {
    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge converted boundary files into county- and city-level collections
    Aggregate(AggregateArgs),

    /// Flatten mapping-service tree responses into one feature per node
    Flatten(FlattenArgs),
}

#[derive(Debug, Args)]
pub struct AggregateArgs {
    /// Prefecture-level unit list (JSON array)
    #[arg(short = 'u', long = "units")]
    pub units: PathBuf,

    /// Directory with one converted `<code>.geojson` file per unit
    #[arg(short = 'f', long = "fragments")]
    pub fragments: PathBuf,

    /// Extension of the converted files (e.g. geojson.gz)
    #[arg(long = "fragment-ext", default_value = "geojson")]
    pub fragment_ext: String,

    /// Basic statistics table
    #[arg(long = "stats")]
    pub stats: PathBuf,

    /// Cartographic metadata table
    #[arg(long = "meta")]
    pub meta: PathBuf,

    /// Label-placement table
    #[arg(long = "labels")]
    pub labels: Option<PathBuf>,

    /// Output directory for county.geojsonl and city.geojsonl
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    pub out_dir: PathBuf,

    /// Gzip the output files
    #[arg(long = "gzip")]
    pub gzip: bool,

    /// Worker count (1 = sequential)
    #[arg(short = 'j', long = "jobs", default_value_t = 1)]
    pub jobs: usize,
}

#[derive(Debug, Args)]
pub struct FlattenArgs {
    /// Mapping-service response file(s), processed in order
    #[arg(short = 'i', long = "input", required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Basic statistics table
    #[arg(long = "stats")]
    pub stats: Option<PathBuf>,

    /// Cartographic metadata table
    #[arg(long = "meta")]
    pub meta: Option<PathBuf>,

    /// Label-placement table
    #[arg(long = "labels")]
    pub labels: Option<PathBuf>,

    /// Output file (newline-delimited GeoJSON)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Gzip the output file
    #[arg(long = "gzip")]
    pub gzip: bool,
}
