use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};
use zmeans::{io, Dataset, KMeans, KMeansConfig, TieBreak};

#[derive(Parser, Debug)]
#[command(name = "zmeans")]
#[command(about = "Partition the points of a whitespace/comma separated file into K clusters (z-score normalized k-means)")]
#[command(version)]
struct Args {
    /// Number of clusters
    k: usize,

    /// Input file, one point per line
    file: PathBuf,

    /// CSV file the partition is written to
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,

    /// Seed of the random number generator (seeded from system entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Hard limit on the number of assignment steps
    #[arg(long)]
    max_iter: Option<usize>,

    /// Tie-break policy for equidistant centroids (running-minimum, uniform)
    #[arg(long, default_value = "running-minimum")]
    tie_break: TieBreak,

    /// Plotting script, invoked with the output CSV as its only argument
    #[arg(long, default_value = "plot_clusters.py")]
    plot_script: PathBuf,

    /// Interpreter used to run the plotting script
    #[arg(long, default_value = "python3")]
    python: String,

    /// Do not run the plotting script
    #[arg(long)]
    no_plot: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(args.log_level).into())
            .from_env_lossy())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let data: Dataset<f64> = io::load_dataset(&args.file)
        .with_context(|| format!("failed to read points from {}", args.file.display()))?;
    info!(points = data.len(), dims = data.dims(), k = args.k, "dataset loaded");

    let kmean = KMeans::new(data).context("invalid dataset")?;

    let mut builder = KMeansConfig::build().tie_break(args.tie_break);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let conf = builder.build();

    let state = kmean.kmeans_lloyd(args.k, args.max_iter.unwrap_or(usize::MAX), KMeans::init_bounded_uniform, &conf)?;
    let result = kmean.finish(state);

    io::save_csv(&result.clusters, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("partition written to {}", args.output.display());

    if !args.no_plot {
        if let Err(e) = io::run_plot_script(&args.python, &args.plot_script, &args.output) {
            warn!("skipping plot: {}", e);
        }
    }

    print!("{}", result.summary());
    Ok(())
}
