use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use trendscope::{analyze_table, load_file, AnalysisStore, PngSurface};

/// Analyze a tabular time-series dataset: per-column trend and anomaly
/// narrative plus one plot artifact per numeric column.
#[derive(Debug, Parser)]
#[command(name = "trendscope", version)]
struct Args {
    /// Input dataset (.csv, .xls or .xlsx)
    input: PathBuf,

    /// Directory for generated plot images
    #[arg(long, default_value = "plots")]
    plot_dir: PathBuf,

    /// SQLite database for dataset and analysis records
    #[arg(long, default_value = "trendscope.db")]
    database: PathBuf,

    /// Print the outcome as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let table = load_file(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    let store = AnalysisStore::open(&args.database).context("failed to open database")?;
    let dataset_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());
    let dataset_id = store.save_dataset(&dataset_name)?;

    let surface = PngSurface::new(&args.plot_dir)?;
    let outcome = analyze_table(&table, &surface)?;

    store.save_analysis(dataset_id, &outcome.text(), outcome.plots())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.text());
        for plot in outcome.plots() {
            println!("plot: {}", args.plot_dir.join(plot).display());
        }
    }

    Ok(())
}
