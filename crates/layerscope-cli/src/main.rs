//! Layerscope CLI - run network inefficiency analysis from the shell.

#![allow(
    clippy::uninlined_format_args,
    clippy::unwrap_used,
    clippy::too_many_lines,
    clippy::cast_precision_loss
)]

use clap::{Parser, Subcommand};
use layerscope_core::{
    DenseNetwork, Label, LabeledPoint, NetworkEfficiencyAnalyzer, NetworkEfficiencyReport,
    CrossRunSummary,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "layerscope")]
#[command(about = "Per-layer KL-divergence inefficiency analysis of small networks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one model against one labeled dataset
    Analyze {
        /// Path to the model JSON file
        #[arg(short, long)]
        model: PathBuf,

        /// Path to the dataset JSON file
        #[arg(short, long)]
        data: PathBuf,

        /// Emit the full report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also dump per-layer histograms
        #[arg(long)]
        histograms: bool,
    },

    /// Analyze one model against several datasets and summarize divergences
    Summarize {
        /// Path to the model JSON file
        #[arg(short, long)]
        model: PathBuf,

        /// Dataset JSON files, one analysis run each
        #[arg(required = true)]
        data: Vec<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            model,
            data,
            json,
            histograms,
        } => run_analyze(&model, &data, json, histograms),
        Commands::Summarize { model, data } => run_summarize(&model, &data),
    }
}

fn load_network(path: &Path) -> DenseNetwork {
    let contents = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: cannot read model {}: {e}", path.display());
        process::exit(1);
    });
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        eprintln!("error: invalid model {}: {e}", path.display());
        process::exit(1);
    })
}

fn load_dataset(path: &Path) -> Vec<LabeledPoint> {
    let contents = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: cannot read dataset {}: {e}", path.display());
        process::exit(1);
    });
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        eprintln!("error: invalid dataset {}: {e}", path.display());
        process::exit(1);
    })
}

fn run_analyze(model: &Path, data: &Path, json: bool, histograms: bool) {
    let network = load_network(model);
    let dataset = load_dataset(data);

    let mut analyzer = NetworkEfficiencyAnalyzer::new();
    let report = match analyzer.analyze(&network, &dataset, dataset.len() as u64) {
        Ok(report) => report.clone(),
        Err(e) => {
            eprintln!("error: analysis failed: {e}");
            process::exit(1);
        }
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serializes")
        );
    } else {
        print_report(&report);
    }

    if histograms {
        for (idx, histogram) in analyzer.histograms().unwrap_or(&[]).iter().enumerate() {
            println!("\nlayer {idx} histogram:");
            for (key, count) in histogram.iter() {
                println!("  {key}  {count}");
            }
        }
    }
}

fn run_summarize(model: &Path, data: &[PathBuf]) {
    let network = load_network(model);
    let mut summary = CrossRunSummary::new();
    let mut analyzer = NetworkEfficiencyAnalyzer::new();

    for path in data {
        let dataset = load_dataset(path);
        analyzer.reset();
        match analyzer.analyze(&network, &dataset, dataset.len() as u64) {
            Ok(report) => {
                if !summary.record_report(report) {
                    eprintln!(
                        "error: {} produced a different layer count than earlier runs",
                        path.display()
                    );
                    process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("error: analysis of {} failed: {e}", path.display());
                process::exit(1);
            }
        }
    }

    println!("runs: {}", summary.runs());
    let means = summary.layer_means();
    let stdevs = summary.layer_stdevs();
    println!("{:>5}  {:>12}  {:>12}", "layer", "mean KL", "stdev");
    for (idx, (mean, stdev)) in means.iter().zip(&stdevs).enumerate() {
        println!("{idx:>5}  {mean:>12.4}  {stdev:>12.4}");
    }
}

fn print_report(report: &NetworkEfficiencyReport) {
    println!(
        "samples: {} (negatives: {}, positives: {})",
        report.class_counts.total(),
        report.class_counts.negatives,
        report.class_counts.positives
    );
    println!(
        "{:>5}  {:>5}  {:>6}  {:>9}  {:>10}  {:>11}",
        "layer", "nodes", "bins", "ref prob", "KL (bits)", "states N/P"
    );
    for layer in &report.layers {
        println!(
            "{:>5}  {:>5}  {:>6}  {:>9.6}  {:>10.4}  {:>5}/{:<5}",
            layer.layer,
            layer.node_count,
            layer.num_bins,
            layer.reference_prob,
            layer.divergence,
            layer.usage_for(Label::Negative).states_used,
            layer.usage_for(Label::Positive).states_used,
        );
    }
    println!("arithmetic mean KL: {:.4}", report.arithmetic_mean);
    match report.geometric_mean {
        Some(g) => println!("geometric mean KL: {g:.4}"),
        None => println!("geometric mean KL: undefined"),
    }
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
}
