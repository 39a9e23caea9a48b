//! xornet - train a two-layer perceptron on (noisy) XOR data.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use xornet::data::{generate_xor, parse_csv, write_csv};
use xornet::train::evaluate;
use xornet::{Dataset, HiddenActivation, RunConfig, TrainingLoop};

#[derive(Parser)]
#[command(name = "xornet")]
#[command(version)]
#[command(about = "Backpropagation on a 2-layer perceptron", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a network described by a JSON config
    Train {
        /// JSON file with layers, learning_rate, epochs, target_mse, ...
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Dataset CSV; falls back to `dataset_path` in the config, then to the XOR truth table
        #[arg(value_name = "DATASET")]
        dataset: Option<PathBuf>,

        /// Seed for weight initialization (overrides the config)
        #[arg(long)]
        seed: Option<u64>,

        /// Hidden-layer activation (overrides the config)
        #[arg(long, value_enum)]
        activation: Option<ActivationArg>,

        /// Log progress every N epochs (overrides the config)
        #[arg(long, value_name = "N")]
        report_every: Option<usize>,

        /// Write the per-epoch mse as `epoch,mse` rows
        #[arg(long, value_name = "PATH")]
        loss_out: Option<PathBuf>,
    },

    /// Write a noisy XOR dataset as CSV
    Generate {
        /// Number of rows
        #[arg(short = 'n', long, default_value_t = 500)]
        samples: usize,

        /// Share of labels to flip, in [0, 1]
        #[arg(short = 'p', long, default_value_t = 0.0)]
        noise: f64,

        /// Output file
        #[arg(short, long, default_value = "xor_dataset.csv")]
        out: PathBuf,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ActivationArg {
    Sigmoid,
    ReluK,
}

impl From<ActivationArg> for HiddenActivation {
    fn from(arg: ActivationArg) -> Self {
        match arg {
            ActivationArg::Sigmoid => HiddenActivation::Sigmoid,
            ActivationArg::ReluK => HiddenActivation::ReluK,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train { config, dataset, seed, activation, report_every, loss_out } => {
            let mut run_config = RunConfig::load_json(&config)
                .with_context(|| format!("failed to load config {}", config.display()))?;
            if seed.is_some() {
                run_config.seed = seed;
            }
            if let Some(activation) = activation {
                run_config.hidden_activation = activation.into();
            }
            if let Some(n) = report_every {
                run_config.report_every = n;
            }
            run_config.validate()?;

            let data = load_dataset(dataset.or_else(|| run_config.dataset_path.clone()), &run_config)?;
            train(&run_config, data, loss_out)
        }
        Commands::Generate { samples, noise, out, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let data = generate_xor(samples, noise, &mut rng)?;
            let file = File::create(&out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            write_csv(&data, BufWriter::new(file))?;
            info!(samples, noise, path = %out.display(), "dataset written");
            Ok(())
        }
    }
}

fn load_dataset(path: Option<PathBuf>, config: &RunConfig) -> Result<Dataset> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read dataset {}", path.display()))?;
            let data = parse_csv(&text, config.layers.output_size)
                .with_context(|| format!("failed to parse dataset {}", path.display()))?;
            info!(examples = data.len(), path = %path.display(), "dataset loaded");
            Ok(data)
        }
        None => {
            info!("no dataset given, using the XOR truth table");
            Ok(Dataset::xor_truth_table())
        }
    }
}

fn train(config: &RunConfig, data: Dataset, loss_out: Option<PathBuf>) -> Result<()> {
    let mut rng = config.rng();
    let network = config.build_network(&mut rng)?;
    let hidden = config.hidden()?;
    info!(
        topology = %config.layers,
        hidden = ?hidden,
        learning_rate = config.learning_rate,
        epochs = config.epochs,
        target_mse = config.target_mse,
        "starting training"
    );

    let mut run = TrainingLoop::new(network, data, config.train_config())?;
    let report = run.run()?;

    let final_metrics = evaluate(run.network(), run.dataset())?;
    println!(
        "{:?} at epoch {} | MSE {:.6} | Acc {}",
        report.outcome,
        report.epoch,
        report.mse,
        report.accuracy.map(|a| format!("{a:.3}")).unwrap_or_else(|| "n/a".to_string()),
    );
    println!(
        "Post-training | MSE {:.6} | Acc {:.2} %",
        final_metrics.mse(),
        final_metrics.accuracy() * 100.0
    );

    if let Some(path) = loss_out {
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "epoch,mse")?;
        for (i, mse) in report.history.iter().enumerate() {
            writeln!(writer, "{},{}", i + 1, mse)?;
        }
        writer.flush()?;
        info!(path = %path.display(), "loss history written");
    }

    Ok(())
}
