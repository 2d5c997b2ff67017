//! Command-line interface

use crate::config::AppConfig;
use crate::pipeline::{ChurnPredictor, TrainPipeline};
use crate::server;
use clap::{Parser, Subcommand};
use colored::Colorize;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "churncast")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Customer churn prediction service")]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default)
    Serve {
        /// Override the configured host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Train the churn model from the configured dataset
    Train,
    /// Predict churn labels for every row of a CSV file
    Predict {
        /// Input CSV carrying the 18 feature columns
        #[arg(short, long)]
        input: PathBuf,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(&cli.config)?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.app_host = host;
            }
            if let Some(port) = port {
                config.app_port = port;
            }
            server::run_server(config).await
        }
        Commands::Train => cmd_train(&config),
        Commands::Predict { input } => cmd_predict(&config, &input),
    }
}

fn cmd_train(config: &AppConfig) -> anyhow::Result<()> {
    println!("  {} training on {}", "›".blue(), config.data_path);
    let metrics = TrainPipeline::new(config.clone()).run_pipeline()?;

    println!(
        "  {} model saved to {}",
        "✓".green(),
        config.model_path().display()
    );
    println!("    accuracy   {:.3}", metrics.accuracy.unwrap_or(0.0));
    println!("    precision  {:.3}", metrics.precision.unwrap_or(0.0));
    println!("    recall     {:.3}", metrics.recall.unwrap_or(0.0));
    println!("    f1         {:.3}", metrics.f1_score.unwrap_or(0.0));
    Ok(())
}

fn cmd_predict(config: &AppConfig, input: &Path) -> anyhow::Result<()> {
    let file = File::open(input)?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(file)
        .finish()?;

    let predictor = ChurnPredictor::new(config)?;
    let labels = predictor.predict_batch(&df)?;

    println!("  {} {} rows scored", "✓".green(), labels.len());
    for (row, label) in labels.iter().enumerate() {
        println!("    row {row:<5} churn = {label}");
    }
    Ok(())
}
