use clap::{Parser, Subcommand};
use std::path::PathBuf;

use chrono::NaiveDate;

/// Two-panel forecast charts with the training/validation split annotated
#[derive(Parser, Debug)]
#[command(name = "plot_forecast")]
#[command(about = "Lay out and render forecast charts for time-series datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a CSV file, split it and render the two-panel chart
    Render {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// CSV data file (overrides the config)
        #[arg(short, long)]
        data_file: Option<PathBuf>,

        /// Dataset preset: ridership or wine (overrides the config)
        #[arg(short, long)]
        preset: Option<String>,

        /// First date of the validation period, YYYY-MM-DD
        #[arg(short = 's', long)]
        validation_start: Option<NaiveDate>,

        /// Number of trailing rows used for validation
        #[arg(short = 'n', long)]
        n_valid: Option<usize>,

        /// Column with forecast errors for the bottom panel
        #[arg(short, long)]
        residual_column: Option<String>,

        /// Output directory
        #[arg(short = 'D', long)]
        output_dir: Option<PathBuf>,

        /// Output file name (.png or .svg)
        #[arg(short, long)]
        output: Option<String>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the built-in dataset presets
    Presets,

    /// Write a default configuration file for a preset
    InitConfig {
        /// Dataset preset: ridership or wine
        #[arg(short, long, default_value = "ridership")]
        preset: String,

        /// CSV data file referenced by the configuration
        #[arg(short, long)]
        data_file: PathBuf,

        /// Where to write the configuration
        #[arg(short, long, default_value = "plot_forecast.toml")]
        output: PathBuf,
    },
}
