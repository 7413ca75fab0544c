use anyhow::{Context, Result};
use clap::Parser;
use layout::{DatasetProfile, PRESET_NAMES, ResidualRange, ValueRange};
use tracing::info;
use tracing_subscriber::EnvFilter;

use plot_forecast::{Config, build_figure, load_frame, render_figure};

// Include entrypoint helper module
#[path = "entrypoint_helper.rs"]
mod entrypoint_helper;

use entrypoint_helper::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            data_file,
            preset,
            validation_start,
            n_valid,
            residual_column,
            output_dir,
            output,
            verbose,
        } => {
            init_tracing(verbose);

            let mut config = match (config, data_file) {
                (Some(path), data_file) => {
                    let mut config = Config::from_file(&path)
                        .with_context(|| format!("loading config {}", path.display()))?;
                    if let Some(file) = data_file {
                        config.data.file = file;
                    }
                    config
                }
                (None, Some(file)) => Config::for_preset("ridership", file),
                (None, None) => anyhow::bail!("either --config or --data-file is required"),
            };
            if let Some(preset) = preset {
                config.chart.preset = preset;
                config.chart.profile = None;
            }
            if validation_start.is_some() {
                config.data.validation_start = validation_start;
            }
            if let Some(n) = n_valid {
                config.data.n_valid = n;
                config.data.validation_start = None;
            }
            if residual_column.is_some() {
                config.data.residual_column = residual_column;
            }
            if let Some(dir) = output_dir {
                config.output.output_dir = dir;
            }
            if let Some(name) = output {
                config.output.file_name = name;
            }
            config.validate()?;

            info!(data = %config.data.file.display(), preset = %config.chart.preset, "rendering");
            let frame = load_frame(&config.data.file, config.data.date_column.as_deref())
                .with_context(|| format!("loading {}", config.data.file.display()))?;
            info!(rows = frame.len(), "loaded data");

            let figure = build_figure(&config, &frame)?;

            std::fs::create_dir_all(&config.output.output_dir).with_context(|| {
                format!("creating output directory {}", config.output.output_dir.display())
            })?;
            let chart_path = config.output_path();
            render_figure(&figure, &chart_path)?;
            info!(path = %chart_path.display(), "chart saved");
        }

        Commands::Presets => {
            for name in PRESET_NAMES {
                let profile = DatasetProfile::preset(name)?;
                print_profile(&profile);
            }
        }

        Commands::InitConfig {
            preset,
            data_file,
            output,
        } => {
            init_tracing(false);
            let config = Config::for_preset(&preset, data_file);
            config.validate()?;
            config.to_file(&output)?;
            info!(path = %output.display(), "configuration written");
        }
    }

    Ok(())
}

fn print_profile(profile: &DatasetProfile) {
    println!("{}", profile.name);
    println!("  Column:          {}", profile.value_column);
    println!(
        "  Time window:     {} .. {}",
        profile.x_window.min.date(),
        profile.x_window.max.date()
    );
    match profile.value_range {
        ValueRange::Fixed { min, max } => println!("  Value range:     [{}, {}]", min, max),
        ValueRange::DataDerived => println!("  Value range:     [0.9 x min, 1.1 x max]"),
    }
    match profile.residual_range {
        ResidualRange::Fixed { min, max } => println!("  Residual range:  [{}, {}]", min, max),
        ResidualRange::Heuristic => println!("  Residual range:  +/- scaled from value range"),
    }
    println!("  Labels:          {} / {}", profile.value_label, profile.residual_label);
    println!();
}
