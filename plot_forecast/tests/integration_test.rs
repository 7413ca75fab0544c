//! End-to-end runs from a CSV file to a rendered chart

use std::fs;
use std::io::Write;
use std::path::Path;

use layout::{Artist, AxisRange};
use plot_forecast::{Config, build_figure, load_frame, render_figure};
use tempfile::tempdir;

/// Amtrak-style monthly ridership, Jan 1991 to Mar 2004.
fn write_ridership_csv(path: &Path) {
    let mut file = fs::File::create(path).unwrap();
    writeln!(file, "Month,Ridership,Residual").unwrap();
    for i in 0..159 {
        let (year, month) = (1991 + i / 12, i % 12 + 1);
        let value = 1800.0 + 150.0 * ((i as f64) * std::f64::consts::PI / 6.0).sin();
        let residual = if i >= 123 { (i as f64 - 140.0) * 3.0 } else { 0.0 };
        writeln!(file, "{:02}/01/{},{:.3},{:.3}", month, year, value, residual).unwrap();
    }
}

/// Wine-style monthly sales with the date in the second column.
fn write_wine_csv(path: &Path) {
    let mut file = fs::File::create(path).unwrap();
    writeln!(file, "Red,Month,DryWhite").unwrap();
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
    for i in 0..180 {
        let (year, month) = (80 + i / 12, months[i % 12]);
        let value = 2000.0 + 800.0 * ((i % 12) as f64 / 11.0);
        writeln!(file, "{},{}-{:02},{:.1}", 500 + i, month, year, value).unwrap();
    }
}

fn render_and_check(config: &Config, figure: &layout::Figure) {
    let path = config.output_path();
    render_figure(figure, &path).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_ridership_pipeline() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("Amtrak.csv");
    write_ridership_csv(&data_path);

    let mut config = Config::for_preset("ridership", &data_path);
    config.data.residual_column = Some("Residual".to_string());
    config.output.output_dir = dir.path().to_path_buf();
    config.validate().unwrap();

    let frame = load_frame(&config.data.file, None).unwrap();
    assert_eq!(frame.len(), 159);

    let figure = build_figure(&config, &frame).unwrap();
    assert_eq!(figure.value.ylim, Some(AxisRange::new(1300.0, 2550.0).unwrap()));
    assert_eq!(figure.value.xlim, figure.residual.xlim);
    assert_eq!(figure.value.series().count(), 2);
    assert_eq!(figure.residual.series().count(), 2);

    render_and_check(&config, &figure);
}

#[test]
fn test_wine_pipeline_from_config_file() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("AustralianWines.csv");
    write_wine_csv(&data_path);

    let config_path = dir.path().join("wine.toml");
    let toml = format!(
        r#"
[chart]
preset = "wine"
width = 640
height = 480

[data]
file = "{}"
date_column = "Month"
validation_start = "1993-01-01"

[output]
output_dir = "{}"
file_name = "wine.svg"
"#,
        data_path.display().to_string().replace('\\', "/"),
        dir.path().display().to_string().replace('\\', "/"),
    );
    fs::write(&config_path, toml).unwrap();

    let config = Config::from_file(&config_path).unwrap();
    config.validate().unwrap();
    let frame = load_frame(&config.data.file, config.data.date_column.as_deref()).unwrap();
    assert_eq!(frame.len(), 180);

    let figure = build_figure(&config, &frame).unwrap();
    assert_eq!(figure.size, (640, 480));

    let ylim = figure.value.ylim.unwrap();
    assert!((ylim.min - 1800.0).abs() < 1e-6);
    assert!((ylim.max - 3080.0).abs() < 1e-6);
    let half = (ylim.max + ylim.min) / 4.0;
    let residual = figure.residual.ylim.unwrap();
    assert!((residual.max - half).abs() < 1e-9);
    assert!((residual.min + half).abs() < 1e-9);

    let boundaries = figure
        .value
        .artists
        .iter()
        .filter(|a| matches!(a, Artist::VLine { .. }))
        .count();
    assert_eq!(boundaries, 1);

    render_and_check(&config, &figure);
}

#[test]
fn test_init_config_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plot_forecast.toml");
    let config = Config::for_preset("wine", "AustralianWines.csv");
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.chart.preset, "wine");
    assert_eq!(loaded.data.n_valid, 36);
    loaded.validate().unwrap();
}
