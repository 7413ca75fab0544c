//! Configuration structures for the chart tool.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use layout::DatasetProfile;
use serde::{Deserialize, Serialize};

use crate::error::PlotError;

/// Main configuration for one chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataset preset and figure size
    #[serde(default)]
    pub chart: ChartConfig,

    /// Input data and the training/validation split
    pub data: DataConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Chart configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Built-in dataset preset: "ridership" or "wine"
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Figure width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Figure height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Inline profile; replaces the preset when present
    #[serde(default)]
    pub profile: Option<DatasetProfile>,
}

/// Input data configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV file with a header line and a date column
    pub file: PathBuf,

    /// Name of the date column (first column when absent)
    #[serde(default)]
    pub date_column: Option<String>,

    /// First date of the validation period
    #[serde(default)]
    pub validation_start: Option<NaiveDate>,

    /// Number of trailing rows used for validation when no start date is given
    #[serde(default = "default_n_valid")]
    pub n_valid: usize,

    /// Column with forecast errors to draw on the bottom panel
    #[serde(default)]
    pub residual_column: Option<String>,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for rendered charts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Chart file name; a `.svg` extension selects the SVG backend
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

// Default value functions
fn default_preset() -> String { "ridership".to_string() }
fn default_width() -> u32 { 900 }
fn default_height() -> u32 { 750 }
fn default_n_valid() -> usize { 36 }
fn default_output_dir() -> PathBuf { PathBuf::from(".") }
fn default_file_name() -> String { "forecast_layout.png".to_string() }

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            profile: None,
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_name: default_file_name(),
        }
    }
}

impl Config {
    /// Default configuration for a preset and a data file.
    pub fn for_preset(preset: &str, data_file: impl Into<PathBuf>) -> Self {
        Self {
            chart: ChartConfig {
                preset: preset.to_string(),
                ..ChartConfig::default()
            },
            data: DataConfig {
                file: data_file.into(),
                date_column: None,
                validation_start: None,
                n_valid: default_n_valid(),
                residual_column: None,
            },
            output: OutputConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlotError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| PlotError::ConfigRead {
                path: path.as_ref().to_path_buf(),
                source,
            })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            PlotError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PlotError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PlotError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Dataset profile in effect: the inline one, else the named preset.
    pub fn profile(&self) -> Result<DatasetProfile, PlotError> {
        match &self.chart.profile {
            Some(profile) => Ok(profile.clone()),
            None => Ok(DatasetProfile::preset(&self.chart.preset)?),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.output_dir.join(&self.output.file_name)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), PlotError> {
        self.profile()?.validate()?;

        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(PlotError::Config(format!(
                "figure size must be positive, got {}x{}",
                self.chart.width, self.chart.height
            )));
        }

        if self.data.validation_start.is_none() && self.data.n_valid == 0 {
            return Err(PlotError::Config(
                "n_valid must be greater than 0 when validation_start is not set".to_string(),
            ));
        }

        if self.output.file_name.is_empty() {
            return Err(PlotError::Config("output file_name is empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::ValueRange;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config: Config = toml::from_str(
            r#"
            [data]
            file = "amtrak.csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.chart.preset, "ridership");
        assert_eq!(config.chart.width, 900);
        assert_eq!(config.data.n_valid, 36);
        assert_eq!(config.output_path(), PathBuf::from("./forecast_layout.png"));
        config.validate().unwrap();
    }

    #[test]
    fn test_inline_profile_overrides_preset() {
        let config: Config = toml::from_str(
            r#"
            [chart]
            preset = "ridership"

            [chart.profile]
            name = "beer"
            value_column = "Beer"
            value_label = "Litres"
            x_window = { min = "1990-01-01T00:00:00", max = "2000-01-01T00:00:00" }
            value_range = { kind = "data_derived" }
            residual_range = { kind = "heuristic" }

            [data]
            file = "beer.csv"
            validation_start = "1998-01-01"
            "#,
        )
        .unwrap();
        let profile = config.profile().unwrap();
        assert_eq!(profile.value_column, "Beer");
        assert_eq!(profile.value_range, ValueRange::DataDerived);
        assert_eq!(
            config.data.validation_start,
            NaiveDate::from_ymd_opt(1998, 1, 1)
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::for_preset("wine", "wine.csv");
        config.validate().unwrap();

        config.data.n_valid = 0;
        assert!(matches!(config.validate(), Err(PlotError::Config(_))));

        let mut config = Config::for_preset("stout", "x.csv");
        assert!(matches!(config.validate(), Err(PlotError::Layout(_))));
        config.chart.preset = "wine".to_string();
        config.chart.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = Config::from_file("/nonexistent/plot_forecast.toml").unwrap_err();
        assert!(matches!(err, PlotError::ConfigRead { .. }));
        assert!(err.to_string().contains("/nonexistent/plot_forecast.toml"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut config = Config::for_preset("wine", "AustralianWines.csv");
        config.chart.profile = Some(DatasetProfile::wine());
        config.data.residual_column = Some("Residual".to_string());

        config.to_file(temp_file.path()).unwrap();
        let loaded = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.chart.preset, "wine");
        assert_eq!(loaded.chart.profile, Some(DatasetProfile::wine()));
        assert_eq!(loaded.data.residual_column.as_deref(), Some("Residual"));
    }
}
