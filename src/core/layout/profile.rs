//! Per-dataset chart constants.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::axis::AxisRange;
use crate::error::{LayoutError, Result};

/// How the value panel's y-limits are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueRange {
    Fixed { min: f64, max: f64 },
    /// [0.9 * smallest value, 1.1 * largest value] over both slices.
    DataDerived,
}

/// How the residual panel's y-limits are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResidualRange {
    Fixed { min: f64, max: f64 },
    /// Symmetric around zero, scaled from the value range.
    Heuristic,
}

/// Label positions for the "Training" and "Validation" captions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelAnchors {
    pub training: NaiveDateTime,
    pub validation: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub name: String,
    /// Numeric column drawn on the value panel.
    pub value_column: String,
    pub value_label: String,
    #[serde(default = "default_residual_label")]
    pub residual_label: String,
    /// Repeat the split annotations on the residual panel.
    #[serde(default = "default_annotate_residual")]
    pub annotate_residual: bool,
    /// Fixed date window of both panels.
    pub x_window: AxisRange<NaiveDateTime>,
    /// Literal label dates; span centres are used when absent.
    #[serde(default)]
    pub label_anchors: Option<LabelAnchors>,
    pub value_range: ValueRange,
    pub residual_range: ResidualRange,
}

fn default_residual_label() -> String {
    "Forecast Errors".to_string()
}

fn default_annotate_residual() -> bool {
    true
}

pub const PRESET_NAMES: [&str; 2] = ["ridership", "wine"];

fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

impl DatasetProfile {
    /// Monthly rail ridership, 1991 onwards.
    pub fn ridership() -> Self {
        Self {
            name: "ridership".to_string(),
            value_column: "Ridership".to_string(),
            x_window: AxisRange {
                min: date(1990, 1, 1),
                max: date(2004, 6, 1),
            },
            label_anchors: Some(LabelAnchors {
                training: date(1995, 1, 1),
                validation: date(2002, 3, 1),
            }),
            value_range: ValueRange::Fixed {
                min: 1300.0,
                max: 2550.0,
            },
            residual_range: ResidualRange::Fixed {
                min: -550.0,
                max: 550.0,
            },
            value_label: "Ridership (in 000s)".to_string(),
            residual_label: default_residual_label(),
            annotate_residual: true,
        }
    }

    /// Monthly dry white wine sales, 1980 onwards.
    pub fn wine() -> Self {
        Self {
            name: "wine".to_string(),
            value_column: "DryWhite".to_string(),
            x_window: AxisRange {
                min: date(1980, 1, 1),
                max: date(1995, 7, 1),
            },
            label_anchors: Some(LabelAnchors {
                training: date(1985, 1, 1),
                validation: date(1993, 1, 1),
            }),
            value_range: ValueRange::DataDerived,
            residual_range: ResidualRange::Heuristic,
            value_label: "Sales".to_string(),
            residual_label: default_residual_label(),
            annotate_residual: true,
        }
    }

    pub fn preset(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ridership" | "amtrak" => Ok(Self::ridership()),
            "wine" | "drywhite" => Ok(Self::wine()),
            _ => Err(LayoutError::UnknownPreset(name.to_string())),
        }
    }

    /// Reject windows and fixed ranges that cannot be drawn.
    pub fn validate(&self) -> Result<()> {
        AxisRange::new(self.x_window.min, self.x_window.max)?;
        if let ValueRange::Fixed { min, max } = self.value_range {
            AxisRange::new(min, max)?;
        }
        if let ResidualRange::Fixed { min, max } = self.residual_range {
            AxisRange::new(min, max)?;
        }
        if self.value_column.is_empty() {
            return Err(LayoutError::MissingColumn(
                "profile has no value column".to_string(),
            ));
        }
        Ok(())
    }
}
