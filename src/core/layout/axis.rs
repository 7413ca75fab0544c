use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Closed interval used for axis limits and marker spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy + Display> AxisRange<T> {
    /// Axis limits; the lower bound must be strictly below the upper one.
    pub fn new(min: T, max: T) -> Result<Self> {
        if min < max {
            Ok(Self { min, max })
        } else {
            Err(LayoutError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            })
        }
    }

    /// Span that may collapse to a single point (one-row series).
    pub fn degenerate_ok(min: T, max: T) -> Result<Self> {
        if min <= max {
            Ok(Self { min, max })
        } else {
            Err(LayoutError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            })
        }
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        let min = if other.min < self.min { other.min } else { self.min };
        let max = if other.max > self.max { other.max } else { self.max };
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

impl AxisRange<f64> {
    /// Point at fraction `t` of the way from `min` to `max`.
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + t * (self.max - self.min)
    }

    /// Height of the training/validation marker segments.
    pub fn marker_height(&self) -> f64 {
        0.9 * self.max + 0.1 * self.min
    }

    /// Baseline of the "Training" / "Validation" labels.
    pub fn label_height(&self) -> f64 {
        0.925 * self.max + 0.075 * self.min
    }
}

impl AxisRange<NaiveDateTime> {
    /// Temporal centre of the span.
    pub fn center(&self) -> NaiveDateTime {
        self.min + (self.max - self.min) / 2
    }
}
