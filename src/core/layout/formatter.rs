//! Training/validation layout of the two forecast panels.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::{debug, instrument};

use crate::axis::AxisRange;
use crate::error::{LayoutError, Result};
use crate::profile::{DatasetProfile, ResidualRange, ValueRange};
use crate::series::{Frame, finite_bounds};
use crate::surface::{LineStyle, PlotSurface, Rgb};

/// Offset trimmed from the marker spans so neighbouring segments do not touch.
pub const ONE_MONTH: TimeDelta = TimeDelta::days(31);

pub const ANNOTATION_STYLE: LineStyle = LineStyle::solid(Rgb::BLACK, 0.5);
pub const TRAIN_STYLE: LineStyle = LineStyle::solid(Rgb::C0, 0.75);
pub const VALIDATION_STYLE: LineStyle = LineStyle::dashed(Rgb::C0, 0.75);

/// Marker geometry of one training/validation split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitMarkers {
    pub train_span: AxisRange<NaiveDateTime>,
    pub validation_span: AxisRange<NaiveDateTime>,
    /// Vertical line halfway between the two spans.
    pub boundary: NaiveDateTime,
}

impl SplitMarkers {
    pub fn compute(train: &Frame, test: &Frame) -> Result<Self> {
        let train_index = train
            .index_bounds()
            .map_err(|_| LayoutError::EmptySeries("training slice".to_string()))?;
        let test_index = test
            .index_bounds()
            .map_err(|_| LayoutError::EmptySeries("validation slice".to_string()))?;

        // A one-row slice collapses to a point rather than an inverted span.
        let train_end = (train_index.max - ONE_MONTH).max(train_index.min);
        let test_start = test_index.min + ONE_MONTH;
        let test_end = (test_index.max - ONE_MONTH).max(test_start);

        let train_span = AxisRange::degenerate_ok(train_index.min, train_end)?;
        let validation_span = AxisRange::degenerate_ok(test_start, test_end)?;
        let boundary = train_span.max + (validation_span.min - train_span.max) / 2;

        Ok(Self {
            train_span,
            validation_span,
            boundary,
        })
    }
}

/// Half-width of the residual panel, scaled from the value range bounds.
pub fn residual_half_width(min: f64, max: f64) -> f64 {
    if max > 10.0 {
        (max + min) / 4.0
    } else {
        (max + min) / 20.0
    }
}

/// Lays out a value panel and a residual panel for one dataset profile.
#[derive(Debug, Clone)]
pub struct ChartLayoutFormatter {
    profile: DatasetProfile,
}

impl ChartLayoutFormatter {
    pub fn new(profile: DatasetProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &DatasetProfile {
        &self.profile
    }

    pub fn split_markers(&self, train: &Frame, test: &Frame) -> Result<SplitMarkers> {
        SplitMarkers::compute(train, test)
    }

    /// Window, y-limits, split markers and captions on one panel.
    pub fn configure_value_panel<S: PlotSurface + ?Sized>(
        &self,
        panel: &mut S,
        y_range: AxisRange<f64>,
        train: &Frame,
        test: &Frame,
    ) -> Result<()> {
        let markers = self.split_markers(train, test)?;
        debug!(
            train_start = %markers.train_span.min,
            train_end = %markers.train_span.max,
            valid_start = %markers.validation_span.min,
            valid_end = %markers.validation_span.max,
            boundary = %markers.boundary,
            "split markers"
        );

        panel.set_xlim(self.profile.x_window);
        panel.set_ylim(y_range);
        panel.set_xlabel("Time");

        let y = y_range.marker_height();
        panel.add_line(markers.train_span, y, ANNOTATION_STYLE);
        panel.add_line(markers.validation_span, y, ANNOTATION_STYLE);
        panel.axvline(markers.boundary, ANNOTATION_STYLE);

        let (train_x, valid_x) = match self.profile.label_anchors {
            Some(anchors) => (anchors.training, anchors.validation),
            None => (markers.train_span.center(), markers.validation_span.center()),
        };
        let y = y_range.label_height();
        panel.text(train_x, y, "Training");
        panel.text(valid_x, y, "Validation");
        Ok(())
    }

    /// Zero reference line of the forecast-error panel.
    pub fn configure_residual_panel<S: PlotSurface + ?Sized>(&self, panel: &mut S) {
        panel.axhline(0.0, ANNOTATION_STYLE);
    }

    /// Y-limits of the value panel.
    pub fn value_range(&self, train: &Frame, test: &Frame) -> Result<AxisRange<f64>> {
        match self.profile.value_range {
            ValueRange::Fixed { min, max } => AxisRange::new(min, max),
            ValueRange::DataDerived => {
                let column = &self.profile.value_column;
                let values = train
                    .values(column)?
                    .iter()
                    .chain(test.values(column)?.iter())
                    .copied();
                let (lo, hi) = finite_bounds(values).ok_or_else(|| {
                    LayoutError::EmptySeries(format!("no finite values in '{}'", column))
                })?;
                AxisRange::new(lo * 0.9, hi * 1.1)
            }
        }
    }

    /// Y-limits of the residual panel.
    pub fn residual_range(&self, train: &Frame, test: &Frame) -> Result<AxisRange<f64>> {
        match self.profile.residual_range {
            ResidualRange::Fixed { min, max } => AxisRange::new(min, max),
            ResidualRange::Heuristic => {
                let values = self.value_range(train, test)?;
                let half = residual_half_width(values.min, values.max);
                AxisRange::new(-half, half)
            }
        }
    }

    /// Full two-panel layout: annotations, both series, labels and a shared
    /// time axis.
    #[instrument(skip_all, fields(profile = %self.profile.name))]
    pub fn layout_figure<V, R>(
        &self,
        value_panel: &mut V,
        residual_panel: &mut R,
        train: &Frame,
        test: &Frame,
    ) -> Result<()>
    where
        V: PlotSurface + ?Sized,
        R: PlotSurface + ?Sized,
    {
        let column = &self.profile.value_column;
        let train_series = train.column(column)?;
        let test_series = test.column(column)?;

        let value_range = self.value_range(train, test)?;
        let residual_range = self.residual_range(train, test)?;
        debug!(
            value_min = value_range.min,
            value_max = value_range.max,
            residual_min = residual_range.min,
            residual_max = residual_range.max,
            "panel ranges"
        );

        self.configure_value_panel(value_panel, value_range, train, test)?;
        if self.profile.annotate_residual {
            self.configure_value_panel(residual_panel, residual_range, train, test)?;
        } else {
            residual_panel.set_xlim(self.profile.x_window);
            residual_panel.set_ylim(residual_range);
            residual_panel.set_xlabel("Time");
        }

        value_panel.plot_series(&train_series, Some(column.as_str()), TRAIN_STYLE);
        value_panel.plot_series(&test_series, Some(column.as_str()), VALIDATION_STYLE);
        self.configure_residual_panel(residual_panel);

        value_panel.set_xlabel("");
        value_panel.set_ylabel(&self.profile.value_label);
        residual_panel.set_ylabel(&self.profile.residual_label);

        if value_panel.legend().is_some() {
            value_panel.remove_legend();
        }

        unify_x_limits(value_panel, residual_panel);
        Ok(())
    }
}

/// Give both panels the union of their x-limits. Returns the shared range.
pub fn unify_x_limits<A, B>(a: &mut A, b: &mut B) -> Option<AxisRange<NaiveDateTime>>
where
    A: PlotSurface + ?Sized,
    B: PlotSurface + ?Sized,
{
    let shared = match (a.xlim(), b.xlim()) {
        (Some(x), Some(y)) => x.union(&y),
        (Some(x), None) | (None, Some(x)) => x,
        (None, None) => return None,
    };
    a.set_xlim(shared);
    b.set_xlim(shared);
    Some(shared)
}
