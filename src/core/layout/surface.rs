//! Drawing surface capability and the in-memory panel that records it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::axis::AxisRange;
use crate::series::TimeIndexedSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Default colour of the first plotted series.
    pub const C0: Rgb = Rgb(31, 119, 180);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dash {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Rgb,
    /// Width in points.
    pub width: f64,
    pub dash: Dash,
}

impl LineStyle {
    pub const fn solid(color: Rgb, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Dash::Solid,
        }
    }

    pub const fn dashed(color: Rgb, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Dash::Dashed,
        }
    }
}

/// Everything a panel can hold, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    /// Horizontal segment between two dates at a fixed height.
    Segment {
        x: AxisRange<NaiveDateTime>,
        y: f64,
        style: LineStyle,
    },
    /// Horizontal line across the full panel width.
    HLine { y: f64, style: LineStyle },
    /// Vertical line across the full panel height.
    VLine { x: NaiveDateTime, style: LineStyle },
    Text {
        x: NaiveDateTime,
        y: f64,
        text: String,
    },
    Series {
        series: TimeIndexedSeries,
        label: Option<String>,
        style: LineStyle,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub entries: Vec<(String, LineStyle)>,
}

/// Operations the formatter needs from a plot area.
pub trait PlotSurface {
    fn set_xlim(&mut self, range: AxisRange<NaiveDateTime>);
    fn set_ylim(&mut self, range: AxisRange<f64>);
    /// Current x-limits: explicit ones, else the data extent.
    fn xlim(&self) -> Option<AxisRange<NaiveDateTime>>;
    fn ylim(&self) -> Option<AxisRange<f64>>;
    fn set_xlabel(&mut self, label: &str);
    fn set_ylabel(&mut self, label: &str);
    fn add_line(&mut self, x: AxisRange<NaiveDateTime>, y: f64, style: LineStyle);
    fn axhline(&mut self, y: f64, style: LineStyle);
    fn axvline(&mut self, x: NaiveDateTime, style: LineStyle);
    fn text(&mut self, x: NaiveDateTime, y: f64, text: &str);
    fn plot_series(&mut self, series: &TimeIndexedSeries, label: Option<&str>, style: LineStyle);
    fn legend(&self) -> Option<&Legend>;
    fn remove_legend(&mut self);
}

/// Recording plot area. Holds the scene until a backend draws it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    pub artists: Vec<Artist>,
    pub xlim: Option<AxisRange<NaiveDateTime>>,
    pub ylim: Option<AxisRange<f64>>,
    pub xlabel: String,
    pub ylabel: String,
    pub legend: Option<Legend>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self) -> impl Iterator<Item = (&TimeIndexedSeries, &LineStyle)> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Series { series, style, .. } => Some((series, style)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (NaiveDateTime, f64, &str)> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Text { x, y, text } => Some((*x, *y, text.as_str())),
            _ => None,
        })
    }

    /// Date extent of everything placed on the panel.
    fn data_xlim(&self) -> Option<AxisRange<NaiveDateTime>> {
        let mut bounds: Option<AxisRange<NaiveDateTime>> = None;
        let mut extend = |lo: NaiveDateTime, hi: NaiveDateTime| {
            let span = AxisRange { min: lo, max: hi };
            bounds = Some(match bounds {
                Some(b) => b.union(&span),
                None => span,
            });
        };
        for artist in &self.artists {
            match artist {
                Artist::Segment { x, .. } => extend(x.min, x.max),
                Artist::VLine { x, .. } | Artist::Text { x, .. } => extend(*x, *x),
                Artist::Series { series, .. } => {
                    if let (Some(lo), Some(hi)) = (series.min_timestamp(), series.max_timestamp()) {
                        extend(lo, hi);
                    }
                }
                Artist::HLine { .. } => {}
            }
        }
        bounds
    }
}

impl PlotSurface for Panel {
    fn set_xlim(&mut self, range: AxisRange<NaiveDateTime>) {
        self.xlim = Some(range);
    }

    fn set_ylim(&mut self, range: AxisRange<f64>) {
        self.ylim = Some(range);
    }

    fn xlim(&self) -> Option<AxisRange<NaiveDateTime>> {
        self.xlim.or_else(|| self.data_xlim())
    }

    fn ylim(&self) -> Option<AxisRange<f64>> {
        self.ylim
    }

    fn set_xlabel(&mut self, label: &str) {
        self.xlabel = label.to_string();
    }

    fn set_ylabel(&mut self, label: &str) {
        self.ylabel = label.to_string();
    }

    fn add_line(&mut self, x: AxisRange<NaiveDateTime>, y: f64, style: LineStyle) {
        self.artists.push(Artist::Segment { x, y, style });
    }

    fn axhline(&mut self, y: f64, style: LineStyle) {
        self.artists.push(Artist::HLine { y, style });
    }

    fn axvline(&mut self, x: NaiveDateTime, style: LineStyle) {
        self.artists.push(Artist::VLine { x, style });
    }

    fn text(&mut self, x: NaiveDateTime, y: f64, text: &str) {
        self.artists.push(Artist::Text {
            x,
            y,
            text: text.to_string(),
        });
    }

    fn plot_series(&mut self, series: &TimeIndexedSeries, label: Option<&str>, style: LineStyle) {
        // Labelled lines get a legend, as the charting libraries do by default.
        if let Some(label) = label {
            self.legend
                .get_or_insert_with(|| Legend {
                    entries: Vec::new(),
                })
                .entries
                .push((label.to_string(), style));
        }
        self.artists.push(Artist::Series {
            series: series.clone(),
            label: label.map(str::to_string),
            style,
        });
    }

    fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    fn remove_legend(&mut self) {
        self.legend = None;
    }
}

/// Two vertically stacked panels sharing the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub value: Panel,
    pub residual: Panel,
    /// Pixel size (width, height).
    pub size: (u32, u32),
}

impl Figure {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            value: Panel::new(),
            residual: Panel::new(),
            size,
        }
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new((900, 750))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_labelled_series_creates_legend() {
        let mut panel = Panel::new();
        let series = TimeIndexedSeries::new("a", vec![(ts(2000, 1), 1.0), (ts(2000, 6), 2.0)]);
        panel.plot_series(&series, None, LineStyle::solid(Rgb::C0, 1.0));
        assert!(panel.legend().is_none());

        panel.plot_series(&series, Some("a"), LineStyle::solid(Rgb::C0, 1.0));
        assert_eq!(panel.legend().unwrap().entries.len(), 1);

        panel.remove_legend();
        assert!(panel.legend().is_none());
        assert_eq!(panel.series().count(), 2);
    }

    #[test]
    fn test_xlim_autoscales_until_set() {
        let mut panel = Panel::new();
        assert!(panel.xlim().is_none());

        panel.axhline(0.0, LineStyle::solid(Rgb::BLACK, 0.5));
        assert!(panel.xlim().is_none());

        let series = TimeIndexedSeries::new("a", vec![(ts(2001, 1), 1.0), (ts(2003, 1), 2.0)]);
        panel.plot_series(&series, None, LineStyle::solid(Rgb::C0, 1.0));
        panel.text(ts(1999, 1), 1.0, "early");
        let auto = panel.xlim().unwrap();
        assert_eq!(auto.min, ts(1999, 1));
        assert_eq!(auto.max, ts(2003, 1));

        let fixed = AxisRange::new(ts(1990, 1), ts(2010, 1)).unwrap();
        panel.set_xlim(fixed);
        assert_eq!(panel.xlim(), Some(fixed));
    }
}
