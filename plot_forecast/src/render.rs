//! Visualization module drawing laid-out figures with plotters.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use layout::{Artist, AxisRange, Dash, Figure, LineStyle, Panel, PlotSurface, finite_bounds};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::error::PlotError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days since 1970-01-01, the x coordinate used on the plot.
pub fn date_num(ts: NaiveDateTime) -> f64 {
    ts.and_utc().timestamp() as f64 / SECONDS_PER_DAY
}

fn format_tick(days: f64) -> String {
    DateTime::from_timestamp((days * SECONDS_PER_DAY) as i64, 0)
        .map(|dt| dt.format("%Y").to_string())
        .unwrap_or_default()
}

fn render_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

fn to_rgb(style: &LineStyle) -> RGBColor {
    RGBColor(style.color.0, style.color.1, style.color.2)
}

/// Pixel stroke for a width in points.
fn stroke(style: &LineStyle) -> ShapeStyle {
    let width = (style.width * 2.0).round().max(1.0) as u32;
    to_rgb(style).stroke_width(width)
}

/// Draw the value panel above the residual panel and write the image.
///
/// A `.svg` extension selects the SVG backend, anything else produces PNG.
pub fn render_figure<P: AsRef<Path>>(figure: &Figure, output_path: P) -> Result<(), PlotError> {
    let path = output_path.as_ref();
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, figure.size).into_drawing_area();
        draw_figure(&root, figure)?;
        root.present().map_err(render_err)?;
    } else {
        let root = BitMapBackend::new(path, figure.size).into_drawing_area();
        draw_figure(&root, figure)?;
        root.present().map_err(render_err)?;
    }
    debug!(path = %path.display(), "figure written");
    Ok(())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(render_err)?;
    let areas = root.split_evenly((2, 1));
    draw_panel(&areas[0], &figure.value)?;
    draw_panel(&areas[1], &figure.residual)?;
    Ok(())
}

/// Split a series at non-finite values so gaps are not bridged.
fn finite_runs(points: &[(NaiveDateTime, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (ts, v) in points {
        if v.is_finite() {
            current.push((date_num(*ts), *v));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn panel_ylim(panel: &Panel) -> AxisRange<f64> {
    if let Some(range) = panel.ylim() {
        return range;
    }
    let values = panel
        .series()
        .flat_map(|(s, _)| s.points.iter().map(|(_, v)| *v));
    match finite_bounds(values) {
        Some((lo, hi)) if lo < hi => AxisRange { min: lo, max: hi },
        Some((lo, _)) => AxisRange {
            min: lo - 1.0,
            max: lo + 1.0,
        },
        None => AxisRange { min: 0.0, max: 1.0 },
    }
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
) -> Result<(), PlotError> {
    let x = panel
        .xlim()
        .ok_or_else(|| PlotError::Render("panel has nothing to place on the time axis".to_string()))?;
    let y = panel_ylim(panel);
    let (x0, x1) = (date_num(x.min), date_num(x.max));

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y.min..y.max)
        .map_err(render_err)?;

    let tick_formatter = |v: &f64| format_tick(*v);
    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh().x_label_formatter(&tick_formatter);
    if !panel.xlabel.is_empty() {
        mesh.x_desc(panel.xlabel.as_str());
    }
    if !panel.ylabel.is_empty() {
        mesh.y_desc(panel.ylabel.as_str());
    }
    mesh.draw().map_err(render_err)?;

    for artist in &panel.artists {
        match artist {
            Artist::Segment { x, y, style } => {
                chart
                    .draw_series(LineSeries::new(
                        vec![(date_num(x.min), *y), (date_num(x.max), *y)],
                        stroke(style),
                    ))
                    .map_err(render_err)?;
            }
            Artist::HLine { y: level, style } => {
                chart
                    .draw_series(LineSeries::new(vec![(x0, *level), (x1, *level)], stroke(style)))
                    .map_err(render_err)?;
            }
            Artist::VLine { x: at, style } => {
                let at = date_num(*at);
                chart
                    .draw_series(LineSeries::new(vec![(at, y.min), (at, y.max)], stroke(style)))
                    .map_err(render_err)?;
            }
            Artist::Text { x: at, y: level, text } => {
                chart
                    .draw_series(std::iter::once(Text::new(
                        text.clone(),
                        (date_num(*at), *level),
                        ("sans-serif", 14).into_font(),
                    )))
                    .map_err(render_err)?;
            }
            Artist::Series {
                series,
                label,
                style,
            } => {
                let legend_label = label.as_ref().filter(|_| panel.legend().is_some());
                for (i, run) in finite_runs(&series.points).into_iter().enumerate() {
                    let shape = stroke(style);
                    let anno = match style.dash {
                        Dash::Solid => chart
                            .draw_series(LineSeries::new(run, shape))
                            .map_err(render_err)?,
                        Dash::Dashed => chart
                            .draw_series(DashedLineSeries::new(run, 6, 4, shape))
                            .map_err(render_err)?,
                    };
                    if let (0, Some(text)) = (i, legend_label) {
                        let color = to_rgb(style);
                        anno.label(text.as_str()).legend(move |(lx, ly)| {
                            PathElement::new(vec![(lx, ly), (lx + 20, ly)], color.stroke_width(2))
                        });
                    }
                }
            }
        }
    }

    if panel.legend().is_some() {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
    }
    Ok(())
}
