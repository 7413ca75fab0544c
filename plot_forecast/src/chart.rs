//! From a loaded frame to a laid-out figure.

use layout::{ChartLayoutFormatter, Figure, Frame, PlotSurface, TRAIN_STYLE, VALIDATION_STYLE};
use tracing::{info, warn};

use crate::config::{Config, DataConfig};
use crate::error::PlotError;

/// Split the frame into training and validation slices.
///
/// A configured validation start date wins over the trailing row count.
pub fn split_frame(frame: &Frame, data: &DataConfig) -> Result<(Frame, Frame), PlotError> {
    let (train, valid) = match data.validation_start {
        Some(start) => {
            let start = start
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| PlotError::Config(format!("invalid validation start {}", start)))?;
            frame.split_at(start)
        }
        None => frame.split_last(data.n_valid),
    };

    if train.is_empty() || valid.is_empty() {
        return Err(PlotError::Config(format!(
            "split leaves {} training and {} validation rows",
            train.len(),
            valid.len()
        )));
    }
    Ok((train, valid))
}

/// Lay out both panels for `frame` according to `config`.
pub fn build_figure(config: &Config, frame: &Frame) -> Result<Figure, PlotError> {
    let profile = config.profile()?;
    let (train, valid) = split_frame(frame, &config.data)?;
    info!(
        profile = %profile.name,
        train_rows = train.len(),
        valid_rows = valid.len(),
        "laying out figure"
    );

    let mut figure = Figure::new((config.chart.width, config.chart.height));
    let formatter = ChartLayoutFormatter::new(profile);
    formatter.layout_figure(&mut figure.value, &mut figure.residual, &train, &valid)?;

    if let Some(column) = config.data.residual_column.as_deref() {
        if !frame.has_column(column) {
            let available: Vec<&str> = frame.column_names().collect();
            warn!(column, ?available, "residual column not in data, bottom panel left empty");
        } else {
            figure
                .residual
                .plot_series(&train.column(column)?, None, TRAIN_STYLE);
            figure
                .residual
                .plot_series(&valid.column(column)?, None, VALIDATION_STYLE);
        }
    }
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use layout::Artist;

    fn month(y: i32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn ridership_frame() -> Frame {
        let index: Vec<NaiveDateTime> = (0..48)
            .map(|i| month(2000 + i / 12, (i % 12) as u32 + 1))
            .collect();
        let values = (0..48).map(|i| 1600.0 + i as f64 * 10.0).collect();
        let residuals = (0..48).map(|i| (i as f64 - 24.0) * 5.0).collect();
        Frame::new(index)
            .with_column("Ridership", values)
            .unwrap()
            .with_column("Residual", residuals)
            .unwrap()
    }

    #[test]
    fn test_split_by_count_and_date() {
        let frame = ridership_frame();
        let mut config = Config::for_preset("ridership", "unused.csv");

        let (train, valid) = split_frame(&frame, &config.data).unwrap();
        assert_eq!((train.len(), valid.len()), (12, 36));

        config.data.validation_start = NaiveDate::from_ymd_opt(2003, 1, 1);
        let (train, valid) = split_frame(&frame, &config.data).unwrap();
        assert_eq!((train.len(), valid.len()), (36, 12));

        config.data.validation_start = NaiveDate::from_ymd_opt(1999, 1, 1);
        assert!(matches!(split_frame(&frame, &config.data), Err(PlotError::Config(_))));
    }

    #[test]
    fn test_build_figure_with_residuals() {
        let frame = ridership_frame();
        let mut config = Config::for_preset("ridership", "unused.csv");
        config.data.residual_column = Some("Residual".to_string());

        let figure = build_figure(&config, &frame).unwrap();
        assert_eq!(figure.size, (900, 750));
        assert_eq!(figure.value.series().count(), 2);
        assert_eq!(figure.residual.series().count(), 2);
        assert!(figure.residual.legend.is_none());
        assert!(figure
            .residual
            .artists
            .iter()
            .any(|a| matches!(a, Artist::HLine { y, .. } if *y == 0.0)));
    }

    #[test]
    fn test_unknown_residual_column_is_skipped() {
        let frame = ridership_frame();
        let mut config = Config::for_preset("ridership", "unused.csv");
        config.data.residual_column = Some("Errors".to_string());
        let figure = build_figure(&config, &frame).unwrap();
        assert_eq!(figure.residual.series().count(), 0);
    }

    #[test]
    fn test_wrong_preset_for_data() {
        let frame = ridership_frame();
        let config = Config::for_preset("wine", "unused.csv");
        assert!(matches!(
            build_figure(&config, &frame),
            Err(PlotError::Layout(layout::LayoutError::MissingColumn(_)))
        ));
    }
}
