//! I/O utilities for loading time-series data.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use layout::Frame;
use tracing::debug;

use crate::error::{DataError, PlotError};

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y%m%d"];

/// Parse a timestamp in one of the accepted layouts.
///
/// Month-only values (`2001-04`, `Apr-01`) resolve to the first of the month.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("01-{}", value), "%d-%b-%y") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

/// Load a comma-separated file into a frame.
///
/// Expected format: a header line naming the columns, then one row per
/// timestamp. `date_column` selects the index column by name; the first column
/// is used when it is `None`. Every other column is read as numbers, with
/// empty or unparsable cells becoming NaN.
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `date_column` - Header name of the timestamp column
///
/// # Returns
/// Frame indexed by strictly increasing timestamps
pub fn load_frame<P: AsRef<Path>>(path: P, date_column: Option<&str>) -> Result<Frame, PlotError> {
    let file = File::open(path.as_ref()).map_err(|source| DataError::Open {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    let frame = parse_frame(file, date_column)?;
    debug!(
        path = %path.as_ref().display(),
        rows = frame.len(),
        "loaded data file"
    );
    Ok(frame)
}

/// Parse CSV text from any reader.
pub fn parse_frame<R: Read>(reader: R, date_column: Option<&str>) -> Result<Frame, PlotError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let names: Vec<String> = reader
        .headers()
        .map_err(DataError::Csv)?
        .iter()
        .map(str::to_string)
        .collect();
    if names.iter().all(|n| n.is_empty()) {
        return Err(DataError::MissingHeader.into());
    }

    let date_idx = match date_column {
        Some(wanted) => names
            .iter()
            .position(|n| n == wanted)
            .ok_or_else(|| DataError::UnknownDateColumn(wanted.to_string()))?,
        None => 0,
    };

    let mut index: Vec<NaiveDateTime> = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

    for record in reader.records() {
        let record = record.map_err(DataError::Csv)?;

        // Skip whitespace-only lines
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line() as usize);

        let raw_date = record.get(date_idx).unwrap_or("");
        let ts = parse_timestamp(raw_date).ok_or_else(|| DataError::BadDate {
            line,
            value: raw_date.to_string(),
        })?;
        if index.last().is_some_and(|prev| ts <= *prev) {
            return Err(DataError::NotIncreasing { line }.into());
        }
        index.push(ts);

        for (col, values) in columns.iter_mut().enumerate() {
            if col == date_idx {
                continue;
            }
            let value = record
                .get(col)
                .and_then(|f| f.parse::<f64>().ok())
                .unwrap_or(f64::NAN);
            values.push(value);
        }
    }

    if index.is_empty() {
        return Err(DataError::NoRows.into());
    }

    let mut frame = Frame::new(index);
    for (col, (name, values)) in names.into_iter().zip(columns).enumerate() {
        if col != date_idx {
            frame = frame.with_column(name, values)?;
        }
    }
    Ok(frame)
}
