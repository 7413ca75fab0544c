//! Time-indexed data handed to the formatter.

use chrono::NaiveDateTime;

use crate::axis::AxisRange;
use crate::error::{LayoutError, Result};

/// One named numeric column paired with its timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndexedSeries {
    pub name: String,
    pub points: Vec<(NaiveDateTime, f64)>,
}

impl TimeIndexedSeries {
    pub fn new(name: impl Into<String>, points: Vec<(NaiveDateTime, f64)>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<(NaiveDateTime, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(NaiveDateTime, f64)> {
        self.points.last().copied()
    }

    pub fn min_timestamp(&self) -> Option<NaiveDateTime> {
        self.points.iter().map(|(t, _)| *t).min()
    }

    pub fn max_timestamp(&self) -> Option<NaiveDateTime> {
        self.points.iter().map(|(t, _)| *t).max()
    }

    /// (min, max) over the finite values, `None` when there are none.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        finite_bounds(self.points.iter().map(|(_, v)| *v))
    }
}

/// Date index plus named numeric columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    index: Vec<NaiveDateTime>,
    columns: Vec<(String, Vec<f64>)>,
}

impl Frame {
    pub fn new(index: Vec<NaiveDateTime>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Add or replace a column.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(LayoutError::ColumnLength {
                name,
                expected: self.index.len(),
                got: values.len(),
            });
        }
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((name, values)),
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    pub fn values(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| LayoutError::MissingColumn(name.to_string()))
    }

    /// The column `name` as a series over this frame's index.
    pub fn column(&self, name: &str) -> Result<TimeIndexedSeries> {
        let values = self.values(name)?;
        let points = self.index.iter().copied().zip(values.iter().copied()).collect();
        Ok(TimeIndexedSeries::new(name, points))
    }

    /// Earliest and latest timestamp of the index.
    ///
    /// Uses min/max rather than first/last so an unsorted index still yields
    /// its true extent.
    pub fn index_bounds(&self) -> Result<AxisRange<NaiveDateTime>> {
        let min = self.index.iter().min();
        let max = self.index.iter().max();
        match (min, max) {
            (Some(&min), Some(&max)) => AxisRange::degenerate_ok(min, max),
            _ => Err(LayoutError::EmptySeries("frame has no rows".to_string())),
        }
    }

    /// Rows strictly before `start` form the training slice, the rest validation.
    pub fn split_at(&self, start: NaiveDateTime) -> (Frame, Frame) {
        let mut train = self.empty_like();
        let mut valid = self.empty_like();
        for (row, ts) in self.index.iter().enumerate() {
            let target = if *ts < start { &mut train } else { &mut valid };
            target.push_row(self, row);
        }
        (train, valid)
    }

    /// The last `n_valid` rows become the validation slice.
    pub fn split_last(&self, n_valid: usize) -> (Frame, Frame) {
        let n_train = self.len().saturating_sub(n_valid);
        let mut train = self.empty_like();
        let mut valid = self.empty_like();
        for row in 0..self.len() {
            let target = if row < n_train { &mut train } else { &mut valid };
            target.push_row(self, row);
        }
        (train, valid)
    }

    fn empty_like(&self) -> Frame {
        Frame {
            index: Vec::new(),
            columns: self
                .columns
                .iter()
                .map(|(n, _)| (n.clone(), Vec::new()))
                .collect(),
        }
    }

    fn push_row(&mut self, source: &Frame, row: usize) {
        self.index.push(source.index[row]);
        for ((_, dst), (_, src)) in self.columns.iter_mut().zip(source.columns.iter()) {
            dst.push(src[row]);
        }
    }
}

/// (min, max) over the finite values of an iterator.
pub fn finite_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
