use thiserror::Error;

/// Error types for the layout crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Axis range whose lower bound is not below its upper bound
    #[error("Invalid axis range: min {min} must be below max {max}")]
    InvalidRange { min: String, max: String },

    /// Series or frame without a single row
    #[error("Empty series: {0}")]
    EmptySeries(String),

    /// Column requested from a frame that does not carry it
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Column whose length differs from the frame index
    #[error("Column '{name}' has {got} values, index has {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Dataset preset name that is not built in
    #[error("Unknown dataset preset: {0}")]
    UnknownPreset(String),
}

/// Type alias for Result with LayoutError
pub type Result<T> = std::result::Result<T, LayoutError>;
