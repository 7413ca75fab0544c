//! Forecast chart tool built on the `layout` crate.
//!
//! # Modules
//!
//! - `config` - TOML configuration of the chart, input data and output
//! - `io` - CSV loading into a date-indexed frame
//! - `chart` - Splitting the data and laying out the two panels
//! - `render` - Drawing a laid-out figure with plotters

pub mod chart;
pub mod config;
pub mod error;
pub mod io;
pub mod render;

pub use chart::{build_figure, split_frame};
pub use config::Config;
pub use error::{DataError, PlotError};
pub use io::{load_frame, parse_frame, parse_timestamp};
pub use render::render_figure;
