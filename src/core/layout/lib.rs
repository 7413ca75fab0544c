//! Two-panel layout for forecast charts.
//!
//! The top panel shows the actual series with the training/validation split
//! annotated, the bottom panel holds forecast errors around zero. Everything is
//! drawn against the [`PlotSurface`] capability, so the layout can be computed
//! and inspected without a rendering backend.

mod axis;
mod error;
mod formatter;
mod profile;
mod series;
mod surface;

pub use axis::*;
pub use error::*;
pub use formatter::*;
pub use profile::*;
pub use series::*;
pub use surface::*;
