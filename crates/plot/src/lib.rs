//! # kairos-plot
//!
//! A small figure/axes scene for time-series charts. Models fill [`Axes`]
//! with lines and shaded intervals; [`Figure::to_svg()`] renders the whole
//! figure through `plotters`.
//!
//! ```mermaid
//! graph LR
//!     A["Figure::subplots(n)"] --> B["axes_mut(i)"]
//!     B --> C[".plot_line(..)"]
//!     B --> D[".fill_between(..)?"]
//!     A -->|".to_svg()?"| E["SVG string"]
//!     A -->|".save(path)?"| F["SVG file"]
//! ```

mod error;
mod figure;
mod render;

pub use error::PlotError;
pub use figure::{Axes, Figure, LineStyle, Rgb};
