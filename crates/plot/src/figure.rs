//! Figure and axes scene types.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::PlotError;
use crate::render;

/// An opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Black, used for observed history.
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Blue used for forecasts and their intervals.
    pub const FORECAST: Rgb = Rgb(0x42, 0x67, 0xB2);
}

/// Stroke style for a line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub(crate) color: Rgb,
    pub(crate) width: u32,
    pub(crate) label: Option<String>,
}

impl LineStyle {
    /// A 1px line in `color` with no legend label.
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            width: 1,
            label: None,
        }
    }

    /// Sets the stroke width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Sets the legend label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Line {
    pub(crate) points: Vec<(NaiveDateTime, f64)>,
    pub(crate) style: LineStyle,
}

#[derive(Clone, Debug)]
pub(crate) struct Band {
    pub(crate) times: Vec<NaiveDateTime>,
    pub(crate) lower: Vec<f64>,
    pub(crate) upper: Vec<f64>,
    pub(crate) color: Rgb,
    pub(crate) opacity: f64,
}

/// A single chart panel with a time x-axis.
#[derive(Clone, Debug, Default)]
pub struct Axes {
    pub(crate) title: Option<String>,
    pub(crate) xlabel: String,
    pub(crate) ylabel: String,
    pub(crate) lines: Vec<Line>,
    pub(crate) bands: Vec<Band>,
}

impl Axes {
    /// Creates an empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line through `points`.
    pub fn plot_line(
        &mut self,
        points: impl IntoIterator<Item = (NaiveDateTime, f64)>,
        style: LineStyle,
    ) -> &mut Self {
        self.lines.push(Line {
            points: points.into_iter().collect(),
            style,
        });
        self
    }

    /// Shades the region between `lower` and `upper` over `times`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PlotError::LengthMismatch`] | `lower` or `upper` length differs from `times` |
    /// | [`PlotError::InvalidOpacity`] | `opacity` outside `[0, 1]` or NaN |
    pub fn fill_between(
        &mut self,
        times: &[NaiveDateTime],
        lower: &[f64],
        upper: &[f64],
        color: Rgb,
        opacity: f64,
    ) -> Result<&mut Self, PlotError> {
        for (what, got) in [("lower", lower.len()), ("upper", upper.len())] {
            if got != times.len() {
                return Err(PlotError::LengthMismatch {
                    what,
                    expected: times.len(),
                    got,
                });
            }
        }
        if !(0.0..=1.0).contains(&opacity) {
            return Err(PlotError::InvalidOpacity { opacity });
        }
        self.bands.push(Band {
            times: times.to_vec(),
            lower: lower.to_vec(),
            upper: upper.to_vec(),
            color,
            opacity,
        });
        Ok(self)
    }

    /// Sets the x-axis description.
    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.xlabel = label.into();
        self
    }

    /// Sets the y-axis description.
    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.ylabel = label.into();
        self
    }

    /// Sets the panel caption.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the x-axis description.
    pub fn xlabel(&self) -> &str {
        &self.xlabel
    }

    /// Returns the y-axis description.
    pub fn ylabel(&self) -> &str {
        &self.ylabel
    }

    /// Number of lines drawn on this panel.
    pub fn n_lines(&self) -> usize {
        self.lines.len()
    }

    /// Number of shaded bands drawn on this panel.
    pub fn n_bands(&self) -> usize {
        self.bands.len()
    }

    /// Returns `true` when nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.bands.is_empty()
    }

    /// Earliest and latest timestamp over all lines and bands.
    pub fn x_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let line_times = self.lines.iter().flat_map(|l| l.points.iter().map(|p| p.0));
        let band_times = self.bands.iter().flat_map(|b| b.times.iter().copied());
        line_times.chain(band_times).fold(None, |acc, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
    }

    /// Smallest and largest finite value over all lines and bands.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let line_vals = self.lines.iter().flat_map(|l| l.points.iter().map(|p| p.1));
        let band_vals = self
            .bands
            .iter()
            .flat_map(|b| b.lower.iter().chain(b.upper.iter()).copied());
        line_vals
            .chain(band_vals)
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// A stack of [`Axes`] panels sharing one canvas.
#[derive(Clone, Debug)]
pub struct Figure {
    pub(crate) axes: Vec<Axes>,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Figure {
    /// Default canvas width in pixels.
    pub const DEFAULT_WIDTH: u32 = 1000;
    /// Default height of one panel in pixels.
    pub const DEFAULT_PANEL_HEIGHT: u32 = 300;

    /// Creates a figure with `nrows` empty panels stacked vertically.
    pub fn subplots(nrows: usize) -> Self {
        let rows = u32::try_from(nrows.max(1)).unwrap_or(u32::MAX);
        Self {
            axes: (0..nrows).map(|_| Axes::new()).collect(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_PANEL_HEIGHT.saturating_mul(rows),
        }
    }

    /// Overrides the canvas size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Canvas size as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of panels.
    pub fn n_axes(&self) -> usize {
        self.axes.len()
    }

    /// All panels, top to bottom.
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    /// Mutable access to panel `i`.
    pub fn axes_mut(&mut self, i: usize) -> Option<&mut Axes> {
        self.axes.get_mut(i)
    }

    /// Renders the figure as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`PlotError::EmptyFigure`] for a figure without panels, or
    /// [`PlotError::Render`] if the backend fails.
    pub fn to_svg(&self) -> Result<String, PlotError> {
        render::render_svg(self)
    }

    /// Renders the figure and writes the SVG to `path`.
    ///
    /// # Errors
    ///
    /// Any error from [`Figure::to_svg()`], or [`PlotError::Io`] if the
    /// file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), PlotError> {
        let svg = self.to_svg()?;
        std::fs::write(path, svg).map_err(|e| PlotError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), n_axes = self.axes.len(), "figure saved");
        Ok(())
    }
}
