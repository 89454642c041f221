//! SVG rendering of a [`Figure`] through `plotters`.
//!
//! Time is mapped to Unix seconds on an `f64` axis; tick labels are formatted
//! back into dates.

use chrono::{DateTime, NaiveDateTime};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::PlotError;
use crate::figure::{Axes, Figure, Rgb};

const HALF_DAY: f64 = 43_200.0;

pub(crate) fn render_svg(fig: &Figure) -> Result<String, PlotError> {
    if fig.axes.is_empty() {
        return Err(PlotError::EmptyFigure);
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (fig.width, fig.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let panels = root.split_evenly((fig.axes.len(), 1));
        for (axes, area) in fig.axes.iter().zip(panels.iter()) {
            draw_axes(axes, area)?;
        }
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

fn draw_axes<DB: DrawingBackend>(
    axes: &Axes,
    area: &DrawingArea<DB, Shift>,
) -> Result<(), PlotError> {
    let (Some((t0, t1)), Some((lo, hi))) = (axes.x_range(), axes.y_range()) else {
        return Ok(());
    };
    let (x0, x1) = pad_x(to_secs(t0), to_secs(t1));
    let (y0, y1) = pad_y(lo, hi);
    let span = x1 - x0;

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(55);
    if let Some(title) = &axes.title {
        builder.caption(title, ("sans-serif", 16));
    }
    let mut chart = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_err)?;

    let time_label = |x: &f64| format_time(*x, span);
    chart
        .configure_mesh()
        .x_desc(axes.xlabel.as_str())
        .y_desc(axes.ylabel.as_str())
        .x_labels(6)
        .x_label_formatter(&time_label)
        .draw()
        .map_err(render_err)?;

    // Intervals go underneath the lines.
    for band in &axes.bands {
        let upper = band
            .times
            .iter()
            .zip(&band.upper)
            .filter(|(_, v)| v.is_finite())
            .map(|(t, v)| (to_secs(*t), *v));
        let lower = band
            .times
            .iter()
            .zip(&band.lower)
            .rev()
            .filter(|(_, v)| v.is_finite())
            .map(|(t, v)| (to_secs(*t), *v));
        let outline: Vec<(f64, f64)> = upper.chain(lower).collect();
        if outline.len() < 3 {
            continue;
        }
        let fill = to_color(band.color).mix(band.opacity).filled();
        chart
            .draw_series(std::iter::once(Polygon::new(outline, fill)))
            .map_err(render_err)?;
    }

    let mut labelled = false;
    for line in &axes.lines {
        let stroke = to_color(line.style.color).stroke_width(line.style.width);
        let points: Vec<(f64, f64)> = line
            .points
            .iter()
            .filter(|(_, v)| v.is_finite())
            .map(|(t, v)| (to_secs(*t), *v))
            .collect();
        let series = chart
            .draw_series(LineSeries::new(points, stroke))
            .map_err(render_err)?;
        if let Some(label) = &line.style.label {
            series
                .label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
            labelled = true;
        }
    }

    if labelled {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;
    }
    Ok(())
}

fn render_err(e: impl std::fmt::Display) -> PlotError {
    PlotError::Render {
        reason: e.to_string(),
    }
}

fn to_color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn to_secs(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp() as f64
}

fn format_time(secs: f64, span: f64) -> String {
    let pattern = if span < 4.0 * HALF_DAY {
        "%m-%d %H:%M"
    } else {
        "%Y-%m-%d"
    };
    DateTime::from_timestamp(secs.round() as i64, 0)
        .map(|d| d.naive_utc().format(pattern).to_string())
        .unwrap_or_default()
}

fn pad_x(x0: f64, x1: f64) -> (f64, f64) {
    if x1 - x0 < 1.0 {
        (x0 - HALF_DAY, x1 + HALF_DAY)
    } else {
        (x0, x1)
    }
}

fn pad_y(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < f64::EPSILON * lo.abs().max(1.0) {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo - 0.05 * span, hi + 0.05 * span)
    }
}
