//! Integration tests: render figures to SVG strings and files.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use kairos_plot::{Figure, LineStyle, PlotError, Rgb};

fn t(day: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 5, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + TimeDelta::days(day)
}

fn two_panel_figure() -> Figure {
    let mut fig = Figure::subplots(2);
    for (i, name) in ["alpha", "beta"].iter().enumerate() {
        let ax = fig.axes_mut(i).unwrap();
        let history: Vec<_> = (0..20).map(|d| (t(d), (d as f64 * 0.3).sin())).collect();
        let times: Vec<_> = (20..25).map(t).collect();
        let fcst: Vec<f64> = (0..5).map(|h| 0.1 * h as f64).collect();
        let lower: Vec<f64> = fcst.iter().map(|v| v - 0.5).collect();
        let upper: Vec<f64> = fcst.iter().map(|v| v + 0.5).collect();

        ax.plot_line(history, LineStyle::new(Rgb::BLACK).with_label("history"))
            .plot_line(
                times.iter().copied().zip(fcst.iter().copied()),
                LineStyle::new(Rgb::FORECAST).with_width(2),
            );
        ax.fill_between(&times, &lower, &upper, Rgb::FORECAST, 0.2)
            .unwrap()
            .set_xlabel("time")
            .set_ylabel(*name);
    }
    fig
}

#[test]
fn svg_contains_lines_and_band() {
    let svg = two_panel_figure().to_svg().unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("polyline"));
    assert!(svg.contains("polygon"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn empty_panels_still_render() {
    let svg = Figure::subplots(2).to_svg().unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn save_writes_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("chart.svg");
    two_panel_figure().save(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<svg"));
}

#[test]
fn save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("missing").join("chart.svg");
    let err = two_panel_figure().save(&path).unwrap_err();
    assert!(matches!(err, PlotError::Io { .. }), "got {err:?}");
}
