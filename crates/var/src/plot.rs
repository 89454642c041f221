//! Figure construction for VAR forecasts.

use kairos_plot::{Figure, LineStyle, Rgb};
use kairos_timeseries::TimeSeriesData;

use crate::error::VarError;
use crate::forecast::VarForecast;

/// Opacity of the prediction-interval band.
pub(crate) const BAND_OPACITY: f64 = 0.2;

/// One panel per series: observed history in black, forecast and interval
/// band in blue.
pub(crate) fn forecast_figure(
    data: &TimeSeriesData,
    forecast: &VarForecast,
) -> Result<Figure, VarError> {
    let mut fig = Figure::subplots(forecast.len());

    for (i, frame) in forecast.frames().iter().enumerate() {
        let Some(ax) = fig.axes_mut(i) else {
            continue;
        };
        let observed = data.values().column(i);
        ax.plot_line(
            data.time().iter().copied().zip(observed.iter().copied()),
            LineStyle::new(Rgb::BLACK).with_label("observed"),
        );

        let future = frame.future();
        let times: Vec<_> = future.iter().map(|r| r.time).collect();
        let lower: Vec<f64> = future
            .iter()
            .map(|r| r.fcst_lower.unwrap_or(f64::NAN))
            .collect();
        let upper: Vec<f64> = future
            .iter()
            .map(|r| r.fcst_upper.unwrap_or(f64::NAN))
            .collect();

        ax.plot_line(
            future.iter().map(|r| (r.time, r.fcst)),
            LineStyle::new(Rgb::FORECAST)
                .with_width(2)
                .with_label("forecast"),
        );
        ax.fill_between(&times, &lower, &upper, Rgb::FORECAST, BAND_OPACITY)?
            .set_xlabel("time")
            .set_ylabel(frame.name());
    }

    Ok(fig)
}
