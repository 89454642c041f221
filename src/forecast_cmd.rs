//! Forecast command: fit, predict, and write or print the result.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use kairos_io::write_forecast_parquet;
use kairos_var::VarModel;

use crate::cli::ForecastArgs;
use crate::config::KairosConfig;
use crate::convert;
use crate::input;

/// Run the fit-and-forecast pipeline.
pub fn run(args: ForecastArgs) -> Result<()> {
    let _cmd = info_span!("forecast").entered();

    // 1. Load project TOML and apply CLI overrides
    let mut config = KairosConfig::load(&args.config)?;
    if let Some(steps) = args.steps {
        config.forecast.steps = steps;
    }
    if args.include_history {
        config.forecast.include_history = true;
    }
    let output = args.output.or_else(|| config.io.output.clone());
    let plot = args.plot.or_else(|| config.io.plot.clone());

    // 2. Build library configs
    let params = convert::build_var_params(&config.var)?;
    let predict_cfg = convert::build_predict_config(&config.forecast)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;

    // 3. Read observed data
    let path = input::resolve_input(args.input, &config.io)?;
    let data = input::load_series(&path, &config.io)?;

    // 4. Fit and forecast
    let mut model = VarModel::new(&data, params);
    model.fit().context("VAR fit failed")?;
    model.predict_with(&predict_cfg).context("forecast failed")?;
    let forecast = model.forecast().context("no forecast stored")?;
    info!(
        model = %model,
        steps = forecast.steps(),
        series = forecast.len(),
        "forecast complete"
    );

    // 5. Write Parquet or print JSON
    match output {
        Some(ref out) => {
            write_forecast_parquet(out, forecast.frames(), &writer_cfg)
                .with_context(|| format!("failed to write forecast: {}", out.display()))?;
            info!(path = %out.display(), "forecast written");
        }
        None => {
            let json = serde_json::to_string_pretty(forecast.frames())
                .context("failed to serialise forecast")?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write to stdout")?;
        }
    }

    // 6. Plot; a history forecast cannot be drawn, so redo the horizon alone
    if let Some(ref svg) = plot {
        if predict_cfg.include_history() {
            info!("re-running forecast without history for plotting");
            model
                .predict_with(&predict_cfg.with_include_history(false))
                .context("forecast failed")?;
        }
        let figure = model.plot(None).context("failed to build forecast plot")?;
        figure
            .save(svg)
            .with_context(|| format!("failed to write plot: {}", svg.display()))?;
        info!(path = %svg.display(), panels = figure.n_axes(), "plot written");
    }

    Ok(())
}
