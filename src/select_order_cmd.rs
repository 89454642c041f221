//! Select-order command: report information criteria per lag order.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use kairos_var::{InfoCriterion, select_order};

use crate::cli::SelectOrderArgs;
use crate::config::KairosConfig;
use crate::convert;
use crate::input;

/// Print the lag-order criteria table for the configured input.
pub fn run(args: SelectOrderArgs) -> Result<()> {
    let _cmd = info_span!("select_order").entered();
    let config = KairosConfig::load(&args.config)?;

    let path = input::resolve_input(args.input, &config.io)?;
    let data = input::load_series(&path, &config.io)?;

    let params = convert::build_var_params(&config.var)?;
    let maxlags = args.maxlags.or(params.maxlags());

    let selection =
        select_order(&data, maxlags, params.trend()).context("lag order selection failed")?;

    for ic in InfoCriterion::ALL {
        info!(ic = %ic, lag = selection.selected(ic), "selected lag order");
    }
    println!(
        "VAR order selection (nobs = {}, maxlags = {}, trend = {})",
        selection.nobs(),
        selection.maxlags(),
        params.trend()
    );
    print!("{selection}");
    Ok(())
}
