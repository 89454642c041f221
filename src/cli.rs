use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kairos multivariate VAR forecasting.
#[derive(Parser)]
#[command(
    name = "kairos",
    version,
    about = "Vector autoregression forecasting for multivariate time series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fit a VAR model and forecast every series.
    Forecast(ForecastArgs),
    /// Print the information-criterion table for candidate lag orders.
    SelectOrder(SelectOrderArgs),
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "kairos.toml")]
    pub config: PathBuf,

    /// Override input CSV or Parquet path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override forecast horizon from config.
    #[arg(short, long)]
    pub steps: Option<usize>,

    /// Prepend in-sample predictions to the output.
    #[arg(long)]
    pub include_history: bool,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override SVG plot path from config.
    #[arg(short, long)]
    pub plot: Option<PathBuf>,
}

/// Arguments for the `select-order` subcommand.
#[derive(clap::Args)]
pub struct SelectOrderArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "kairos.toml")]
    pub config: PathBuf,

    /// Override input CSV or Parquet path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override the largest lag order considered.
    #[arg(short, long)]
    pub maxlags: Option<usize>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_forecast_overrides() {
        let cli = Cli::parse_from([
            "kairos",
            "-vv",
            "forecast",
            "--config",
            "run.toml",
            "--steps",
            "12",
            "--include-history",
            "--plot",
            "out.svg",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Forecast(args) => {
                assert_eq!(args.config, PathBuf::from("run.toml"));
                assert_eq!(args.steps, Some(12));
                assert!(args.include_history);
                assert_eq!(args.plot, Some(PathBuf::from("out.svg")));
                assert!(args.output.is_none());
            }
            Command::SelectOrder(_) => panic!("expected forecast"),
        }
    }

    #[test]
    fn parses_select_order() {
        let cli = Cli::parse_from(["kairos", "select-order", "--maxlags", "6"]);
        match cli.command {
            Command::SelectOrder(args) => {
                assert_eq!(args.maxlags, Some(6));
                assert_eq!(args.config, PathBuf::from("kairos.toml"));
            }
            Command::Forecast(_) => panic!("expected select-order"),
        }
    }
}
