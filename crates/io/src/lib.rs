//! # kairos-io
//!
//! Load time-series tables from CSV or Parquet into
//! [`TimeSeriesData`](kairos_timeseries::TimeSeriesData), and write
//! forecast tables back out as Parquet.
//!
//! ```mermaid
//! graph LR
//!     A["data.csv"] -->|"read_csv(path, &CsvConfig)?"| C["TimeSeriesData"]
//!     B["data.parquet"] -->|"read_parquet(path, &ParquetConfig)?"| C
//!     C -->|"write_timeseries_parquet"| B
//!     D["&[ForecastFrame]"] -->|"write_forecast_parquet(path, frames, &WriterConfig)?"| E["forecast.parquet"]
//! ```
//!
//! ## Forecast Output Schema
//!
//! | Column | Arrow type | Nullable |
//! |--------|-----------|----------|
//! | `series` | `Utf8` | no |
//! | `time` | `Timestamp(Microsecond)` | no |
//! | `fcst` | `Float64` | no |
//! | `fcst_lower` | `Float64` | yes (null on history rows) |
//! | `fcst_upper` | `Float64` | yes (null on history rows) |

mod error;
mod parquet_read;
mod parquet_write;
mod reader;
mod time;
mod writer;

pub use error::IoError;
pub use reader::{CsvConfig, ParquetConfig, read_csv, read_parquet};
pub use writer::{Compression, WriterConfig, write_forecast_parquet, write_timeseries_parquet};
