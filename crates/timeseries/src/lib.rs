//! # kairos-timeseries
//!
//! Time-indexed container for one or more numeric series, plus the
//! frequency and forecast-table types shared by every kairos model.
//!
//! ## Data Flow
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeriesData::new(time, columns)?"] --> B[".infer_freq()"]
//!     B --> C["Frequency::future_times(last, steps)"]
//!     A -->|"&borrowed by models"| D["ForecastFrame per series"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use kairos_timeseries::TimeSeriesData;
//!
//! let t0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let time: Vec<_> = (0..3).map(|i| t0 + chrono::TimeDelta::days(i)).collect();
//! let data = TimeSeriesData::new(
//!     time,
//!     vec![("a".into(), vec![1.0, 2.0, 3.0]), ("b".into(), vec![0.5, 0.4, 0.3])],
//! )
//! .unwrap();
//! assert_eq!(data.len(), 3);
//! assert_eq!(data.n_series(), 2);
//! ```

mod data;
mod error;
mod forecast;
mod freq;

pub use data::TimeSeriesData;
pub use error::TimeSeriesError;
pub use forecast::{ForecastFrame, ForecastRow};
pub use freq::Frequency;
