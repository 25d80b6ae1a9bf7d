//! Daily aggregation and trend forecasting.
//!
//! This module groups timestamped readings into a per-day AQI series and
//! extrapolates the next value from that series with a least-squares line.

pub mod aggregate;
pub mod forecast;
pub mod types;
pub mod utility;
