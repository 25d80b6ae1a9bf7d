//! Data types produced by the aggregation and forecasting pipeline.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Average AQI for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyAqi {
    pub date: NaiveDate,
    /// Mean of the day's per-reading AQI, truncated.
    pub aqi: u16,
    /// Number of readings that fell on this date.
    pub readings: usize,
}

/// Daily AQI values ordered by strictly increasing date.
///
/// Days without readings are absent rather than interpolated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DailySeries {
    days: Vec<DailyAqi>,
}

impl DailySeries {
    /// Builds a series from entries already sorted by unique ascending date.
    pub(crate) fn from_sorted(days: Vec<DailyAqi>) -> Self {
        debug_assert!(days.windows(2).all(|w| w[0].date < w[1].date));
        DailySeries { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyAqi> {
        self.days.iter()
    }

    pub fn as_slice(&self) -> &[DailyAqi] {
        &self.days
    }

    /// AQI values oldest to newest, ready for [`crate::analyzers::forecast::forecast_next`].
    pub fn values(&self) -> Vec<u16> {
        self.days.iter().map(|d| d.aqi).collect()
    }

    /// The most recent `n` days. `n == 0` keeps the whole series.
    pub fn tail(&self, n: usize) -> DailySeries {
        if n == 0 || n >= self.days.len() {
            return self.clone();
        }
        DailySeries {
            days: self.days[self.days.len() - n..].to_vec(),
        }
    }
}

impl<'a> IntoIterator for &'a DailySeries {
    type Item = &'a DailyAqi;
    type IntoIter = std::slice::Iter<'a, DailyAqi>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Direction of the fitted trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Stable,
    Decreasing,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Rising => write!(f, "rising"),
            Trend::Stable => write!(f, "stable"),
            Trend::Decreasing => write!(f, "decreasing"),
        }
    }
}

/// How the forecast line was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMethod {
    LeastSquares,
    /// The fit was degenerate; the prediction is the series mean.
    MeanFallback,
}

/// Next-step prediction from a short AQI series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    /// Predicted next value, clamped to `[0, 500]`.
    pub predicted: f64,
    pub slope: f64,
    pub intercept: f64,
    pub points_used: usize,
    pub method: FitMethod,
    pub trend: Trend,
}

impl Forecast {
    /// Predicted value rounded for display.
    pub fn predicted_aqi(&self) -> u16 {
        self.predicted.round() as u16
    }
}
