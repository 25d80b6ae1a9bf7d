//! Linear-trend forecasting over a short AQI history.

use crate::analyzers::types::{FitMethod, Forecast, Trend};
use crate::analyzers::utility::mean;
use tracing::{debug, warn};

/// Slopes beyond ±2 AQI per step count as a trend.
const TREND_THRESHOLD: f64 = 2.0;

const MAX_AQI: f64 = 500.0;

/// Below this the least-squares denominator is treated as zero.
const DEGENERATE_EPSILON: f64 = 1e-8;

/// Predicts the value one step past the end of `series` (oldest first).
///
/// Fits an ordinary least-squares line through `(i, series[i])` and
/// extrapolates to `i = n`, clamping to `[0, 500]`. A degenerate fit falls
/// back to the series mean with zero slope and intercept.
///
/// Returns `None` with fewer than two points.
#[tracing::instrument(skip(series), fields(points = series.len()))]
pub fn forecast_next(series: &[u16]) -> Option<Forecast> {
    let n = series.len();
    if n < 2 {
        debug!("Not enough history to forecast");
        return None;
    }

    let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let ys: Vec<f64> = series.iter().map(|&v| v as f64).collect();

    let forecast = match least_squares(&xs, &ys) {
        Some((slope, intercept)) => Forecast {
            predicted: clamp_aqi(intercept + slope * n as f64),
            slope,
            intercept,
            points_used: n,
            method: FitMethod::LeastSquares,
            trend: classify_trend(slope),
        },
        None => mean_fallback(&ys),
    };

    debug!(
        predicted = forecast.predicted,
        slope = forecast.slope,
        trend = %forecast.trend,
        "Forecast computed"
    );

    Some(forecast)
}

/// Maps a fitted slope onto a [`Trend`].
pub fn classify_trend(slope: f64) -> Trend {
    if slope > TREND_THRESHOLD {
        Trend::Rising
    } else if slope < -TREND_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Returns `(slope, intercept)`, or `None` when `n·Σx² − (Σx)²` is ~0.
fn least_squares(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    let n = xs.len() as f64;

    let (mut sum_x, mut sum_y, mut sum_xx, mut sum_xy) = (0.0, 0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_xy += x * y;
    }

    let denom = n * sum_xx - sum_x * sum_x;
    if denom.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Some((slope, intercept))
}

fn mean_fallback(ys: &[f64]) -> Forecast {
    warn!(points = ys.len(), "Degenerate fit, predicting series mean");
    Forecast {
        predicted: clamp_aqi(mean(ys)),
        slope: 0.0,
        intercept: 0.0,
        points_used: ys.len(),
        method: FitMethod::MeanFallback,
        trend: Trend::Stable,
    }
}

fn clamp_aqi(value: f64) -> f64 {
    value.clamp(0.0, MAX_AQI)
}
