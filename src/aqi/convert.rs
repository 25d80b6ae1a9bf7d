//! Concentration-to-index conversion and the multi-pollutant reduction.

use crate::aqi::breakpoints::{Band, table_for};
use crate::reading::{Pollutant, PollutantReading};
use serde::Serialize;

/// AQI contribution of a single pollutant, in `[0, 500]`.
pub type SubIndex = u16;

/// Converts one pollutant's concentration (µg/m³) into its sub-index.
///
/// Negative and NaN concentrations yield 0. Within a band the index is
/// linearly interpolated and truncated toward zero:
///
/// `index = index_low + (value - conc_low) / (conc_high - conc_low) * (index_high - index_low)`
///
/// A value falling in the small gap between two bands (for example PM2.5 of
/// 12.05) is resolved against the upper band and truncates to the lower
/// band's top index. Anything past the last band returns the ceiling.
///
/// # Examples
///
/// ```
/// use aqi_forecaster::aqi::pollutant_to_sub_index;
/// use aqi_forecaster::reading::Pollutant;
///
/// assert_eq!(pollutant_to_sub_index(Pollutant::Pm25, 12.0), 50);
/// assert_eq!(pollutant_to_sub_index(Pollutant::Pm25, 12.1), 51);
/// assert_eq!(pollutant_to_sub_index(Pollutant::O3, 10_000.0), 300);
/// ```
pub fn pollutant_to_sub_index(pollutant: Pollutant, concentration: f64) -> SubIndex {
    if concentration.is_nan() || concentration < 0.0 {
        return 0;
    }

    let table = table_for(pollutant);
    let value = table.to_table_units(concentration);

    match table.bands.iter().find(|b| value <= b.conc_high) {
        Some(band) => interpolate(band, value).min(table.ceiling),
        None => table.ceiling,
    }
}

fn interpolate(band: &Band, value: f64) -> SubIndex {
    let span = band.conc_high - band.conc_low;
    let index = band.index_low as f64
        + (value - band.conc_low) / span * (band.index_high - band.index_low) as f64;

    // `as` truncates toward zero and saturates at the type bounds.
    index as SubIndex
}

/// Reduces six sub-indices to the overall AQI: the dominant pollutant sets
/// the index, so this is their maximum. Six zeros give 0.
pub fn overall_aqi(sub_indices: [SubIndex; 6]) -> u16 {
    sub_indices.into_iter().max().unwrap_or(0)
}

/// Every sub-index for one reading along with the reduced result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiBreakdown {
    /// Sub-indices in [`Pollutant::ALL`] order.
    pub sub_indices: [SubIndex; 6],
    pub overall: u16,
    /// `None` when every sub-index is 0.
    pub dominant: Option<Pollutant>,
}

impl AqiBreakdown {
    /// Computes the sub-index of every pollutant in `reading`.
    pub fn from_reading(reading: &PollutantReading) -> Self {
        let sub_indices = Pollutant::ALL
            .map(|p| pollutant_to_sub_index(p, reading.concentration(p)));
        let overall = overall_aqi(sub_indices);

        let dominant = if overall == 0 {
            None
        } else {
            Pollutant::ALL
                .into_iter()
                .zip(sub_indices)
                .find(|&(_, idx)| idx == overall)
                .map(|(p, _)| p)
        };

        AqiBreakdown {
            sub_indices,
            overall,
            dominant,
        }
    }

    pub fn sub_index(&self, pollutant: Pollutant) -> SubIndex {
        let pos = Pollutant::ALL
            .iter()
            .position(|&p| p == pollutant)
            .unwrap_or(0);
        self.sub_indices[pos]
    }
}

/// Overall AQI of a reading.
pub fn reading_aqi(reading: &PollutantReading) -> u16 {
    AqiBreakdown::from_reading(reading).overall
}

/// Overall AQI of a reading when it carries a usable index.
///
/// Returns `None` when the result is 0, which callers display as "N/A"
/// rather than as a clean-air reading.
pub fn usable_aqi(reading: &PollutantReading) -> Option<u16> {
    match reading_aqi(reading) {
        0 => None,
        aqi => Some(aqi),
    }
}
