//! Pollutant identifiers and timestamped concentration readings.

use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six pollutants that contribute to the overall AQI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pollutant {
    Pm25,
    Pm10,
    No2,
    O3,
    So2,
    Co,
}

impl Pollutant {
    /// All pollutants in breakdown order. Ties for the dominant pollutant
    /// resolve to the earliest entry.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::So2,
        Pollutant::Co,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO2",
            Pollutant::O3 => "O3",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pollutant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '.' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "pm25" => Ok(Pollutant::Pm25),
            "pm10" => Ok(Pollutant::Pm10),
            "no2" => Ok(Pollutant::No2),
            "o3" => Ok(Pollutant::O3),
            "so2" => Ok(Pollutant::So2),
            "co" => Ok(Pollutant::Co),
            _ => bail!("unknown pollutant '{}' (expected one of pm25, pm10, no2, o3, so2, co)", s),
        }
    }
}

/// One timestamped set of pollutant concentrations in µg/m³.
///
/// Absent concentrations count as 0. The field names match the CSV columns
/// accepted by [`crate::parser::parse_readings`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    timestamp: DateTime<Utc>,
    #[serde(default)]
    pm2_5: Option<f64>,
    #[serde(default)]
    pm10: Option<f64>,
    #[serde(default)]
    no2: Option<f64>,
    #[serde(default)]
    o3: Option<f64>,
    #[serde(default)]
    so2: Option<f64>,
    #[serde(default)]
    co: Option<f64>,
}

impl PollutantReading {
    /// Creates a reading with every concentration absent.
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        PollutantReading {
            timestamp,
            pm2_5: None,
            pm10: None,
            no2: None,
            o3: None,
            so2: None,
            co: None,
        }
    }

    /// Sets one pollutant's concentration.
    pub fn with(mut self, pollutant: Pollutant, concentration: f64) -> Self {
        *self.slot_mut(pollutant) = Some(concentration);
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Calendar date of this reading in the given reference zone.
    pub fn date_in(&self, offset: &FixedOffset) -> NaiveDate {
        self.timestamp.with_timezone(offset).date_naive()
    }

    /// The concentration for `pollutant`, or 0 when absent.
    pub fn concentration(&self, pollutant: Pollutant) -> f64 {
        self.raw(pollutant).unwrap_or(0.0)
    }

    /// The concentration for `pollutant` as supplied, `None` when absent.
    pub fn raw(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm25 => self.pm2_5,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::O3 => self.o3,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
        }
    }

    fn slot_mut(&mut self, pollutant: Pollutant) -> &mut Option<f64> {
        match pollutant {
            Pollutant::Pm25 => &mut self.pm2_5,
            Pollutant::Pm10 => &mut self.pm10,
            Pollutant::No2 => &mut self.no2,
            Pollutant::O3 => &mut self.o3,
            Pollutant::So2 => &mut self.so2,
            Pollutant::Co => &mut self.co,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pollutant_from_str_accepts_common_spellings() {
        assert_eq!("pm2.5".parse::<Pollutant>().unwrap(), Pollutant::Pm25);
        assert_eq!("PM2_5".parse::<Pollutant>().unwrap(), Pollutant::Pm25);
        assert_eq!("pm10".parse::<Pollutant>().unwrap(), Pollutant::Pm10);
        assert_eq!("NO2".parse::<Pollutant>().unwrap(), Pollutant::No2);
        assert_eq!("co".parse::<Pollutant>().unwrap(), Pollutant::Co);
        assert!("lead".parse::<Pollutant>().is_err());
    }

    #[test]
    fn test_absent_concentration_is_zero() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let reading = PollutantReading::new(ts).with(Pollutant::Pm10, 40.0);

        assert_eq!(reading.concentration(Pollutant::Pm10), 40.0);
        assert_eq!(reading.concentration(Pollutant::O3), 0.0);
        assert_eq!(reading.raw(Pollutant::O3), None);
    }

    #[test]
    fn test_date_in_reference_zone() {
        // 23:30 UTC is already the next day at UTC+05:30.
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 23, 30, 0).unwrap();
        let reading = PollutantReading::new(ts);

        let utc = FixedOffset::east_opt(0).unwrap();
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();

        assert_eq!(reading.date_in(&utc), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(reading.date_in(&ist), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }
}
