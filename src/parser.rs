//! Input parsing for pollutant readings and stored AQI series.

use anyhow::{Context, Result};
use tracing::debug;

use crate::reading::PollutantReading;

/// Decodes CSV rows of pollutant readings.
///
/// Expected header: `timestamp,pm2_5,pm10,no2,o3,so2,co`. Timestamps are
/// RFC 3339; concentrations are µg/m³ and may be left empty when absent.
///
/// # Errors
///
/// Returns an error naming the offending row when a timestamp or
/// concentration does not parse.
pub fn parse_readings(bytes: &[u8]) -> Result<Vec<PollutantReading>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut readings = Vec::new();
    for (row, result) in rdr.deserialize::<PollutantReading>().enumerate() {
        let reading = result.with_context(|| format!("invalid reading on data row {}", row + 1))?;
        readings.push(reading);
    }

    debug!(count = readings.len(), "Readings parsed");
    Ok(readings)
}

/// Parses a stored AQI series such as `"50, 60,70"` (oldest first).
pub fn parse_series(text: &str) -> Result<Vec<u16>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u16>()
                .with_context(|| format!("'{}' is not an AQI value", part))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Pollutant;

    #[test]
    fn test_parse_empty_bytes_returns_no_readings() {
        let readings = parse_readings(&[]).unwrap();
        assert!(readings.is_empty());
    }

    #[test]
    fn test_parse_readings_with_absent_values() {
        let csv = b"timestamp,pm2_5,pm10,no2,o3,so2,co\n\
                    2024-05-01T10:00:00Z,12.5,40,,30.2,,300\n";
        let readings = parse_readings(csv).unwrap();

        assert_eq!(readings.len(), 1);
        let r = &readings[0];
        assert_eq!(r.concentration(Pollutant::Pm25), 12.5);
        assert_eq!(r.concentration(Pollutant::Pm10), 40.0);
        assert_eq!(r.raw(Pollutant::No2), None);
        assert_eq!(r.concentration(Pollutant::No2), 0.0);
        assert_eq!(r.concentration(Pollutant::Co), 300.0);
    }

    #[test]
    fn test_parse_readings_accepts_offset_timestamps() {
        let csv = b"timestamp,pm2_5,pm10,no2,o3,so2,co\n\
                    2024-05-01T01:00:00+02:00,1,,,,,\n";
        let readings = parse_readings(csv).unwrap();

        assert_eq!(readings[0].timestamp().to_rfc3339(), "2024-04-30T23:00:00+00:00");
    }

    #[test]
    fn test_parse_invalid_row() {
        let csv = b"timestamp,pm2_5,pm10,no2,o3,so2,co\n\
                    yesterday,1,2,3,4,5,6\n";
        let err = parse_readings(csv).unwrap_err();
        assert!(format!("{:#}", err).contains("data row 1"));
    }

    #[test]
    fn test_parse_series() {
        assert_eq!(parse_series("50, 60,70").unwrap(), vec![50, 60, 70]);
        assert_eq!(parse_series("  ").unwrap(), Vec::<u16>::new());
        assert!(parse_series("50,abc").is_err());
        assert!(parse_series("-5").is_err());
    }
}
