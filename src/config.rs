//! Analysis configuration.
//!
//! Values come from defaults, then the environment (a `.env` file is loaded
//! by the binary through `dotenvy`), then an optional JSON file:
//!
//! ```json
//! {
//!   "utc_offset": "+05:30",
//!   "history_days": 7
//! }
//! ```

use anyhow::{Context, Result, bail};
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;

pub const UTC_OFFSET_VAR: &str = "AQI_UTC_OFFSET";
pub const HISTORY_DAYS_VAR: &str = "AQI_HISTORY_DAYS";

const DEFAULT_HISTORY_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Reference zone used to assign readings to calendar dates.
    pub utc_offset: FixedOffset,
    /// Most recent days fed to the forecaster. 0 uses the whole series.
    pub history_days: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            utc_offset: Utc.fix(),
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    utc_offset: Option<String>,
    history_days: Option<usize>,
}

impl AnalysisConfig {
    /// Defaults overridden by `AQI_UTC_OFFSET` and `AQI_HISTORY_DAYS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = AnalysisConfig::default();

        if let Some(raw) = lookup(UTC_OFFSET_VAR) {
            config.utc_offset = parse_utc_offset(&raw)
                .with_context(|| format!("invalid {}", UTC_OFFSET_VAR))?;
        }
        if let Some(raw) = lookup(HISTORY_DAYS_VAR) {
            config.history_days = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {}: '{}'", HISTORY_DAYS_VAR, raw))?;
        }

        Ok(config)
    }

    /// Applies the keys present in a JSON config file at `path` on top of `self`.
    pub fn merge_file(self, path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path))?;
        self.merge_json(&content)
            .with_context(|| format!("parsing config file {}", path))
    }

    fn merge_json(mut self, content: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(content)?;

        if let Some(raw) = file.utc_offset {
            self.utc_offset = parse_utc_offset(&raw)?;
        }
        if let Some(days) = file.history_days {
            self.history_days = days;
        }

        Ok(self)
    }
}

/// Parses an offset such as `+05:30`, `-0800`, `+09`, or `Z`.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match trimmed.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => bail!("'{}' is not a UTC offset like +05:30", raw),
    };

    let digits: String = rest.chars().filter(|&c| c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        bail!("'{}' is not a UTC offset like +05:30", raw);
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.as_str(), "00"),
        4 => digits.split_at(2),
        _ => bail!("'{}' is not a UTC offset like +05:30", raw),
    };

    let hours: i32 = hours
        .parse()
        .with_context(|| format!("bad hours in offset '{}'", raw))?;
    let minutes: i32 = minutes
        .parse()
        .with_context(|| format!("bad minutes in offset '{}'", raw))?;
    if minutes >= 60 {
        bail!("bad minutes in offset '{}'", raw);
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("offset '{}' is out of range", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.history_days, 7);
        assert_eq!(config.utc_offset.local_minus_utc(), 0);
    }

    #[test]
    fn test_env_overrides() {
        let config = AnalysisConfig::from_lookup(lookup(&[
            (UTC_OFFSET_VAR, "+05:30"),
            (HISTORY_DAYS_VAR, "14"),
        ]))
        .unwrap();

        assert_eq!(config.utc_offset.local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(config.history_days, 14);
    }

    #[test]
    fn test_invalid_env_is_an_error() {
        assert!(AnalysisConfig::from_lookup(lookup(&[(UTC_OFFSET_VAR, "soon")])).is_err());
        assert!(AnalysisConfig::from_lookup(lookup(&[(HISTORY_DAYS_VAR, "-1")])).is_err());
    }

    #[test]
    fn test_merge_json_keeps_missing_keys() {
        let base = AnalysisConfig {
            utc_offset: parse_utc_offset("-08:00").unwrap(),
            history_days: 3,
        };
        let merged = base.merge_json(r#"{ "history_days": 10 }"#).unwrap();

        assert_eq!(merged.utc_offset.local_minus_utc(), -8 * 3600);
        assert_eq!(merged.history_days, 10);
    }

    #[test]
    fn test_merge_json_rejects_unknown_keys() {
        assert!(AnalysisConfig::default().merge_json(r#"{ "timezone": "UTC" }"#).is_err());
    }

    #[test]
    fn test_parse_utc_offset_aliases() {
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset(" utc ").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("+01:00").unwrap().local_minus_utc(), 3600);
    }

    #[test]
    fn test_parse_utc_offset_forms() {
        assert_eq!(parse_utc_offset("-0800").unwrap().local_minus_utc(), -8 * 3600);
        assert_eq!(parse_utc_offset("+09").unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(parse_utc_offset("+05:45").unwrap().local_minus_utc(), 5 * 3600 + 45 * 60);
    }

    #[test]
    fn test_parse_utc_offset_rejects_garbage() {
        assert!(parse_utc_offset("05:30").is_err());
        assert!(parse_utc_offset("+5:30").is_err());
        assert!(parse_utc_offset("+05:60").is_err());
        assert!(parse_utc_offset("+25:00").is_err());
        assert!(parse_utc_offset("+-5:00").is_err());
        assert!(parse_utc_offset("").is_err());
    }
}
