use aqi_forecaster::analyzers::aggregate::aggregate_daily;
use aqi_forecaster::analyzers::forecast::forecast_next;
use aqi_forecaster::analyzers::types::Trend;
use aqi_forecaster::config::parse_utc_offset;
use aqi_forecaster::parser::parse_readings;
use chrono::NaiveDate;

const FIXTURE: &[u8] = include_bytes!("fixtures/readings.csv");

#[test]
fn test_full_pipeline() {
    let readings = parse_readings(FIXTURE).expect("Failed to parse readings");
    assert_eq!(readings.len(), 6);

    let utc = parse_utc_offset("+00:00").unwrap();
    let series = aggregate_daily(&readings, &utc);

    let dates: Vec<_> = series.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
        ]
    );
    assert_eq!(series.values(), vec![50, 75, 100]);

    let forecast = forecast_next(&series.values()).expect("three days is enough to forecast");
    assert!((forecast.slope - 25.0).abs() < 1e-9);
    assert_eq!(forecast.predicted_aqi(), 125);
    assert_eq!(forecast.trend, Trend::Rising);
}

#[test]
fn test_reference_zone_changes_daily_buckets() {
    let readings = parse_readings(FIXTURE).unwrap();
    let plus_ten = parse_utc_offset("+10:00").unwrap();

    let series = aggregate_daily(&readings, &plus_ten);

    assert_eq!(series.len(), 4);
    assert_eq!(series.values(), vec![50, 50, 100, 100]);
}

#[test]
fn test_input_order_does_not_matter() {
    let mut readings = parse_readings(FIXTURE).unwrap();
    let utc = parse_utc_offset("Z").unwrap();
    let first = aggregate_daily(&readings, &utc);

    readings.reverse();
    readings.rotate_left(2);
    let second = aggregate_daily(&readings, &utc);

    assert_eq!(first, second);
}

#[test]
fn test_history_window_limits_forecast_input() {
    let readings = parse_readings(FIXTURE).unwrap();
    let utc = parse_utc_offset("Z").unwrap();
    let series = aggregate_daily(&readings, &utc);

    let last_two = series.tail(2);
    assert_eq!(last_two.values(), vec![75, 100]);
    assert_eq!(series.tail(0), series);

    assert!(forecast_next(&series.tail(1).values()).is_none());
}
