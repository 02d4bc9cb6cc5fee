use chrono::{TimeZone, Utc};

use crate::error::RecorderError;
use crate::utils::*;

#[test]
fn test_resolve_known_timezones() {
    assert_eq!(resolve_timezone("Europe/Vienna").unwrap().name(), "Europe/Vienna");
    assert_eq!(resolve_timezone("UTC").unwrap().name(), "UTC");
    assert_eq!(
        resolve_timezone(" America/New_York ").unwrap().name(),
        "America/New_York"
    );
}

#[test]
fn test_resolve_unknown_timezone_fails() {
    let err = resolve_timezone("Mars/Olympus_Mons").unwrap_err();
    assert!(matches!(err, RecorderError::InvalidTimezone(ref name) if name == "Mars/Olympus_Mons"));
    assert!(resolve_timezone("").is_err());
}

#[test]
fn test_timestamp_rendered_in_zone() {
    // 2024-01-15 13:30:05 UTC is 14:30:05 in Vienna (CET, +1)
    let instant = Utc.with_ymd_and_hms(2024, 1, 15, 13, 30, 5).unwrap();
    let vienna = resolve_timezone("Europe/Vienna").unwrap();
    assert_eq!(format_timestamp(instant, &vienna), "20240115_143005");

    // Summer time, +2
    let instant = Utc.with_ymd_and_hms(2024, 7, 1, 22, 0, 0).unwrap();
    assert_eq!(format_timestamp(instant, &vienna), "20240702_000000");
}

#[test]
fn test_timestamp_is_fixed_width_and_sortable() {
    let utc = resolve_timezone("UTC").unwrap();
    let early = format_timestamp(Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap(), &utc);
    let late = format_timestamp(Utc.with_ymd_and_hms(2024, 11, 30, 23, 59, 59).unwrap(), &utc);

    assert_eq!(early, "20240203_040506");
    assert_eq!(early.len(), late.len());
    assert!(early < late);
}

#[test]
fn test_recording_file_name() {
    assert_eq!(
        recording_file_name("morning_show", "20240115_060000"),
        "morning_show_20240115_060000.mp3"
    );
    assert_eq!(recording_file_name("x", "T"), "x_T.mp3");
}

#[test]
fn test_alias_file_name() {
    assert_eq!(alias_file_name("morning_show"), "morning_show.mp3");
}

#[test]
fn test_validate_prefix() {
    assert!(validate_prefix("morning_show").is_ok());
    assert!(validate_prefix("show-2.live").is_ok());

    assert!(matches!(validate_prefix(""), Err(RecorderError::Config(_))));
    assert!(validate_prefix("shows/morning").is_err());
    assert!(validate_prefix("/abs").is_err());
    assert!(validate_prefix("win\\style").is_err());
}

#[test]
fn test_bytes_to_mib() {
    assert!((bytes_to_mib(0) - 0.0).abs() < f64::EPSILON);
    assert!((bytes_to_mib(1024 * 1024) - 1.0).abs() < f64::EPSILON);
    assert_eq!(format!("{:.2}", bytes_to_mib(1_572_864)), "1.50");
}
