use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// 舊系統原生格式排最前面
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses a legacy creation date permissively and reformats it as a strict
/// UTC ISO-8601 string with second precision and a literal `Z` suffix.
/// Values without an offset are taken as already-UTC.
pub fn normalize_timestamp(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EtlError::DateParseError {
            value: value.to_string(),
        });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).format(OUTPUT_FORMAT).to_string());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.format(OUTPUT_FORMAT).to_string());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date.and_time(NaiveTime::MIN).format(OUTPUT_FORMAT).to_string());
        }
    }

    Err(EtlError::DateParseError {
        value: value.to_string(),
    })
}
