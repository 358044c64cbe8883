//! CF convention time coordinates, e.g. `seconds since 2000-01-01 12:00:00`.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::errors::{GoesError, Result};

/// Time units of GOES-R level 2 files (J2000 epoch).
pub const GOES_R_UNITS: &str = "seconds since 2000-01-01 12:00:00";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CfTime {
    pub epoch: DateTime<Utc>,
    pub millis_per_unit: f64,
}

impl CfTime {
    pub fn to_datetime(&self, value: f64) -> Option<DateTime<Utc>> {
        if !value.is_finite() {
            return None;
        }

        // `as` saturates, out of range offsets are rejected by `try_milliseconds`
        let millis = (value * self.millis_per_unit).round() as i64;

        self.epoch.checked_add_signed(Duration::try_milliseconds(millis)?)
    }
}

pub fn parse_units(units: &str) -> Result<CfTime> {
    let err = || GoesError::TimeUnitsError(units.to_string());

    let (unit, reference) = units.trim().split_once(" since ").ok_or_else(err)?;

    let millis_per_unit = match unit.trim().to_lowercase().as_str() {
        "millisecond" | "milliseconds" | "msec" | "ms" => 1.0,
        "second" | "seconds" | "sec" | "secs" | "s" => 1000.0,
        "minute" | "minutes" | "min" | "mins" => 60_000.0,
        "hour" | "hours" | "hr" | "hrs" | "h" => 3_600_000.0,
        "day" | "days" | "d" => 86_400_000.0,
        _ => return Err(err()),
    };

    let epoch = parse_reference(reference.trim()).ok_or_else(err)?;

    Ok(CfTime {
        epoch,
        millis_per_unit,
    })
}

fn parse_reference(reference: &str) -> Option<DateTime<Utc>> {
    // drop a trailing zone designator, GOES files are always UTC
    let reference = reference
        .trim_end_matches(" UTC")
        .trim_end_matches(" utc")
        .trim_end_matches('Z');

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(reference, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(reference, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

// -- Tests -------------------------------------------------------------------
