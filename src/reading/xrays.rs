//! SWPC X-ray flux feed.
//!
//! The feed is a flat list of records, one per band and minute. The short
//! band is saved as `xrsa` and the long band as `xrsb`.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::{
    errors::{GoesError, Result},
    series::TimeSeries,
};

pub const SHORT_BAND: &str = "0.05-0.4nm";
pub const LONG_BAND: &str = "0.1-0.8nm";

#[derive(Debug, Deserialize)]
pub struct XrayRecord {
    pub time_tag: String,
    pub flux: Option<f64>,
    pub energy: String,
}

pub fn parse_xrays(bytes: &[u8]) -> Result<TimeSeries> {
    let records: Vec<XrayRecord> = serde_json::from_slice(bytes)?;

    from_records(&records)
}

pub fn from_records(records: &[XrayRecord]) -> Result<TimeSeries> {
    let mut rows: BTreeMap<DateTime<Utc>, (Option<f64>, Option<f64>)> = BTreeMap::new();

    for record in records {
        let slot = match record.energy.as_str() {
            SHORT_BAND => 0,
            LONG_BAND => 1,
            _ => continue,
        };
        let time = parse_time_tag(&record.time_tag)?;
        let flux = record.flux.filter(|v| v.is_finite());

        let row = rows.entry(time).or_default();
        if slot == 0 {
            row.0 = flux;
        } else {
            row.1 = flux;
        }
    }

    let mut series = TimeSeries::new(rows.keys().copied().collect());
    series.add_column("xrsa", rows.values().map(|r| r.0).collect())?;
    series.add_column("xrsb", rows.values().map(|r| r.1).collect())?;

    Ok(series)
}

fn parse_time_tag(tag: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(tag) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(tag, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(tag, "%Y-%m-%d %H:%M:%S"))
        .map(|dt| dt.and_utc())
        .map_err(|_| GoesError::TimeTagError(tag.to_string()))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    const FEED: &str = r#"[
        {"time_tag": "2022-09-28T00:01:00Z", "satellite": 16, "flux": 2.0e-6, "observed_flux": 2.1e-6, "electron_correction": 0.0, "electron_contaminaton": false, "energy": "0.1-0.8nm"},
        {"time_tag": "2022-09-28T00:01:00Z", "satellite": 16, "flux": 3.0e-8, "observed_flux": 3.1e-8, "electron_correction": 0.0, "electron_contaminaton": false, "energy": "0.05-0.4nm"},
        {"time_tag": "2022-09-28T00:00:00Z", "satellite": 16, "flux": 1.0e-6, "observed_flux": 1.1e-6, "electron_correction": 0.0, "electron_contaminaton": false, "energy": "0.1-0.8nm"},
        {"time_tag": "2022-09-28T00:00:00Z", "satellite": 16, "flux": null, "observed_flux": null, "electron_correction": 0.0, "electron_contaminaton": false, "energy": "0.05-0.4nm"},
        {"time_tag": "2022-09-28T00:02:00Z", "satellite": 16, "flux": 4.0e-6, "observed_flux": 4.0e-6, "electron_correction": 0.0, "electron_contaminaton": false, "energy": "0.1-0.8nm"}
    ]"#;

    #[test]
    fn should_pair_bands_by_time() {
        let series = parse_xrays(FEED.as_bytes()).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.times[0], Utc.with_ymd_and_hms(2022, 9, 28, 0, 0, 0).unwrap());
        assert_eq!(series.column("xrsa").unwrap(), &[None, Some(3.0e-8), None]);
        assert_eq!(
            series.column("xrsb").unwrap(),
            &[Some(1.0e-6), Some(2.0e-6), Some(4.0e-6)]
        );
    }

    #[test]
    fn should_ignore_other_bands() {
        let feed = r#"[{"time_tag": "2022-09-28T00:00:00Z", "flux": 1.0, "energy": "1-8A"}]"#;
        let series = parse_xrays(feed.as_bytes()).unwrap();

        assert!(series.is_empty());
        assert_eq!(series.column_names(), vec!["xrsa", "xrsb"]);
    }

    #[test]
    fn should_reject_bad_time_tag() {
        let feed = r#"[{"time_tag": "yesterday", "flux": 1.0, "energy": "0.1-0.8nm"}]"#;
        let err = parse_xrays(feed.as_bytes()).unwrap_err();

        assert!(matches!(err, GoesError::TimeTagError(_)));
    }

    #[test]
    fn should_accept_time_tag_without_zone() {
        let dt = parse_time_tag("2022-09-28T12:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2022, 9, 28, 12, 30, 0).unwrap());
    }
}
