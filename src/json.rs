//! Handles serialising and saving data to disk as JSON.
//!
//! Tables are written column oriented: `{"date": {"0": ms, ...}, "xrsa": {"0": v, ...}}`,
//! with dates as epoch milliseconds and missing cells as `null`.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Result;
use serde_json::{Map, Number, Value};

use crate::series::TimeSeries;

pub const DATE_COLUMN: &str = "date";

pub fn to_json(series: &TimeSeries) -> Value {
    let mut table = Map::new();

    let dates = series
        .times
        .iter()
        .enumerate()
        .map(|(i, t)| (i.to_string(), Value::from(t.timestamp_millis())))
        .collect();
    table.insert(DATE_COLUMN.to_string(), Value::Object(dates));

    for column in &series.columns {
        let cells = column
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), cell(*v)))
            .collect();
        table.insert(column.name.clone(), Value::Object(cells));
    }

    Value::Object(table)
}

/// Significant digits kept in floating point cells, as pandas writes them.
pub const SIGNIFICANT_DIGITS: usize = 10;

fn cell(value: Option<f64>) -> Value {
    value
        .map(round_significant)
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Single precision values widened to `f64` otherwise print their binary
/// noise, e.g. `2.499999993688107e-8` for `2.5e-8`.
fn round_significant(v: f64) -> f64 {
    if !v.is_finite() || v == 0.0 {
        return v;
    }

    format!("{:.*e}", SIGNIFICANT_DIGITS - 1, v).parse().unwrap_or(v)
}

/// Saves the table, creating parent directories and overwriting any existing file.
pub fn save_series(series: &TimeSeries, file_path: &Path) -> Result<()> {
    ensure_parent(file_path)?;

    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &to_json(series))?;
    writer.flush()?;

    Ok(())
}

/// Saves a downloaded feed unchanged.
pub fn save_raw(bytes: &[u8], file_path: &Path) -> Result<()> {
    ensure_parent(file_path)?;
    fs::write(file_path, bytes)?;

    Ok(())
}

fn ensure_parent(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use tempfile::TempDir;

    fn fixture() -> TimeSeries {
        let mut series = TimeSeries::new(vec![
            Utc.with_ymd_and_hms(2022, 9, 28, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2022, 9, 28, 0, 0, 1).unwrap(),
        ]);
        series.add_column("xrsa", vec![Some(2.5e-8), None]).unwrap();
        series.add_column("xrsb", vec![Some(1.0e-6), Some(f64::NAN)]).unwrap();

        series
    }

    #[test]
    fn should_write_column_oriented_table() {
        let value = to_json(&fixture());

        assert_eq!(
            value,
            json!({
                "date": {"0": 1664323200000i64, "1": 1664323201000i64},
                "xrsa": {"0": 2.5e-8, "1": null},
                "xrsb": {"0": 1.0e-6, "1": null},
            })
        );
    }

    #[test]
    fn should_round_widened_single_precision() {
        assert_eq!(cell(Some(2.5e-8f32 as f64)), json!(2.5e-8));
        assert_eq!(cell(Some(1.0e-6f32 as f64)), json!(9.999999975e-7));
        assert_eq!(cell(Some(1234.567890123)), json!(1234.56789));
        assert_eq!(cell(Some(0.0)), json!(0.0));
        assert_eq!(cell(None), Value::Null);
    }

    #[test]
    fn should_keep_column_order() {
        let value = to_json(&fixture());
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();

        assert_eq!(keys, vec!["date", "xrsa", "xrsb"]);
    }

    #[test]
    fn should_save_and_overwrite() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("data").join("goes-16-xrs-x1s-20220928.json");

        save_raw(b"stale", &path).unwrap();
        save_series(&fixture(), &path).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, to_json(&fixture()));
    }

    #[test]
    fn should_write_empty_table() {
        let mut series = TimeSeries::default();
        series.add_column("xrsa", vec![]).unwrap();

        assert_eq!(to_json(&series), json!({"date": {}, "xrsa": {}}));
    }
}
