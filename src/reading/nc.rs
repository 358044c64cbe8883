//! Reads GOES-R level 2 NetCDF files into a [`TimeSeries`].

use std::path::Path;

use log::debug;
use netcdf::{AttributeValue, Variable};

use crate::{
    errors::{GoesError, Result},
    reading::cf_time::{self, CfTime},
    series::TimeSeries,
};

pub const TIME_VARIABLE: &str = "time";

/// Reads the time coordinate and the selected variables, renamed to their
/// column names, sorted by time.
pub fn read_series(path: &Path, columns: &[(String, String)]) -> Result<TimeSeries> {
    let file = netcdf::open(path)?;

    let time_var = file
        .variable(TIME_VARIABLE)
        .ok_or_else(|| GoesError::MissingVariable(TIME_VARIABLE.to_string()))?;
    let raw_times = read_1d(&time_var, TIME_VARIABLE)?;
    let units = string_attribute(&time_var, "units");
    let cf_time = cf_time::parse_units(units.as_deref().unwrap_or(cf_time::GOES_R_UNITS))?;

    let mut raw_columns = Vec::with_capacity(columns.len());
    for (variable, column) in columns {
        let var = file
            .variable(variable)
            .ok_or_else(|| GoesError::MissingVariable(variable.clone()))?;
        let values = read_1d(&var, variable)?;

        if values.len() != raw_times.len() {
            return Err(GoesError::LengthMismatch {
                name: variable.clone(),
                expected: raw_times.len(),
                actual: values.len(),
            });
        }

        raw_columns.push(RawColumn {
            name: column.clone(),
            values,
            fill_value: numeric_attribute(&var, "_FillValue"),
            scale_factor: numeric_attribute(&var, "scale_factor"),
            add_offset: numeric_attribute(&var, "add_offset"),
        });
    }

    debug!("read {} records from {}", raw_times.len(), path.display());

    build_series(&raw_times, cf_time, raw_columns)
}

pub struct RawColumn {
    pub name: String,
    pub values: Vec<f64>,
    pub fill_value: Option<f64>,
    pub scale_factor: Option<f64>,
    pub add_offset: Option<f64>,
}

impl RawColumn {
    /// Masks fill values and NaN, then unpacks `scale_factor`/`add_offset`.
    fn decode(&self, v: f64) -> Option<f64> {
        match self.fill_value {
            _ if v.is_nan() => None,
            Some(fill) if v == fill => None,
            _ => Some(v * self.scale_factor.unwrap_or(1.0) + self.add_offset.unwrap_or(0.0)),
        }
    }
}

/// Converts raw offsets and values into a sorted table. Records whose time
/// cannot be represented are dropped, fill values and NaN become missing,
/// packed values are unpacked.
pub fn build_series(raw_times: &[f64], cf_time: CfTime, columns: Vec<RawColumn>) -> Result<TimeSeries> {
    let keep: Vec<usize> = (0..raw_times.len())
        .filter(|&i| cf_time.to_datetime(raw_times[i]).is_some())
        .collect();

    let times = keep
        .iter()
        .filter_map(|&i| cf_time.to_datetime(raw_times[i]))
        .collect();
    let mut series = TimeSeries::new(times);

    for column in columns {
        let values = keep.iter().map(|&i| column.decode(column.values[i])).collect();
        series.add_column(&column.name, values)?;
    }

    series.sort_by_time();

    Ok(series)
}

fn read_1d(var: &Variable, name: &str) -> Result<Vec<f64>> {
    if var.dimensions().len() != 1 {
        return Err(GoesError::NotOneDimensional(name.to_string()));
    }

    Ok(var.get_values::<f64, _>(..)?)
}

fn string_attribute(var: &Variable, name: &str) -> Option<String> {
    match var.attribute(name)?.value().ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

fn numeric_attribute(var: &Variable, name: &str) -> Option<f64> {
    match var.attribute(name)?.value().ok()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(v as f64),
        AttributeValue::Int(v) => Some(v as f64),
        AttributeValue::Short(v) => Some(v as f64),
        AttributeValue::Schar(v) => Some(v as f64),
        AttributeValue::Uchar(v) => Some(v as f64),
        AttributeValue::Longlong(v) => Some(v as f64),
        _ => None,
    }
}

// -- Tests -------------------------------------------------------------------
