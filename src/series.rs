//! Time indexed table of measurements.

use chrono::{DateTime, Utc};

use crate::errors::{GoesError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub times: Vec<DateTime<Utc>>,
    pub columns: Vec<Column>,
}

impl TimeSeries {
    pub fn new(times: Vec<DateTime<Utc>>) -> Self {
        TimeSeries {
            times,
            columns: Vec::new(),
        }
    }

    pub fn add_column(&mut self, name: &str, values: Vec<Option<f64>>) -> Result<()> {
        if values.len() != self.times.len() {
            return Err(GoesError::LengthMismatch {
                name: name.to_string(),
                expected: self.times.len(),
                actual: values.len(),
            });
        }

        self.columns.push(Column {
            name: name.to_string(),
            values,
        });

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Stable sort of every column by the time index.
    pub fn sort_by_time(&mut self) {
        let mut order: Vec<usize> = (0..self.times.len()).collect();
        order.sort_by_key(|&i| self.times[i]);

        self.times = order.iter().map(|&i| self.times[i]).collect();
        for column in &mut self.columns {
            column.values = order.iter().map(|&i| column.values[i]).collect();
        }
    }

    /// Appends the rows of `other` and re-sorts. Both must carry the same columns.
    pub fn concat(&mut self, other: TimeSeries) -> Result<()> {
        if self.columns.is_empty() && self.times.is_empty() {
            *self = other;
            self.sort_by_time();
            return Ok(());
        }

        if self.column_names() != other.column_names() {
            return Err(GoesError::ColumnMismatch {
                expected: self.column_names(),
                actual: other.column_names(),
            });
        }

        self.times.extend(other.times);
        for (column, other_column) in self.columns.iter_mut().zip(other.columns) {
            column.values.extend(other_column.values);
        }
        self.sort_by_time();

        Ok(())
    }
}

// -- Tests -------------------------------------------------------------------
