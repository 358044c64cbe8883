pub mod by_date;
pub mod recent;
pub mod xrays;

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
pub use by_date::by_date;
pub use recent::recent;
pub use xrays::xrays;

use crate::{product::Product, swpc::Interval};

pub fn make_json_file_name(data_dir: &Path, satellite: u8, product: Product, date: NaiveDate) -> PathBuf {
    let file_name = format!(
        "goes-{}-{}-{}.json",
        satellite,
        product.key(),
        date.format("%Y%m%d")
    );

    data_dir.join(file_name)
}

/// File name of a table merged over `dates`, named after the first and last day.
pub fn make_merged_file_name(data_dir: &Path, satellite: u8, product: Product, dates: &[NaiveDate]) -> PathBuf {
    match (dates.iter().min(), dates.iter().max()) {
        (Some(first), Some(last)) if first != last => data_dir.join(format!(
            "goes-{}-{}-{}-{}.json",
            satellite,
            product.key(),
            first.format("%Y%m%d"),
            last.format("%Y%m%d")
        )),
        (Some(first), _) => make_json_file_name(data_dir, satellite, product, *first),
        _ => data_dir.join(format!("goes-{}-{}.json", satellite, product.key())),
    }
}

pub fn make_xrays_file_name(data_dir: &Path, interval: Interval) -> PathBuf {
    match interval {
        Interval::SevenDay => data_dir.join("result.json"),
        _ => data_dir.join(format!("xrays-{}.json", interval.key())),
    }
}

/// Each date expanded to the `days` days ending on it, newest first.
pub fn expand_dates(dates: &[NaiveDate], days: u32) -> Vec<NaiveDate> {
    let mut expanded = Vec::new();

    for date in dates {
        for offset in 0..days {
            if let Some(d) = date.checked_sub_signed(Duration::days(offset as i64)) {
                if !expanded.contains(&d) {
                    expanded.push(d);
                }
            }
        }
    }

    expanded
}

// -- Tests -------------------------------------------------------------------
