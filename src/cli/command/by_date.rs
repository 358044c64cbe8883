//! Archived science data for given dates, satellites and products.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::Client;

use crate::{
    cli::{create_progress_bar, Columns},
    config::FetchConfig,
    download::fetch_cached,
    json,
    product::{archive_url, Product},
    reading,
    series::TimeSeries,
};

use super::{expand_dates, make_json_file_name, make_merged_file_name};

/// One file to fetch and convert.
#[derive(Debug, Clone)]
pub struct Request {
    pub date: NaiveDate,
    pub satellite: u8,
    pub product: Product,
}

pub async fn by_date(
    config: &FetchConfig,
    dates: &[NaiveDate],
    days: u32,
    satellites: &[u8],
    products: &[Product],
    columns: Option<Columns>,
    merge: bool,
) -> Result<Vec<PathBuf>> {
    let client = config.client()?;
    let dates = expand_dates(dates, days);
    let requests = make_requests(&dates, satellites, products);

    let pb = create_progress_bar(requests.len() as u64, "Fetching GOES files...".to_string());
    let mut saved = Vec::new();
    let mut merged: Option<TimeSeries> = None;

    for (i, request) in requests.iter().enumerate() {
        let columns = columns
            .as_ref()
            .map(|c| c.0.clone())
            .unwrap_or_else(|| request.product.default_columns());

        match load_one(&client, config, request, columns).await {
            Ok(Some(series)) if merge => {
                if let Err(e) = merged.get_or_insert_with(TimeSeries::default).concat(series) {
                    warn!("skipping GOES-{} {} on {}: {}", request.satellite, request.product, request.date, e);
                }
            }
            Ok(Some(series)) => {
                let output_file = make_json_file_name(
                    &config.data_dir,
                    request.satellite,
                    request.product,
                    request.date,
                );
                json::save_series(&series, &output_file)?;
                pb.println(format!("  ==> {}", output_file.display()));
                saved.push(output_file);
            }
            Ok(None) => warn!(
                "no data for GOES-{} {} on {}",
                request.satellite, request.product, request.date
            ),
            Err(e) => warn!(
                "skipping GOES-{} {} on {}: {:#}",
                request.satellite, request.product, request.date, e
            ),
        }
        pb.inc(1);

        // requests of one satellite and product are contiguous
        let group_done = requests
            .get(i + 1)
            .map_or(true, |next| next.satellite != request.satellite || next.product != request.product);
        if group_done {
            if let Some(series) = merged.take().filter(|s| !s.is_empty()) {
                let output_file = make_merged_file_name(
                    &config.data_dir,
                    request.satellite,
                    request.product,
                    &dates,
                );
                json::save_series(&series, &output_file)?;
                pb.println(format!("  ==> {}", output_file.display()));
                saved.push(output_file);
            }
        }
    }

    pb.finish_with_message(format!("{} files saved", saved.len()));

    Ok(saved)
}

/// Products vary slowest, dates fastest.
pub fn make_requests(dates: &[NaiveDate], satellites: &[u8], products: &[Product]) -> Vec<Request> {
    let mut requests = Vec::with_capacity(dates.len() * satellites.len() * products.len());

    for product in products {
        for satellite in satellites {
            for date in dates {
                requests.push(Request {
                    date: *date,
                    satellite: *satellite,
                    product: *product,
                });
            }
        }
    }

    requests
}

/// Downloads (or reuses) one file and reads it. `None` when the file could
/// not be downloaded.
pub async fn load_one(
    client: &Client,
    config: &FetchConfig,
    request: &Request,
    columns: Vec<(String, String)>,
) -> Result<Option<TimeSeries>> {
    let url = archive_url(&config.ngdc_url, request.date, request.satellite, request.product);
    info!("{}", url);

    let nc_path = match fetch_cached(client, &url, &config.data_dir).await? {
        Some(path) => path,
        None => return Ok(None),
    };

    let series = tokio::task::spawn_blocking(move || reading::read_series(&nc_path, &columns))
        .await
        .map_err(|e| anyhow!("Task join error: {}", e))??;

    Ok(Some(series))
}

// -- Tests -------------------------------------------------------------------
