//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{config::FetchConfig, product::Product, swpc::Interval};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(flatten)]
    pub shared: SharedArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct SharedArgs {
    /// Directory downloads and JSON output are written to [default: ~/goes-data]
    #[arg(long, global = true, env = "GOESFETCH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the NGDC GOES archive
    #[arg(long, global = true, env = "GOESFETCH_NGDC_URL")]
    pub ngdc_url: Option<String>,

    /// Base URL of the SWPC GOES feeds
    #[arg(long, global = true, env = "GOESFETCH_SWPC_URL")]
    pub swpc_url: Option<String>,
}

impl SharedArgs {
    pub fn to_config(&self) -> FetchConfig {
        FetchConfig::new(
            self.data_dir.clone(),
            self.ngdc_url.clone(),
            self.swpc_url.clone(),
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get archived science data for given dates
    Date {
        /// Observation date (YYYY-MM-DD), may be repeated
        #[arg(long = "date", required = true)]
        dates: Vec<NaiveDate>,

        /// Number of days to fetch, ending on each date
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,

        /// Satellite number, may be repeated
        #[arg(long = "sat", default_value = "16", value_parser = parse_satellite)]
        satellites: Vec<u8>,

        /// Instrument product, may be repeated
        #[arg(long = "product", default_value = "xrs-x1s", value_parser = parse_product)]
        products: Vec<Product>,

        /// Variables to read as `variable:column` pairs, e.g. `xrsa_flux:xrsa,xrsb_flux:xrsb`
        #[arg(long, value_parser = parse_columns)]
        columns: Option<Columns>,

        /// Save one table per satellite and product covering all dates
        #[arg(long)]
        merge: bool,
    },
    /// Get the last 7 days of every SWPC feed
    Recent {},
    /// Get recent X-ray flux as a time series
    Xrays {
        /// Look-back window: 7-day, 3-day, 1-day or 6-hour
        #[arg(long, default_value = "7-day")]
        interval: Interval,
    },
}

/// Variable to column name pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns(pub Vec<(String, String)>);

fn parse_satellite(s: &str) -> Result<u8, String> {
    let sat: u8 = s.parse().map_err(|_| format!("'{}' is not a satellite number", s))?;
    crate::product::check_satellite(sat).map_err(|e| e.to_string())
}

fn parse_product(s: &str) -> Result<Product, String> {
    s.parse::<Product>().map_err(|e| e.to_string())
}

fn parse_columns(s: &str) -> Result<Columns, String> {
    let pairs = s
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| match p.split_once(':') {
            Some((var, col)) if !var.is_empty() && !col.is_empty() => {
                Ok((var.to_string(), col.to_string()))
            }
            None => Ok((p.to_string(), p.to_string())),
            _ => Err(format!("invalid column '{}'", p)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if pairs.is_empty() {
        return Err("no columns given".to_string());
    }

    Ok(Columns(pairs))
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .map(|s| s.progress_chars("##-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());

    ProgressBar::new(size).with_message(message).with_style(style)
}

// -- Tests -------------------------------------------------------------------
