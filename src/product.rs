//! GOES-R level 2 science products hosted on the NGDC archive.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::errors::{GoesError, Result};

pub const NGDC_URL: &str =
    "https://data.ngdc.noaa.gov/platforms/solar-space-observing-satellites/goes";

/// Satellites that publish level 2 products with the GOES-R archive layout.
pub const SATELLITES: [u8; 4] = [16, 17, 18, 19];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Instrument product. Each maps to the directory, file prefix and version
/// fragments of its archive path.
pub enum Product {
    XrsX1s,
    XrsSum,
    XrsLoc,
    XrsDet,
    XrsKd1,
    Ephe,
    EuvAvg1d,
    EuvAvg1m,
    MagHi,
}

/// Directory, file prefix and version of a product's archive path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragments {
    pub directory: &'static str,
    pub prefix: &'static str,
    pub version: &'static str,
}

impl Product {
    pub const ALL: [Product; 9] = [
        Product::XrsX1s,
        Product::XrsSum,
        Product::XrsLoc,
        Product::XrsDet,
        Product::XrsKd1,
        Product::Ephe,
        Product::EuvAvg1d,
        Product::EuvAvg1m,
        Product::MagHi,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Product::XrsX1s => "xrs-x1s",
            Product::XrsSum => "xrs-sum",
            Product::XrsLoc => "xrs-loc",
            Product::XrsDet => "xrs-det",
            Product::XrsKd1 => "xrs-kd1",
            Product::Ephe => "ephe",
            Product::EuvAvg1d => "euv-avg1d",
            Product::EuvAvg1m => "euv-avg1m",
            Product::MagHi => "mag-hi",
        }
    }

    pub fn fragments(&self) -> Fragments {
        let (directory, prefix, version) = match self {
            Product::XrsX1s => ("xrsf-l2-flx1s_science", "sci_xrsf-l2-flx1s_g", "_v2-1-0"),
            Product::XrsSum => ("xrsf-l2-flsum_science", "sci_xrsf-l2-flsum_g", "_v2-1-0"),
            Product::XrsLoc => ("xrsf-l2-flloc_science", "sci_xrsf-l2-flloc_g", "_v2-1-0"),
            Product::XrsDet => ("xrsf-l2-fldet_science", "sci_xrsf-l2-fldet_g", "_v2-1-0"),
            Product::XrsKd1 => ("xrsf-l2-bkd1d_science", "sci_xrsf-l2-bkd1d_g", "_v2-1-0"),
            Product::Ephe => ("ephe-l2-orb1m", "dn_ephe-l2-orb1m_g", "_v0-0-3"),
            Product::EuvAvg1d => ("euvs-l2-avg1d_science", "sci_euvs-l2-avg1d_g", "_v1-0-1"),
            Product::EuvAvg1m => ("euvs-l2-avg1m_science", "sci_euvs-l2-avg1m_g", "_v1-0-1"),
            Product::MagHi => ("magn-l2-hires", "dn_magn-l2-hires_g", "_v1-0-1"),
        };

        Fragments {
            directory,
            prefix,
            version,
        }
    }

    /// Variables read from the file and the column names they are saved under.
    pub fn default_columns(&self) -> Vec<(String, String)> {
        vec![
            ("xrsa_flux".to_string(), "xrsa".to_string()),
            ("xrsb_flux".to_string(), "xrsb".to_string()),
        ]
    }
}

impl FromStr for Product {
    type Err = GoesError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        if key == "xrs" {
            return Ok(Product::XrsX1s);
        }

        Product::ALL
            .iter()
            .find(|p| p.key() == key)
            .copied()
            .ok_or_else(|| GoesError::UnknownProduct(s.to_string()))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub fn check_satellite(satellite: u8) -> Result<u8> {
    if SATELLITES.contains(&satellite) {
        Ok(satellite)
    } else {
        Err(GoesError::UnsupportedSatellite(satellite))
    }
}

/// Builds the archive URL of one day's file for a satellite and product.
pub fn archive_url(base: &str, date: NaiveDate, satellite: u8, product: Product) -> String {
    let f = product.fragments();

    format!(
        "{}/goes{}/l2/data/{}/{}/{}{}_d{}{}.nc",
        base.trim_end_matches('/'),
        satellite,
        f.directory,
        date.format("%Y/%m"),
        f.prefix,
        satellite,
        date.format("%Y%m%d"),
        f.version
    )
}

pub fn file_name_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

// -- Tests -------------------------------------------------------------------
