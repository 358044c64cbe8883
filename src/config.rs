//! Resolved settings shared by all commands.

use std::path::PathBuf;

use reqwest::Client;

use crate::{product::NGDC_URL, swpc::SWPC_URL};

pub const DATA_DIR_NAME: &str = "goes-data";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub data_dir: PathBuf,
    pub ngdc_url: String,
    pub swpc_url: String,
}

impl FetchConfig {
    pub fn new(data_dir: Option<PathBuf>, ngdc_url: Option<String>, swpc_url: Option<String>) -> Self {
        FetchConfig {
            data_dir: data_dir.unwrap_or_else(default_data_dir),
            ngdc_url: ngdc_url.unwrap_or_else(|| NGDC_URL.to_string()),
            swpc_url: swpc_url.unwrap_or_else(|| SWPC_URL.to_string()),
        }
    }

    pub fn seven_day_dir(&self) -> PathBuf {
        self.data_dir.join("7-day")
    }

    pub fn client(&self) -> reqwest::Result<Client> {
        Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig::new(None, None, None)
    }
}

/// `~/goes-data`, or `./goes-data` when there is no home directory.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

// -- Tests -------------------------------------------------------------------
