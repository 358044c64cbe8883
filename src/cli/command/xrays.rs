//! Recent X-ray flux from SWPC converted to a time series.

use std::path::PathBuf;

use anyhow::Result;
use log::info;

use crate::{
    cli::create_spinner,
    config::FetchConfig,
    download::fetch_bytes,
    json,
    reading::parse_xrays,
    swpc::{xrays_url, Interval},
};

use super::make_xrays_file_name;

pub async fn xrays(config: &FetchConfig, interval: Interval) -> Result<PathBuf> {
    let client = config.client()?;
    let url = xrays_url(&config.swpc_url, interval);
    info!("{}", url);

    let bar = create_spinner(format!("Downloading {} X-ray flux...", interval));
    let bytes = fetch_bytes(&client, &url).await?;
    bar.finish_with_message("X-ray flux downloaded");

    let output_file = make_xrays_file_name(&config.data_dir, interval);
    save_xrays(&bytes, &output_file)?;

    Ok(output_file)
}

/// Converts a downloaded feed and saves the table.
pub fn save_xrays(bytes: &[u8], output_file: &PathBuf) -> Result<()> {
    let series = parse_xrays(bytes)?;
    let long_band = series.column("xrsb").map_or(0, |c| c.iter().flatten().count());
    info!("{} records, {} with long band flux", series.len(), long_band);

    json::save_series(&series, output_file)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn should_save_converted_feed() {
        let tmp_dir = TempDir::new().unwrap();
        let output_file = make_xrays_file_name(tmp_dir.path(), Interval::SevenDay);
        let feed = r#"[
            {"time_tag": "2022-09-28T00:00:00Z", "satellite": 16, "flux": 1.0e-6, "energy": "0.1-0.8nm"},
            {"time_tag": "2022-09-28T00:00:00Z", "satellite": 16, "flux": 2.0e-8, "energy": "0.05-0.4nm"}
        ]"#;

        save_xrays(feed.as_bytes(), &output_file).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&output_file).unwrap()).unwrap();
        assert_eq!(written["date"]["0"], 1664323200000i64);
        assert_eq!(written["xrsa"]["0"], 2.0e-8);
        assert_eq!(written["xrsb"]["0"], 1.0e-6);
    }

    #[tokio::test]
    async fn should_fail_when_feed_is_unreachable() {
        let tmp_dir = TempDir::new().unwrap();
        let config = FetchConfig::new(
            Some(tmp_dir.path().to_path_buf()),
            None,
            Some("http://127.0.0.1:9".to_string()),
        );

        assert!(xrays(&config, Interval::OneDay).await.is_err());
    }
}
