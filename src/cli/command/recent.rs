//! Last 7 days of every SWPC GOES feed, saved unchanged.

use std::path::PathBuf;

use anyhow::Result;
use log::{info, warn};

use crate::{
    cli::create_spinner,
    config::FetchConfig,
    download::fetch_bytes,
    json,
    swpc::{feed_url, Feed},
};

pub async fn recent(config: &FetchConfig) -> Result<Vec<PathBuf>> {
    let client = config.client()?;
    let output_dir = config.seven_day_dir();
    let mut saved = Vec::new();

    for feed in Feed::ALL {
        let url = feed_url(&config.swpc_url, feed);
        info!("{}", url);

        let bar = create_spinner(format!("Downloading {}...", feed.remote_name()));
        let bytes = match fetch_bytes(&client, &url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                bar.abandon_with_message(format!("{} failed", feed.remote_name()));
                warn!("{:#}", e);
                continue;
            }
        };

        let output_file = output_dir.join(feed.local_name());
        json::save_raw(&bytes, &output_file)?;
        bar.finish_with_message(format!("  ==> {}", output_file.display()));

        saved.push(output_file);
    }

    Ok(saved)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn should_skip_unreachable_feeds() {
        let tmp_dir = TempDir::new().unwrap();
        let config = FetchConfig::new(
            Some(tmp_dir.path().to_path_buf()),
            None,
            Some("http://127.0.0.1:9/json/goes/primary".to_string()),
        );

        let saved = recent(&config).await.unwrap();

        assert!(saved.is_empty());
        assert!(!config.seven_day_dir().exists());
    }
}
