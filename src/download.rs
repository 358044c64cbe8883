//! Downloads data files, reusing any copy already on disk.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Error, Result};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use reqwest::Client;
use tempfile::NamedTempFile;

use crate::product::file_name_from_url;

/// Returns the local copy of `url` in `dir`, downloading it if it does not
/// exist yet. A failed download is logged and yields `None`.
pub async fn fetch_cached(client: &Client, url: &str, dir: &Path) -> Result<Option<PathBuf>> {
    let file_path = dir.join(file_name_from_url(url));

    if file_path.exists() {
        info!("using cached {}", file_path.display());
        return Ok(Some(file_path));
    }

    fs::create_dir_all(dir)?;
    info!("downloading {}", url);

    let bar = ProgressBar::new_spinner().with_message(file_name_from_url(url).to_string());
    match download_to(client, url, &file_path, bar.clone()).await {
        Ok(()) => {
            bar.finish_and_clear();
            Ok(Some(file_path))
        }
        Err(e) => {
            bar.abandon();
            warn!("download failed: {}", e);
            Ok(None)
        }
    }
}

/// Streams `url` to `file_path`. The file only appears once the download is
/// complete.
pub async fn download_to(
    client: &Client,
    url: &str,
    file_path: &Path,
    progress_bar: ProgressBar,
) -> Result<(), Error> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::msg(format!("Failed to download file: {}", e)))?;

    if !response.status().is_success() {
        return Err(Error::msg(format!(
            "Failed to download file: {} ({})",
            response.status(),
            url
        )));
    }

    let total_size = response.content_length().unwrap_or(0);
    if total_size > 0 {
        progress_bar.set_length(total_size);
        progress_bar.set_style(
            ProgressStyle::with_template(
                "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {eta}",
            )?
            .progress_chars("=> "),
        );
    }

    let dir = file_path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| Error::msg(format!("Error reading chunk: {}", e)))?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        progress_bar.set_position(downloaded);
    }

    file.flush()?;
    file.persist(file_path)?;

    Ok(())
}

/// Downloads `url` into memory.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::msg(format!("Failed to download {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(Error::msg(format!(
            "Failed to download {}: {}",
            url,
            response.status()
        )));
    }

    Ok(response.bytes().await?.to_vec())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    // nothing listens on port 9 of the loopback interface
    const UNREACHABLE: &str = "http://127.0.0.1:9/goes16/l2/data/sci_xrsf-l2-flx1s_g16_d20220928_v2-1-0.nc";
    const FILE_NAME: &str = "sci_xrsf-l2-flx1s_g16_d20220928_v2-1-0.nc";

    /// Serves `response` verbatim to a single connection on a local port and
    /// returns the URL of the data file on it.
    async fn serve_once(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // read the whole request head before answering
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            socket.write_all(response).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/goes16/l2/data/{}", addr, FILE_NAME)
    }

    #[tokio::test]
    async fn should_persist_complete_download() {
        let temp_dir = TempDir::new().unwrap();
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello",
        )
        .await;

        let client = Client::new();
        let path = fetch_cached(&client, &url, temp_dir.path()).await.unwrap();

        let expected = temp_dir.path().join(FILE_NAME);
        assert_eq!(path, Some(expected.clone()));
        assert_eq!(fs::read(&expected).unwrap(), b"hello");
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn should_return_none_for_missing_archive_day() {
        let temp_dir = TempDir::new().unwrap();
        let url = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
        )
        .await;

        let client = Client::new();
        let path = fetch_cached(&client, &url, temp_dir.path()).await.unwrap();

        assert_eq!(path, None);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn should_not_cache_truncated_download() {
        let temp_dir = TempDir::new().unwrap();
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nhello",
        )
        .await;

        let client = Client::new();
        let path = fetch_cached(&client, &url, temp_dir.path()).await.unwrap();

        assert_eq!(path, None);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn should_use_existing_file_without_network() {
        let temp_dir = TempDir::new().unwrap();
        let cached = temp_dir.path().join("sci_xrsf-l2-flx1s_g16_d20220928_v2-1-0.nc");
        fs::write(&cached, b"cached").unwrap();

        let client = Client::new();
        let path = fetch_cached(&client, UNREACHABLE, temp_dir.path()).await.unwrap();

        assert_eq!(path, Some(cached.clone()));
        assert_eq!(fs::read(&cached).unwrap(), b"cached");
    }

    #[tokio::test]
    async fn should_return_none_when_download_fails() {
        let temp_dir = TempDir::new().unwrap();

        let client = Client::new();
        let path = fetch_cached(&client, UNREACHABLE, temp_dir.path()).await.unwrap();

        assert_eq!(path, None);
        // no partial file is left behind
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn should_fail_fetching_bytes_from_unreachable_host() {
        let client = Client::new();
        assert!(fetch_bytes(&client, UNREACHABLE).await.is_err());
    }
}
