//! Video downloader over HTTP(S)

use crate::error::DownloadError;
use futures::StreamExt;
use reqwest::{Client, Url};
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Downloader {
    client: Client,
    temp_dir: PathBuf,
}

/// A downloaded video; the file is removed when this is dropped or closed
#[derive(Debug)]
pub struct DownloadedVideo {
    pub path: TempPath,
    pub bytes: u64,
}

impl DownloadedVideo {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Downloader {
    pub fn new(temp_dir: PathBuf) -> Self {
        Self::with_client(Client::new(), temp_dir)
    }

    pub fn with_client(client: Client, temp_dir: PathBuf) -> Self {
        Self { client, temp_dir }
    }

    /// Download the video at `url` into a temporary `.mp4` file
    pub async fn download(&self, url: &str) -> Result<DownloadedVideo, DownloadError> {
        let url = validate_video_url(url)?;
        info!("Downloading video from: {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let file = tempfile::Builder::new()
            .prefix("accentscan-")
            .suffix(".mp4")
            .tempfile_in(&self.temp_dir)?;
        let (file, path) = file.into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut bytes: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
        }

        file.flush().await?;
        drop(file);

        debug!("Downloaded {} bytes to {}", bytes, path.display());
        Ok(DownloadedVideo { path, bytes })
    }
}

/// Parse `url` and require an `http` or `https` scheme
pub fn validate_video_url(url: &str) -> Result<Url, DownloadError> {
    let parsed = Url::parse(url.trim()).map_err(|_| DownloadError::InvalidUrl(url.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(DownloadError::InvalidUrl(url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and return the URL to fetch it from
    async fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/clip.mp4", addr)
    }

    fn local_downloader(dir: &Path) -> Downloader {
        let client = Client::builder().no_proxy().build().unwrap();
        Downloader::with_client(client, dir.to_path_buf())
    }

    #[test]
    fn test_validate_video_url() {
        assert!(validate_video_url("https://example.com/video.mp4").is_ok());
        assert!(validate_video_url("  http://example.com/a.mp4 ").is_ok());
        assert!(validate_video_url("ftp://example.com/video.mp4").is_err());
        assert!(validate_video_url("file:///tmp/video.mp4").is_err());
        assert!(validate_video_url("not a url").is_err());
        assert!(validate_video_url("").is_err());
    }

    #[tokio::test]
    async fn test_download_to_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = serve_once("200 OK", b"fake mp4 bytes").await;

        let video = local_downloader(dir.path())
            .download(&url)
            .await
            .unwrap();

        assert_eq!(video.bytes, 14);
        assert_eq!(video.path().extension().unwrap(), "mp4");
        assert!(video.path().starts_with(dir.path()));
        assert_eq!(std::fs::read(video.path()).unwrap(), b"fake mp4 bytes");

        let path = video.path().to_path_buf();
        drop(video);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let dir = tempfile::tempdir().unwrap();
        let url = serve_once("404 Not Found", b"").await;

        let err = local_downloader(dir.path())
            .download(&url)
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::HttpStatus { status: 404, .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let err = Downloader::new(dir.path().to_path_buf())
            .download("ftp://example.com/video.mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::InvalidUrl(_)));
    }
}
