//! Error types for accentscan-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AccentScanError>;

#[derive(Error, Debug)]
pub enum AccentScanError {
    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("Audio extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("Classification failed: {0}")]
    Classify(#[from] accentscan_classify::ClassifyError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Server returned {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("FFmpeg not found. Install with: brew install ffmpeg")]
    FfmpegNotFound,

    #[error("FFmpeg failed with exit code {code:?}: {stderr}")]
    FfmpegFailed { code: Option<i32>, stderr: String },

    #[error("No audio stream in video")]
    NoAudioStream,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
