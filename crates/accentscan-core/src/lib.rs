//! accentscan-core: Core pipeline for classifying the accent spoken in a video

pub mod config;
pub mod decoder;
pub mod downloader;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::Config;
pub use error::{AccentScanError, Result};
pub use report::AccentReport;
