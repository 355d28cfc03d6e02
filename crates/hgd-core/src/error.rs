//! Error kinds for the scrape and download pipeline.
//!
//! Classifier and scraper errors abort a run; download errors are fed to the
//! retry policy, which by default never gives up on an item.

use std::io;
use thiserror::Error;

/// Errors produced while classifying URLs, scraping the reader page, or
/// downloading images.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Input matched neither the reader nor the gallery URL pattern.
    #[error("invalid hitomi.la URL: {input}")]
    InvalidUrl { input: String },

    /// Pacing interval that cannot be expressed as a sleep duration.
    #[error("invalid interval: {secs} seconds")]
    InvalidInterval { secs: f64 },

    /// Transport-level failure (connect, DNS, read) from libcurl.
    #[error("network: {0}")]
    Network(#[from] curl::Error),

    /// Non-2xx HTTP status that is not the browsing limit.
    #[error("GET {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u32 },

    /// The site reported a temporary browsing limit (HTTP 429/503).
    #[error("temporarily reached the image browsing limit (HTTP {status})")]
    RateLimited { status: u32 },

    /// Response body could not be interpreted as an HTML document.
    #[error("parse: {0}")]
    Parse(String),

    /// Image URL has no non-empty trailing path segment to name the file by.
    #[error("filename not found: {url}")]
    NoFilename { url: String },

    /// Local file could not be created or written.
    #[error("filesystem: {0}")]
    FileSystem(#[from] io::Error),
}

impl GalleryError {
    /// True for the browsing-limit sentinel, logged distinctly by the driver.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, GalleryError::RateLimited { .. })
    }

    /// Maps a non-2xx status to the matching error. 429 and 503 are how the
    /// site signals the browsing limit; everything else is a plain HTTP failure.
    pub fn from_status(url: &str, status: u32) -> Self {
        match status {
            429 | 503 => GalleryError::RateLimited { status },
            _ => GalleryError::HttpStatus {
                url: url.to_string(),
                status,
            },
        }
    }
}
