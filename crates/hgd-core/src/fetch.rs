//! Blocking HTTP GET plumbing shared by the scraper and the downloader.
//!
//! Uses the curl crate (libcurl) with one Easy handle per request. Redirects
//! are followed; no timeouts are set, so a stalled server blocks the run.

use crate::config::HgdConfig;
use crate::error::GalleryError;
use curl::easy::Easy;

/// Per-request HTTP behavior derived from the configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpOptions {
    /// Enables curl's in-memory cookie engine.
    pub enable_cookies: bool,
}

impl HttpOptions {
    pub fn from_config(cfg: &HgdConfig) -> Self {
        Self {
            enable_cookies: cfg.enable_cookies,
        }
    }
}

/// Builds a GET handle with the shared transfer behavior applied.
pub(crate) fn get_handle(url: &str, http: &HttpOptions) -> Result<Easy, GalleryError> {
    let mut easy = Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    if http.enable_cookies {
        // An empty file name enables the engine without reading a jar.
        easy.cookie_file("")?;
    }
    Ok(easy)
}

/// GETs `url` and returns the response body.
///
/// The body is collected in memory, so this is only for page-sized
/// responses; image bodies stream through the downloader instead.
pub fn get_bytes(url: &str, http: &HttpOptions) -> Result<Vec<u8>, GalleryError> {
    let mut easy = get_handle(url, http)?;
    let mut body = Vec::new();

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if code < 200 || code >= 300 {
        return Err(GalleryError::from_status(url, code));
    }
    Ok(body)
}
