//! Reader-page scraping.
//!
//! Image URLs travel as the text content of `div.img-url` elements in the
//! reader page markup. Extraction is split out as a pure function so the
//! markup contract stays testable without a server.

use crate::config::HgdConfig;
use crate::error::GalleryError;
use crate::fetch::{self, HttpOptions};
use crate::reader_url;
use crate::subdomain;
use scraper::{Html, Selector};

/// Extracts image URLs from reader page markup, in document order.
///
/// Each marker element's text is rewritten onto its resolved frontend
/// subdomain. Markup without the marker yields an empty list, not an error.
pub fn extract_image_urls(html: &str, cfg: &HgdConfig) -> Vec<String> {
    let document = Html::parse_document(html);
    let marker = Selector::parse("div.img-url").unwrap();

    document
        .select(&marker)
        .map(|el| {
            let fragment = el.text().collect::<String>();
            subdomain::rewrite_image_url(&fragment, "", cfg)
        })
        .collect()
}

/// Fetches a reader page and extracts its image URLs.
pub fn fetch_image_list(page_url: &str, cfg: &HgdConfig) -> Result<Vec<String>, GalleryError> {
    let http = HttpOptions::from_config(cfg);
    let body = fetch::get_bytes(page_url, &http)?;
    let html = String::from_utf8(body)
        .map_err(|err| GalleryError::Parse(format!("page body is not UTF-8: {err}")))?;
    Ok(extract_image_urls(&html, cfg))
}

/// Classifies `input_url` and scrapes the resulting reader page.
pub fn image_list(input_url: &str, cfg: &HgdConfig) -> Result<Vec<String>, GalleryError> {
    let reader = reader_url::classify(input_url)?;
    fetch_image_list(&reader, cfg)
}
