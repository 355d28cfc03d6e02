//! Reader URL normalization.
//!
//! Two input shapes are recognized: a reader URL, used as-is, and a gallery
//! URL, rewritten to its reader form. Anything else is rejected.

use crate::error::GalleryError;
use regex::Regex;
use std::sync::LazyLock;

static READER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:https?:)?//)?hitomi\.la/reader/\d+\.html(?:#.*)?").unwrap()
});

static GALLERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(?:https?:)?//)?hitomi\.la/galleries/(\d+)\.html").unwrap());

/// Normalizes `input` to the canonical reader page URL.
///
/// A reader URL (optionally scheme-prefixed, optionally carrying a `#`
/// fragment) is returned as-is, without repairing a missing scheme; a gallery
/// URL becomes `https://hitomi.la/reader/<id>.html`. Anything else fails with
/// `InvalidUrl` carrying the original input.
pub fn classify(input: &str) -> Result<String, GalleryError> {
    if READER_RE.is_match(input) {
        return Ok(input.to_string());
    }
    if let Some(caps) = GALLERY_RE.captures(input) {
        return Ok(format!("https://hitomi.la/reader/{}.html", &caps[1]));
    }
    Err(GalleryError::InvalidUrl {
        input: input.to_string(),
    })
}
