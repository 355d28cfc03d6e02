//! Content-delivery subdomain resolution.
//!
//! Image fragments scraped from a reader page point at a placeholder
//! subdomain; the real frontend is chosen from a digit embedded in the image
//! path. The mapping is deterministic, so a given image always resolves to
//! the same host.

use crate::config::HgdConfig;
use regex::Regex;
use std::sync::LazyLock;

/// Digit that selects the frontend: the last digit of the first all-numeric
/// path segment, i.e. the one just before its closing slash.
static GALLERY_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/\d*(\d)/").unwrap());

/// Subdomain part of a scraped fragment: `//<1-2 chars>.hitomi.la/`.
static SUBDOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//..?\.hitomi\.la/").unwrap());

/// Maps a gallery digit to a frontend letter: `'a' + (digit % frontend_count)`.
/// Adaptive mode overrides the letter with `"0"`.
fn letter_from_digit(g: u32, cfg: &HgdConfig) -> String {
    if cfg.adaptive_mode {
        return "0".to_string();
    }
    let o = g % cfg.frontend_count.max(1);
    char::from(b'a' + o as u8).to_string()
}

/// Resolves the subdomain prefix for an image URL fragment.
///
/// `base` replaces the default `"a"` when non-empty. When the fragment holds
/// a frontend digit, its letter is prepended to that default; digit `1` is an
/// alias of `0`. A fragment without a digit resolves to the default alone.
pub fn resolve_subdomain(fragment: &str, base: &str, cfg: &HgdConfig) -> String {
    let default = if base.is_empty() { "a" } else { base };

    let Some(caps) = GALLERY_DIGIT_RE.captures(fragment) else {
        return default.to_string();
    };
    let Ok(mut g) = caps[1].parse::<u32>() else {
        return default.to_string();
    };
    if g == 1 {
        g = 0;
    }

    format!("{}{}", letter_from_digit(g, cfg), default)
}

/// Rewrites a scraped image fragment to its resolved frontend URL.
///
/// Replaces the first `//<1-2 chars>.hitomi.la/` occurrence (the pattern
/// occurs once per fragment) with the resolved subdomain and prepends
/// `https:`. A fragment without the pattern gains only the scheme.
pub fn rewrite_image_url(fragment: &str, base: &str, cfg: &HgdConfig) -> String {
    let replacement = format!("//{}.hitomi.la/", resolve_subdomain(fragment, base, cfg));
    format!(
        "https:{}",
        SUBDOMAIN_RE.replace(fragment, replacement.as_str())
    )
}
