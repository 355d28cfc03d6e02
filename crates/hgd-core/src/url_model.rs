//! Filename derivation from image URLs.
//!
//! Downloads are named by the final path segment of the resolved image URL;
//! there is no Content-Disposition handling and no subdirectory structure.

use crate::error::GalleryError;

/// Extracts the trailing path segment of `raw` for use as the local filename.
///
/// Fails with `InvalidUrl` when the URL does not parse and with `NoFilename`
/// when the trailing segment is empty or unusable (e.g. `https://host/` or a
/// path ending in `/`).
pub fn filename_of(raw: &str) -> Result<String, GalleryError> {
    let parsed = url::Url::parse(raw).map_err(|_| GalleryError::InvalidUrl {
        input: raw.to_string(),
    })?;
    let segment = parsed.path().rsplit('/').next().unwrap_or_default();
    if segment.is_empty() || segment == "." || segment == ".." {
        return Err(GalleryError::NoFilename {
            url: raw.to_string(),
        });
    }
    Ok(segment.to_string())
}
