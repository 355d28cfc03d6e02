//! Single-image download.
//!
//! Streams one GET response into a file named by the URL's trailing path
//! segment. The file is created before the transfer starts, so a failed
//! transfer leaves a partial file behind.

use crate::error::GalleryError;
use crate::fetch::{self, HttpOptions};
use crate::url_model;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Downloads `image_url` into `dir`, named by the URL's final path segment.
///
/// An existing file with that name is truncated and overwritten.
pub fn download(image_url: &str, dir: &Path, http: &HttpOptions) -> Result<(), GalleryError> {
    let filename = url_model::filename_of(image_url)?;
    let path = dir.join(&filename);
    let mut file = File::create(&path)?;

    let mut easy = fetch::get_handle(image_url, http)?;
    let mut write_err: Option<std::io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => Ok(data.len()),
            Err(err) => {
                write_err = Some(err);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Err(err) = performed {
        // A short write aborts the transfer; surface the file error, not
        // curl's generic write-callback failure.
        if let Some(io_err) = write_err {
            return Err(GalleryError::FileSystem(io_err));
        }
        return Err(GalleryError::Network(err));
    }

    let code = easy.response_code()?;
    if code < 200 || code >= 300 {
        return Err(GalleryError::from_status(image_url, code));
    }
    Ok(())
}
