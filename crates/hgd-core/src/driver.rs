//! Sequential download driver.
//!
//! Scrapes the gallery once, then drains the queue front to back. A failed
//! download retries the same image per the retry policy; a successful one is
//! paced by the configured interval. Progress goes to stdout, interleaved
//! with in-loop errors; structured logging runs alongside.

use crate::config::HgdConfig;
use crate::download;
use crate::error::GalleryError;
use crate::fetch::HttpOptions;
use crate::queue::DownloadQueue;
use crate::retry::{RetryDecision, RetryPolicy};
use crate::scrape;
use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

/// Downloads every image of `input_url`'s gallery into `dir`.
///
/// Returns the number of images downloaded. Classification and scrape
/// failures abort immediately; download failures retry per the configured
/// policy, forever by default.
pub fn run(
    input_url: &str,
    dir: &Path,
    interval_secs: f64,
    cfg: &HgdConfig,
) -> Result<usize, GalleryError> {
    print!("Scraping {input_url}...");
    io::stdout().flush().ok();
    let urls = scrape::image_list(input_url, cfg)?;
    println!("done");
    println!("Found {} images.", urls.len());
    tracing::info!(gallery = input_url, images = urls.len(), "scrape complete");

    drain_queue(urls, dir, interval_secs, cfg)
}

/// Converts the pacing interval into an optional sleep duration.
///
/// Zero and negative intervals disable pacing; NaN, infinite, and
/// overflowing intervals are rejected before any download starts.
fn pacing_interval(secs: f64) -> Result<Option<Duration>, GalleryError> {
    if secs <= 0.0 {
        return Ok(None);
    }
    match Duration::try_from_secs_f64(secs) {
        Ok(pause) => Ok(Some(pause)),
        Err(_) => Err(GalleryError::InvalidInterval { secs }),
    }
}

/// Drains `urls` front to back into `dir`.
///
/// The front item advances only on success; a failure records the attempt
/// and consults the retry policy. Bounded policies abort the run with the
/// last error once the front item's attempts are exhausted. An interval
/// that cannot be expressed as a sleep duration is rejected before the
/// first download.
pub fn drain_queue(
    urls: Vec<String>,
    dir: &Path,
    interval_secs: f64,
    cfg: &HgdConfig,
) -> Result<usize, GalleryError> {
    let pacing = pacing_interval(interval_secs)?;
    let http = HttpOptions::from_config(cfg);
    let policy = RetryPolicy::from_config(cfg.retry.as_ref());
    let mut queue = DownloadQueue::new(urls);

    while let Some(item) = queue.peek() {
        let url = item.url.clone();
        print!("Downloading {url}...");
        io::stdout().flush().ok();

        match download::download(&url, dir, &http) {
            Ok(()) => {
                println!("done");
                tracing::debug!(url = %url, "download complete");
                queue.mark_done();
                if let Some(pause) = pacing {
                    print!("Waiting for {interval_secs} seconds...");
                    io::stdout().flush().ok();
                    thread::sleep(pause);
                    println!("OK.");
                }
            }
            Err(err) => {
                println!("{err}");
                println!("Retry...");
                let attempt = queue.record_failure();
                if err.is_rate_limit() {
                    tracing::warn!(url = %url, attempt, "browsing limit reached");
                } else {
                    tracing::warn!(url = %url, attempt, error = %err, "download failed");
                }
                match policy.decide(attempt) {
                    RetryDecision::RetryAfter(delay) => {
                        if !delay.is_zero() {
                            thread::sleep(delay);
                        }
                    }
                    RetryDecision::NoRetry => {
                        tracing::error!(url = %url, attempt, "retry attempts exhausted");
                        return Err(err);
                    }
                }
            }
        }
    }

    tracing::info!(downloaded = queue.completed(), "queue drained");
    Ok(queue.completed())
}
