//! CLI for the hgd gallery downloader.

use anyhow::{Context, Result};
use clap::Parser;
use hgd_core::config;
use hgd_core::driver;

/// Top-level CLI for the hgd gallery downloader.
#[derive(Debug, Parser)]
#[command(name = "hgd")]
#[command(about = "hgd: sequential hitomi.la gallery downloader", long_about = None)]
pub struct Cli {
    /// Gallery or reader page URL to download.
    pub url: String,

    /// Seconds to wait between successful downloads (fractional allowed).
    #[arg(long, default_value_t = 1.0, value_name = "SECS")]
    pub interval: f64,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let download_dir = std::env::current_dir()?;
        let downloaded = driver::run(&cli.url, &download_dir, cli.interval, &cfg)
            .with_context(|| format!("downloading {}", cli.url))?;
        tracing::info!(downloaded, "run finished");
        Ok(())
    }
}
