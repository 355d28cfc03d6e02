pub mod config;
pub mod logging;

pub mod download;
pub mod driver;
pub mod error;
pub mod fetch;
pub mod queue;
pub mod reader_url;
pub mod retry;
pub mod scrape;
pub mod subdomain;
pub mod url_model;
