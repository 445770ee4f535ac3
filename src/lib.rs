//! Scrapes an Instagram account through the inkphy.com profile mirror: pages through
//! the feed with a headless browser, extracts post metadata, downloads the pictures and
//! writes the metadata to CSV.

pub mod browser;
pub mod config;
pub mod csv_writer;
pub mod error;
pub mod extractor;
pub mod images;
pub mod models;
pub mod output;
pub mod pagination;
pub mod scraper;

pub use crate::config::{ScraperConfig, Selectors};
pub use crate::error::ScrapeError;
pub use crate::models::{Post, ScrapeReport};
pub use crate::scraper::InkphyScraper;
