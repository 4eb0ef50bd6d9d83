//! # rehydra-scrape
//!
//! Thread crawling and post extraction for Rehydra.
//!
//! This crate covers everything between a thread URL and a map of scraped
//! posts:
//! - Polite HTTP fetching (mandatory User-Agent, timeout, backoff retry)
//! - Post extraction from page HTML
//! - Next-page resolution across the thread's pagination
//! - The sequential crawl loop with delay, page cap, and cycle guard

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod client;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod paginate;

pub use client::PageClient;
pub use crawl::{CrawlOptions, crawl_thread};
pub use error::{Error, Result};
pub use extract::extract_posts;
pub use paginate::find_next_url;
