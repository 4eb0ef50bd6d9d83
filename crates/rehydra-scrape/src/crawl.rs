//! Sequential thread crawl.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use rehydra_core::Post;
use scraper::Html;
use tracing::{debug, info};
use url::Url;

use crate::client::PageClient;
use crate::error::{Error, Result};
use crate::{extract, paginate};

/// Knobs governing a crawl.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Delay between page fetches.
    pub sleep: Duration,
    /// Hard cap on pages fetched per thread.
    pub max_pages: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            sleep: Duration::from_secs(1),
            max_pages: 2000,
        }
    }
}

/// Crawls a thread from its first page and collects every post.
///
/// Pages are fetched one at a time with [`CrawlOptions::sleep`] between
/// requests. The crawl stops when there is no next-page link, a URL
/// repeats (cycle guard), or [`CrawlOptions::max_pages`] is reached. If a
/// later page carries a post number already seen, the later page wins.
///
/// # Errors
///
/// Fails on an unparseable thread URL, or when any page fetch still
/// fails after retries.
pub async fn crawl_thread(
    client: &PageClient,
    thread_url: &str,
    opts: &CrawlOptions,
) -> Result<BTreeMap<i64, Post>> {
    let mut url = Url::parse(thread_url).map_err(|source| Error::InvalidUrl {
        url: thread_url.to_string(),
        source,
    })?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut posts: BTreeMap<i64, Post> = BTreeMap::new();
    let mut pages = 0usize;

    while pages < opts.max_pages && seen.insert(url.to_string()) {
        pages += 1;
        debug!(page = pages, %url, "fetching thread page");

        let html = client.fetch_page(&url).await?;

        // Parse synchronously and drop the DOM before the next await.
        let next = {
            let doc = Html::parse_document(&html);
            posts.extend(extract::extract_posts(&doc));
            paginate::find_next_url(&url, &doc)
        };

        match next {
            Some(next) => {
                tokio::time::sleep(opts.sleep).await;
                url = next;
            }
            None => break,
        }
    }

    info!(pages, posts = posts.len(), "thread crawl complete");
    Ok(posts)
}
