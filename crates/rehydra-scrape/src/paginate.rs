//! Next-page resolution for paginated threads.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::extract::visible_text;

#[allow(clippy::unwrap_used)]
static REL_NEXT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[rel~="next"]"#).unwrap());

#[allow(clippy::unwrap_used)]
static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

#[allow(clippy::unwrap_used)]
static TRAILING_PAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/(\d+)$").unwrap());

/// Label of the forum's next-page button.
const NEXT_LABEL: &str = "siguiente";

/// Finds the URL of the page after `current`, if any.
///
/// Resolution priority:
/// 1. `<a rel="next" href=...>`
/// 2. An anchor whose visible text is the next-page label
/// 3. Pagination fallback: among anchors whose path ends in `/<n>`, the
///    smallest page number strictly greater than the current page
///
/// Relative hrefs are resolved against `current`. Returns `None` when the
/// thread has no further pages.
pub fn find_next_url(current: &Url, doc: &Html) -> Option<Url> {
    if let Some(anchor) = doc.select(&REL_NEXT_SEL).next()
        && let Some(next) = anchor
            .value()
            .attr("href")
            .and_then(|href| normalize_href(current, href))
    {
        debug!(%next, "next page via rel=next");
        return Some(next);
    }

    for anchor in doc.select(&ANCHOR_SEL) {
        if visible_text(anchor).to_lowercase() == NEXT_LABEL
            && let Some(next) = anchor
                .value()
                .attr("href")
                .and_then(|href| normalize_href(current, href))
        {
            debug!(%next, "next page via label");
            return Some(next);
        }
    }

    let current_page = trailing_page(current.path()).unwrap_or(1);

    let mut candidates: BTreeMap<u64, Url> = BTreeMap::new();
    for anchor in doc.select(&ANCHOR_SEL) {
        let Some(absolute) = anchor
            .value()
            .attr("href")
            .and_then(|href| normalize_href(current, href))
        else {
            continue;
        };
        if let Some(page) = trailing_page(absolute.path()) {
            candidates.insert(page, absolute);
        }
    }

    if let Some((page, next)) = candidates.range(current_page + 1..).next() {
        debug!(current_page, page, %next, "next page via pagination fallback");
        return Some(next.clone());
    }

    debug!("no next page link found");
    None
}

/// Parses the page number from a URL path that ends in `/<digits>`.
fn trailing_page(path: &str) -> Option<u64> {
    TRAILING_PAGE_RE
        .captures(path.trim_end_matches('/'))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Resolves an href against the current URL, discarding blanks.
fn normalize_href(current: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    current.join(href).ok()
}
