//! Post extraction from thread page HTML.
//!
//! Forum pages mark each post with `div id="post-<n>"`, where `<n>` is the
//! visible post number (`#1`, `#2`, ...). The post body lives in a nested
//! `div.post-contents`. Author markup varies across site skins, so the
//! author token is recovered heuristically and used only for speaker
//! mapping, never emitted.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use rehydra_core::Post;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

#[allow(clippy::unwrap_used)]
static POST_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^post-(\d+)$").unwrap());

#[allow(clippy::unwrap_used)]
static AUTHOR_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(nick|author|user)").unwrap());

#[allow(clippy::unwrap_used)]
static HEADER_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(post-header|post-info|post-meta)").unwrap());

#[allow(clippy::unwrap_used)]
static POST_DIV_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[id^="post-"]"#).unwrap());

#[allow(clippy::unwrap_used)]
static CONTENTS_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.post-contents").unwrap());

#[allow(clippy::unwrap_used)]
static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Extracts every post on a page, keyed by post number.
///
/// Divs whose id does not match `post-<digits>` exactly, or which have no
/// `post-contents` body, are skipped.
pub fn extract_posts(doc: &Html) -> BTreeMap<i64, Post> {
    let mut posts = BTreeMap::new();

    for div in doc.select(&POST_DIV_SEL) {
        let Some(number) = div
            .value()
            .attr("id")
            .and_then(|id| POST_ID_RE.captures(id))
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<i64>().ok())
        else {
            continue;
        };

        let Some(contents) = div.select(&CONTENTS_SEL).next() else {
            continue;
        };

        // Newline-separate text nodes so block boundaries survive until
        // normalization.
        let text = contents
            .text()
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        let author = find_author(div);

        posts.insert(
            number,
            Post {
                number,
                author,
                text,
            },
        );
    }

    debug!(count = posts.len(), "extracted posts on page");
    posts
}

/// Recovers an author token from a post div.
///
/// Priority:
/// 1. The first descendant whose class mentions `nick`, `author`, or
///    `user` (site skins disagree on which).
/// 2. The first non-empty link text inside a header/info/meta section.
///
/// Returns an empty token when neither matches.
fn find_author(post: ElementRef<'_>) -> String {
    let first_match = post
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.id() != post.id())
        .find(|el| {
            el.value()
                .attr("class")
                .is_some_and(|class| AUTHOR_CLASS_RE.is_match(class))
        });
    if let Some(el) = first_match {
        let author = visible_text(el);
        if !author.is_empty() {
            return author;
        }
    }

    let header = post
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.id() != post.id())
        .find(|el| {
            el.value()
                .attr("class")
                .is_some_and(|class| HEADER_CLASS_RE.is_match(class))
        });
    if let Some(header) = header {
        for anchor in header.select(&ANCHOR_SEL) {
            let text = visible_text(anchor);
            if !text.is_empty() {
                return text;
            }
        }
    }

    String::new()
}

/// Collects an element's text nodes into a single space-separated string.
pub(crate) fn visible_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
