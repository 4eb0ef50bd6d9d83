//! Scraped post representation.

/// A single post as observed on a thread page.
///
/// The author token is internal only; it feeds the per-thread
/// [`SpeakerMap`](crate::speaker::SpeakerMap) and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Visible post number within the thread (`#1`, `#2`, ...).
    pub number: i64,
    /// Raw author token as observed on the page; may be empty.
    pub author: String,
    /// Raw text of the post body, before normalization.
    pub text: String,
}
