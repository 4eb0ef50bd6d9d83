//! Anonymous speaker-letter assignment.
//!
//! Rehydrated output never contains usernames or handles. Instead, each
//! distinct author observed in a thread is assigned a letter label in
//! first-seen order: `A`, `B`, ... `Z`, `AA`, `AB`, and so on. The mapping
//! lives only in memory for the duration of a run.

use std::collections::HashMap;

/// Token used for posts whose author could not be determined.
///
/// All author-less posts collapse onto one label so that a thread full of
/// deleted accounts still reads as a single consistent speaker.
const UNKNOWN_AUTHOR: &str = "__unknown__";

/// Converts a zero-based index to a spreadsheet-style letter label.
///
/// `0` maps to `A`, `25` to `Z`, `26` to `AA`, and so on (bijective
/// base-26).
///
/// # Example
///
/// ```rust
/// use rehydra_core::speaker::index_to_letters;
///
/// assert_eq!(index_to_letters(0), "A");
/// assert_eq!(index_to_letters(25), "Z");
/// assert_eq!(index_to_letters(26), "AA");
/// ```
pub fn index_to_letters(index: usize) -> String {
    let mut i = index;
    let mut letters = Vec::new();
    loop {
        // rem < 26, so the cast and the addition cannot overflow.
        let rem = (i % 26) as u8;
        i /= 26;
        letters.push(char::from(b'A' + rem));
        if i == 0 {
            break;
        }
        i -= 1;
    }
    letters.iter().rev().collect()
}

/// Per-thread mapping from internal author tokens to speaker letters.
///
/// Letters are assigned densely in first-seen order, so a run over the
/// same pages always produces the same labels.
#[derive(Debug, Default)]
pub struct SpeakerMap {
    assignments: HashMap<String, String>,
}

impl SpeakerMap {
    /// Creates an empty speaker map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the letter for `author`, assigning the next free one if the
    /// author has not been seen before.
    ///
    /// Blank or whitespace-only authors collapse to a shared unknown token.
    pub fn assign(&mut self, author: &str) -> String {
        let token = {
            let trimmed = author.trim();
            if trimmed.is_empty() {
                UNKNOWN_AUTHOR
            } else {
                trimmed
            }
        };

        if let Some(label) = self.assignments.get(token) {
            return label.clone();
        }

        let label = index_to_letters(self.assignments.len());
        self.assignments.insert(token.to_string(), label.clone());
        label
    }

    /// Number of distinct authors assigned so far.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns `true` if no authors have been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_sequence() {
        assert_eq!(index_to_letters(0), "A");
        assert_eq!(index_to_letters(1), "B");
        assert_eq!(index_to_letters(25), "Z");
        assert_eq!(index_to_letters(26), "AA");
        assert_eq!(index_to_letters(27), "AB");
        assert_eq!(index_to_letters(51), "AZ");
        assert_eq!(index_to_letters(52), "BA");
        assert_eq!(index_to_letters(701), "ZZ");
        assert_eq!(index_to_letters(702), "AAA");
    }

    #[test]
    fn test_assign_is_stable() {
        let mut map = SpeakerMap::new();
        assert_eq!(map.assign("alice"), "A");
        assert_eq!(map.assign("bob"), "B");
        assert_eq!(map.assign("alice"), "A");
        assert_eq!(map.assign("carol"), "C");
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_blank_authors_share_one_label() {
        let mut map = SpeakerMap::new();
        assert_eq!(map.assign(""), "A");
        assert_eq!(map.assign("   "), "A");
        assert_eq!(map.assign("dave"), "B");
        assert_eq!(map.assign("\t"), "A");
    }

    #[test]
    fn test_author_tokens_are_trimmed() {
        let mut map = SpeakerMap::new();
        assert_eq!(map.assign(" erin "), "A");
        assert_eq!(map.assign("erin"), "A");
    }
}
