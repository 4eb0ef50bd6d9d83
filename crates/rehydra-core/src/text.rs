//! Post text normalization.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::unwrap_used)]
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalizes scraped post text for corpus output.
///
/// Carriage returns are folded into line feeds, then every whitespace run
/// (including the line feeds) collapses to a single space and the result
/// is trimmed. Markup-induced layout never survives into the corpus; a
/// post that was only whitespace comes back as the empty string.
///
/// # Example
///
/// ```rust
/// use rehydra_core::text::clean_text;
///
/// assert_eq!(clean_text("  hola\r\n  mundo \n"), "hola mundo");
/// assert_eq!(clean_text("\n \t "), "");
/// ```
pub fn clean_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    WS_RE.replace_all(&unified, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_interior_whitespace() {
        assert_eq!(clean_text("a  b\t\tc\n\nd"), "a b c d");
    }

    #[test]
    fn test_unifies_carriage_returns() {
        assert_eq!(clean_text("line1\r\nline2\rline3"), "line1 line2 line3");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \r\n \t "), "");
    }

    #[test]
    fn test_preserves_unicode_content() {
        assert_eq!(clean_text("  ¿qué   tal?  "), "¿qué tal?");
    }
}
