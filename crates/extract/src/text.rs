//! Text normalisation helpers shared by the heuristics.

use crate::consts;

/// Collapses every whitespace run into a single space and trims the ends.
pub(crate) fn collapse(text: &str) -> String {
    consts::WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}

/// Cuts `text` at the first character that ends a name.
pub(crate) fn until_terminator(text: &str) -> &str {
    text.find(consts::NAME_TERMINATORS).map_or(text, |end| &text[..end])
}

/// Number of characters (not bytes).
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The first `max` characters of `text`, cut on a char boundary.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    text.char_indices().nth(max).map_or(text, |(end, _)| text[..end].trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(collapse("  Dune \n\t by   Frank\u{a0}Herbert "), "Dune by Frank Herbert");
    }

    #[test]
    fn stops_at_terminators() {
        assert_eq!(until_terminator("Frank Herbert · 1965"), "Frank Herbert ");
        assert_eq!(until_terminator("Frank Herbert"), "Frank Herbert");
    }

    #[test]
    fn truncates_on_characters() {
        assert_eq!(truncate_chars("Émile Zola", 5), "Émile");
        assert_eq!(truncate_chars("Émile Zola", 6), "Émile");
        assert_eq!(truncate_chars("Zola", 10), "Zola");
    }

    #[test]
    fn counts_characters() {
        assert_eq!(char_len("Émile"), 5);
    }
}
