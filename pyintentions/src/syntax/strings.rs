//! Layout of a single string literal token: prefix, quotes and content.

use std::ops::Range;

/// Byte layout of one string literal's source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringParts {
    /// Prefix letters such as `r`, `b` or `u`.
    pub prefix: Range<usize>,
    /// The opening quote sequence: `"`, `'`, `"""` or `'''`.
    pub quote: &'static str,
    /// Everything between the quotes.
    pub content: Range<usize>,
}

impl StringParts {
    /// Splits the source text of a single, non-concatenated literal.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let prefix_len = text
            .find(['"', '\''])
            .filter(|&len| text[..len].chars().all(|c| c.is_ascii_alphabetic()))?;
        let body = &text[prefix_len..];
        let quote = ["\"\"\"", "'''", "\"", "'"]
            .into_iter()
            .find(|quote| body.starts_with(quote))?;
        let content_start = prefix_len + quote.len();
        let content_end = text.len().checked_sub(quote.len())?;
        if content_end < content_start || !text.ends_with(quote) {
            return None;
        }
        Some(Self {
            prefix: 0..prefix_len,
            quote,
            content: content_start..content_end,
        })
    }

    /// Quote character (`"` or `'`).
    #[must_use]
    pub fn quote_char(&self) -> char {
        if self.quote.starts_with('\'') {
            '\''
        } else {
            '"'
        }
    }

    #[must_use]
    pub fn is_triple_quoted(&self) -> bool {
        self.quote.len() == 3
    }

    /// Rebuilds the literal with new content, keeping prefix and quotes.
    #[must_use]
    pub fn rebuild(&self, text: &str, content: &str) -> String {
        format!(
            "{}{}{}{}",
            &text[self.prefix.clone()],
            self.quote,
            content,
            self.quote
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let parts = StringParts::parse("'Optional[int]'").unwrap();
        assert_eq!(parts.quote, "'");
        assert_eq!(parts.content, 1..14);
        assert_eq!(parts.quote_char(), '\'');
    }

    #[test]
    fn test_parse_prefixed_triple() {
        let text = r#"r"""a\b""""#;
        let parts = StringParts::parse(text).unwrap();
        assert_eq!(parts.prefix, 0..1);
        assert!(parts.is_triple_quoted());
        assert_eq!(&text[parts.content.clone()], r"a\b");
        assert_eq!(parts.rebuild(text, "c"), r#"r"""c""""#);
    }

    #[test]
    fn test_parse_empty() {
        let parts = StringParts::parse("\"\"").unwrap();
        assert_eq!(parts.content, 1..1);
        assert!(!parts.is_triple_quoted());
    }

    #[test]
    fn test_rejects_non_literal() {
        assert!(StringParts::parse("foo").is_none());
    }
}
