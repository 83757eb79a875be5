//! Whitespace tokenizer

use super::token::Token;

/// Split `source` into whitespace-delimited tokens.
///
/// Whitespace is anything `char::is_whitespace` accepts. Offsets are in
/// characters. Empty or all-whitespace input yields no tokens.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    // (char offset, byte offset) of the run in progress
    let mut run: Option<(usize, usize)> = None;
    let mut char_len = 0;

    for (idx, (byte_idx, c)) in source.char_indices().enumerate() {
        char_len = idx + 1;
        if c.is_whitespace() {
            if let Some((start, byte_start)) = run.take() {
                tokens.push(Token::new(start, idx, &source[byte_start..byte_idx]));
            }
        } else if run.is_none() {
            run = Some((idx, byte_idx));
        }
    }

    if let Some((start, byte_start)) = run {
        tokens.push(Token::new(start, char_len, &source[byte_start..]));
    }

    tokens
}

/// Maps character offsets to byte offsets within a source string.
///
/// ASCII sources map one-to-one and allocate nothing.
#[derive(Debug)]
pub(crate) struct CharOffsets<'a> {
    source: &'a str,
    byte_offsets: Option<Vec<usize>>,
}

impl<'a> CharOffsets<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        let byte_offsets = if source.is_ascii() {
            None
        } else {
            Some(
                source
                    .char_indices()
                    .map(|(b, _)| b)
                    .chain(std::iter::once(source.len()))
                    .collect(),
            )
        };
        Self {
            source,
            byte_offsets,
        }
    }

    /// Number of characters in the source
    pub(crate) fn char_len(&self) -> usize {
        match &self.byte_offsets {
            None => self.source.len(),
            Some(offsets) => offsets.len() - 1,
        }
    }

    /// Byte offset of a character offset, clamped to the end of the source
    pub(crate) fn byte_offset(&self, char_offset: usize) -> usize {
        match &self.byte_offsets {
            None => char_offset.min(self.source.len()),
            Some(offsets) => offsets
                .get(char_offset)
                .copied()
                .unwrap_or(self.source.len()),
        }
    }

    /// Slice by character offsets. Out-of-range or reversed bounds give
    /// an empty or truncated slice rather than a panic.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        let end = self.byte_offset(end);
        let start = self.byte_offset(start).min(end);
        &self.source[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(tokenize(""), vec![]);
        assert_eq!(tokenize(" "), vec![]);
        assert_eq!(tokenize(" \n\t "), vec![]);
    }

    #[test]
    fn test_tokenize_single() {
        assert_eq!(tokenize("a"), vec![Token::new(0, 1, "a")]);
        assert_eq!(tokenize("abc"), vec![Token::new(0, 3, "abc")]);
    }

    #[test]
    fn test_tokenize_words() {
        assert_eq!(
            tokenize("alex garcia"),
            vec![Token::new(0, 4, "alex"), Token::new(5, 11, "garcia")]
        );
    }

    #[test]
    fn test_tokenize_surrounding_whitespace() {
        assert_eq!(
            tokenize("  a  b\n"),
            vec![Token::new(2, 3, "a"), Token::new(5, 6, "b")]
        );
    }

    #[test]
    fn test_tokenize_char_offsets() {
        // offsets count characters, not bytes
        assert_eq!(
            tokenize("héllo wörld"),
            vec![Token::new(0, 5, "héllo"), Token::new(6, 11, "wörld")]
        );
        assert_eq!(
            tokenize("🎉 #party"),
            vec![Token::new(0, 1, "🎉"), Token::new(2, 8, "#party")]
        );
    }

    #[test]
    fn test_tokenize_unicode_whitespace() {
        // no-break space and ideographic space separate tokens
        assert_eq!(
            tokenize("a\u{00A0}b\u{3000}c"),
            vec![
                Token::new(0, 1, "a"),
                Token::new(2, 3, "b"),
                Token::new(4, 5, "c"),
            ]
        );
    }

    #[test]
    fn test_char_offsets_ascii() {
        let offsets = CharOffsets::new("hello world");
        assert_eq!(offsets.char_len(), 11);
        assert_eq!(offsets.slice(6, 11), "world");
        assert_eq!(offsets.slice(6, 100), "world");
        assert_eq!(offsets.slice(8, 2), "");
    }

    #[test]
    fn test_char_offsets_multibyte() {
        let offsets = CharOffsets::new("日本 語");
        assert_eq!(offsets.char_len(), 4);
        assert_eq!(offsets.slice(0, 2), "日本");
        assert_eq!(offsets.slice(2, 4), " 語");
        assert_eq!(offsets.byte_offset(4), "日本 語".len());
    }
}
