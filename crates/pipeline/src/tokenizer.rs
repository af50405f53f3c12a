//! Default word tokenizer.
//!
//! A token is a maximal run of word characters: Unicode letters, digits and
//! `_`. Everything else is a separator. Text is lower-cased before splitting
//! (when enabled) and tokens shorter than `min_token_len` characters are
//! dropped, so with the defaults "Sci-Fi, a 3D film" becomes
//! `["sci", "fi", "3d", "film"]`.

use crate::traits::Tokenizer;

/// Splits text on non-word characters
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    lowercase: bool,
    min_token_len: usize,
}

impl WordTokenizer {
    /// Create a tokenizer with the defaults (lower-casing on, tokens of 2+ chars)
    pub fn new() -> Self {
        Self {
            lowercase: true,
            min_token_len: 2,
        }
    }

    /// Configure case folding (default: true)
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Configure the minimum token length in characters (default: 2)
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    fn push_token(&self, tokens: &mut Vec<String>, token: &str) {
        if token.chars().count() >= self.min_token_len {
            tokens.push(token.to_string());
        }
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for WordTokenizer {
    fn name(&self) -> &str {
        "word"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let folded;
        let text = if self.lowercase {
            folded = text.to_lowercase();
            folded.as_str()
        } else {
            text
        };

        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (pos, c) in text.char_indices() {
            match (Self::is_word_char(c), start) {
                (true, None) => start = Some(pos),
                (false, Some(s)) => {
                    self.push_token(&mut tokens, &text[s..pos]);
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            self.push_token(&mut tokens, &text[s..]);
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_punctuation() {
        let tokenizer = WordTokenizer::new();
        assert_eq!(
            tokenizer.tokenize("Sci-Fi, a 3D film"),
            vec!["sci", "fi", "3d", "film"]
        );
    }

    #[test]
    fn test_drops_single_characters() {
        let tokenizer = WordTokenizer::new();
        assert_eq!(tokenizer.tokenize("a b cd e"), vec!["cd"]);
    }

    #[test]
    fn test_keeps_underscore_and_unicode() {
        let tokenizer = WordTokenizer::new();
        assert_eq!(
            tokenizer.tokenize("Amélie snake_case Björk"),
            vec!["amélie", "snake_case", "björk"]
        );
    }

    #[test]
    fn test_case_preserved_when_disabled() {
        let tokenizer = WordTokenizer::new().with_lowercase(false);
        assert_eq!(tokenizer.tokenize("James Cameron"), vec!["James", "Cameron"]);
    }

    #[test]
    fn test_min_token_len() {
        let tokenizer = WordTokenizer::new().with_min_token_len(1);
        assert_eq!(tokenizer.tokenize("a b"), vec!["a", "b"]);

        let tokenizer = WordTokenizer::new().with_min_token_len(4);
        assert_eq!(tokenizer.tokenize("the dark knight"), vec!["dark", "knight"]);
    }

    #[test]
    fn test_empty_and_separator_only() {
        let tokenizer = WordTokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("    ").is_empty());
        assert!(tokenizer.tokenize("-- !! ..").is_empty());
    }
}
