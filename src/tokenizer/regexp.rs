//! Regular-expression tokenizers.

use super::{Tokenizer, Tokens};
use crate::scaler::Scaler;
use crate::Error;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+").expect("whitespace pattern is valid"));

pub(crate) static WORDPUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\w\s]+").expect("wordpunct pattern is valid"));

/// Tokens are the non-overlapping matches of a pattern.
#[derive(Debug, Clone)]
pub struct RegexpTokenizer {
    pattern: Regex,
    scaler: Scaler,
}

impl RegexpTokenizer {
    /// Compile `pattern` (case-sensitive).
    pub fn new(pattern: &str) -> Result<Self, Error> {
        Self::with_flags(pattern, false)
    }

    /// Compile `pattern`, optionally case-insensitive.
    pub fn with_flags(pattern: &str, case_insensitive: bool) -> Result<Self, Error> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(Self {
            pattern,
            scaler: Scaler::None,
        })
    }

    fn from_regex(pattern: Regex) -> Self {
        Self {
            pattern,
            scaler: Scaler::None,
        }
    }

    /// Replace the scaler.
    pub fn with_scaler(mut self, scaler: Scaler) -> Self {
        self.scaler = scaler;
        self
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    fn split(&self, s: &str) -> Vec<String> {
        self.pattern
            .find_iter(s)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Tokenizer for RegexpTokenizer {
    fn tokenize(&self, s: &str) -> Tokens {
        Tokens::from_ordered(self.split(s), &self.scaler)
    }

    fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    fn name(&self) -> &'static str {
        "regexp"
    }
}

/// Tokens are runs of non-whitespace (`\S+`).
#[derive(Debug, Clone)]
pub struct WhitespaceTokenizer(RegexpTokenizer);

impl WhitespaceTokenizer {
    /// Create a whitespace tokenizer with no scaling.
    pub fn new() -> Self {
        Self(RegexpTokenizer::from_regex(WHITESPACE.clone()))
    }

    /// Compile the whitespace pattern with explicit flags.
    pub fn with_flags(case_insensitive: bool) -> Result<Self, Error> {
        RegexpTokenizer::with_flags(WHITESPACE.as_str(), case_insensitive).map(Self)
    }

    /// Replace the scaler.
    pub fn with_scaler(self, scaler: Scaler) -> Self {
        Self(self.0.with_scaler(scaler))
    }
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, s: &str) -> Tokens {
        self.0.tokenize(s)
    }

    fn scaler(&self) -> &Scaler {
        self.0.scaler()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Tokens are word-character runs or runs of punctuation (`\w+|[^\w\s]+`).
#[derive(Debug, Clone)]
pub struct WordpunctTokenizer(RegexpTokenizer);

impl WordpunctTokenizer {
    /// Create a word/punctuation tokenizer with no scaling.
    pub fn new() -> Self {
        Self(RegexpTokenizer::from_regex(WORDPUNCT.clone()))
    }

    /// Replace the scaler.
    pub fn with_scaler(self, scaler: Scaler) -> Self {
        Self(self.0.with_scaler(scaler))
    }
}

impl Default for WordpunctTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for WordpunctTokenizer {
    fn tokenize(&self, s: &str) -> Tokens {
        self.0.tokenize(s)
    }

    fn scaler(&self) -> &Scaler {
        self.0.scaler()
    }

    fn name(&self) -> &'static str {
        "wordpunct"
    }
}
