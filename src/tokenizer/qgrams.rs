//! Q-gram (character n-gram) tokenizer, with optional skip-grams and start/stop padding.

use super::{Tokenizer, Tokens};
use crate::scaler::Scaler;
use crate::Error;

/// Overlapping character q-grams.
///
/// For each `q` in `qvals` and each `k` in `skips`, the (optionally padded) string yields every
/// q-gram formed from characters `k + 1` apart. With the default configuration (`q = 2`,
/// padding `$`/`#`, no skips) `"cat"` becomes `$c ca at t#`.
#[derive(Debug, Clone)]
pub struct QGrams {
    qvals: Vec<usize>,
    start_stop: Option<(char, char)>,
    skips: Vec<usize>,
    scaler: Scaler,
}

impl Default for QGrams {
    fn default() -> Self {
        Self::new()
    }
}

impl QGrams {
    /// Bigrams with `$`/`#` padding and no scaling.
    pub fn new() -> Self {
        Self {
            qvals: vec![2],
            start_stop: Some(('$', '#')),
            skips: vec![0],
            scaler: Scaler::None,
        }
    }

    /// Single q-gram length.
    pub fn with_qval(qval: usize) -> Result<Self, Error> {
        Self::new().qvals(vec![qval])
    }

    /// Replace the q-gram lengths (all must be >= 1).
    pub fn qvals(mut self, qvals: Vec<usize>) -> Result<Self, Error> {
        if qvals.is_empty() {
            return Err(Error::InvalidTokenizer("qval list must not be empty"));
        }
        if qvals.contains(&0) {
            return Err(Error::InvalidTokenizer("qval must be >= 1"));
        }
        self.qvals = qvals;
        Ok(self)
    }

    /// Replace the skip distances.
    pub fn skips(mut self, skips: Vec<usize>) -> Result<Self, Error> {
        if skips.is_empty() {
            return Err(Error::InvalidTokenizer("skip list must not be empty"));
        }
        self.skips = skips;
        Ok(self)
    }

    /// Set (or with `None`, disable) the start/stop padding symbols.
    pub fn start_stop(mut self, start_stop: Option<(char, char)>) -> Self {
        self.start_stop = start_stop;
        self
    }

    /// Replace the scaler.
    pub fn with_scaler(mut self, scaler: Scaler) -> Self {
        self.scaler = scaler;
        self
    }

    fn grams(&self, s: &str) -> Vec<String> {
        let mut out = Vec::new();
        if s.is_empty() {
            return out;
        }
        let chars: Vec<char> = s.chars().collect();
        for &q in &self.qvals {
            let padded: Vec<char> = match self.start_stop {
                Some((start, stop)) if q > 1 => std::iter::repeat(start)
                    .take(q - 1)
                    .chain(chars.iter().copied())
                    .chain(std::iter::repeat(stop).take(q - 1))
                    .collect(),
                _ => chars.clone(),
            };
            for &skip in &self.skips {
                let stride = skip + 1;
                let span = (q - 1) * stride + 1;
                if padded.len() < span {
                    continue;
                }
                for i in 0..=(padded.len() - span) {
                    out.push((0..q).map(|j| padded[i + j * stride]).collect());
                }
            }
        }
        out
    }
}

impl Tokenizer for QGrams {
    fn tokenize(&self, s: &str) -> Tokens {
        Tokens::from_ordered(self.grams(s), &self.scaler)
    }

    fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    fn qvals(&self) -> &[usize] {
        &self.qvals
    }

    fn name(&self) -> &'static str {
        "qgrams"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_bigrams() {
        let toks = QGrams::new().tokenize("cat");
        assert_eq!(toks.get_list(), &["$c", "ca", "at", "t#"]);
    }

    #[test]
    fn unpadded_trigrams_of_short_input() {
        let q = QGrams::with_qval(3).unwrap().start_stop(None);
        assert_eq!(q.tokenize("abcd").get_list(), &["abc", "bcd"]);
        assert!(q.tokenize("ab").is_empty());
    }

    #[test]
    fn unigrams_ignore_padding() {
        let q = QGrams::with_qval(1).unwrap();
        assert_eq!(q.tokenize("aba").get_counter().get("a"), 2.0);
        assert_eq!(q.tokenize("aba").get_list().len(), 3);
    }

    #[test]
    fn skip_grams() {
        let q = QGrams::new().start_stop(None).skips(vec![0, 1]).unwrap();
        assert_eq!(q.tokenize("abcd").get_list(), &["ab", "bc", "cd", "ac", "bd"]);
    }

    #[test]
    fn multiple_qvals_are_reported() {
        let q = QGrams::new().qvals(vec![1, 2]).unwrap();
        assert_eq!(Tokenizer::qvals(&q), &[1, 2]);
        assert_eq!(q.tokenize("ab").get_list(), &["a", "b", "$a", "ab", "b#"]);
    }

    #[test]
    fn invalid_qval() {
        assert!(matches!(
            QGrams::with_qval(0),
            Err(Error::InvalidTokenizer(_))
        ));
    }
}
