//! Syllable tokenizer in the style of the SAPS name-matching algorithm (Ruibin & Yun, 2005).
//!
//! Input is segmented into word-character runs and punctuation runs; punctuation runs are
//! emitted unchanged. Rules, applied per word:
//! - an uppercase letter (other than the first) starts a new segment;
//! - within a segment, each vowel run opens a syllable at the character just before it, so a
//!   lone consonant between vowels goes right (`V|CV`) and a cluster is split before its last
//!   consonant (`VC|CV`);
//! - trailing consonants stay with the last syllable.

use super::regexp::WORDPUNCT;
use super::{Tokenizer, Tokens};
use crate::scaler::Scaler;

const VOWELS: &str = "aeiouyAEIOUY";

/// SAPS-style syllable tokenizer.
#[derive(Debug, Clone, Default)]
pub struct SapsTokenizer {
    scaler: Scaler,
}

impl SapsTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scaler.
    pub fn with_scaler(mut self, scaler: Scaler) -> Self {
        self.scaler = scaler;
        self
    }
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

fn syllables(segment: &[char], out: &mut Vec<String>) {
    let mut starts = vec![0usize];
    for i in 0..segment.len() {
        let run_start = is_vowel(segment[i]) && (i == 0 || !is_vowel(segment[i - 1]));
        if !run_start || i == 0 {
            continue;
        }
        let start = i - 1;
        if starts.last().is_some_and(|&last| start > last) {
            starts.push(start);
        }
    }
    for (k, &s) in starts.iter().enumerate() {
        let e = starts.get(k + 1).copied().unwrap_or(segment.len());
        out.push(segment[s..e].iter().collect());
    }
}

impl Tokenizer for SapsTokenizer {
    fn tokenize(&self, s: &str) -> Tokens {
        let mut ordered = Vec::new();
        for m in WORDPUNCT.find_iter(s) {
            let word = m.as_str();
            if !word.chars().any(char::is_alphanumeric) {
                ordered.push(word.to_string());
                continue;
            }
            let chars: Vec<char> = word.chars().collect();
            let mut seg_start = 0;
            for i in 1..chars.len() {
                if chars[i].is_uppercase() {
                    syllables(&chars[seg_start..i], &mut ordered);
                    seg_start = i;
                }
            }
            syllables(&chars[seg_start..], &mut ordered);
        }
        Tokens::from_ordered(ordered, &self.scaler)
    }

    fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    fn name(&self) -> &'static str {
        "saps"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllabifies_between_vowels() {
        let t = SapsTokenizer::new();
        assert_eq!(t.tokenize("character").get_list(), &["c", "ha", "rac", "ter"]);
        assert_eq!(t.tokenize("apple").get_list(), &["app", "le"]);
    }

    #[test]
    fn uppercase_opens_segment() {
        let t = SapsTokenizer::new();
        assert_eq!(t.tokenize("McDonald").get_list(), &["Mc", "Do", "nald"]);
        assert_eq!(t.tokenize("Anne Marie").get_list(), &["An", "ne", "Ma", "rie"]);
    }

    #[test]
    fn punctuation_is_its_own_token() {
        let t = SapsTokenizer::new();
        assert_eq!(
            t.tokenize("seven-twelfths").get_list(),
            &["se", "ven", "-", "t", "welfths"]
        );
        assert_eq!(t.tokenize("O'Neil!").get_list(), &["O", "'", "Neil", "!"]);
    }
}
