//! Consonant/vowel cluster tokenizers.
//!
//! Input is first segmented into word-character runs and punctuation runs. Each word is then
//! decomposed (NFD) and walked character by character; characters that are neither consonant
//! nor vowel (combining marks, digits, ...) attach to the current token. Finished tokens are
//! recomposed (NFC). The three tokenizers differ only in which class transition opens a new
//! token.

use super::regexp::WORDPUNCT;
use super::{Tokenizer, Tokens};
use crate::scaler::Scaler;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

const DEFAULT_CONSONANTS: &str = "bcdfghjklmnpqrstvwxzßBCDFGHJKLMNPQRSTVWXZ";
const DEFAULT_VOWELS: &str = "aeiouyAEIOUY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Start,
    Consonant,
    Vowel,
}

/// Which transition starts a new cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// vowel -> consonant (C*V* clusters)
    VowelToConsonant,
    /// consonant -> vowel (V*C* clusters)
    ConsonantToVowel,
    /// any change of class (C+ or V+ clusters)
    Either,
}

#[derive(Debug, Clone)]
struct ClusterWalker {
    consonants: HashSet<char>,
    vowels: HashSet<char>,
    scaler: Scaler,
}

impl ClusterWalker {
    fn new() -> Self {
        Self {
            consonants: DEFAULT_CONSONANTS.chars().collect(),
            vowels: DEFAULT_VOWELS.chars().collect(),
            scaler: Scaler::None,
        }
    }

    fn class(&self, c: char) -> Option<Class> {
        if self.consonants.contains(&c) {
            Some(Class::Consonant)
        } else if self.vowels.contains(&c) {
            Some(Class::Vowel)
        } else {
            None
        }
    }

    fn split_word(&self, word: &str, boundary: Boundary, out: &mut Vec<String>) {
        let mut mode = Class::Start;
        let mut current = String::new();
        for c in word.nfd() {
            let Some(class) = self.class(c) else {
                current.push(c);
                continue;
            };
            let opens = match boundary {
                Boundary::VowelToConsonant => mode == Class::Vowel && class == Class::Consonant,
                Boundary::ConsonantToVowel => mode == Class::Consonant && class == Class::Vowel,
                Boundary::Either => mode != Class::Start && mode != class,
            };
            if opens {
                out.push(std::mem::take(&mut current));
            }
            current.push(c);
            mode = class;
        }
        out.push(current);
    }

    fn tokenize(&self, s: &str, boundary: Boundary) -> Tokens {
        let mut ordered = Vec::new();
        for m in WORDPUNCT.find_iter(s) {
            let word = m.as_str();
            match word.chars().next() {
                Some(first) if self.class(first).is_some() => {
                    self.split_word(word, boundary, &mut ordered)
                }
                _ => ordered.push(word.to_string()),
            }
        }
        let ordered = ordered.into_iter().map(|t| t.nfc().collect()).collect();
        Tokens::from_ordered(ordered, &self.scaler)
    }
}

macro_rules! cluster_tokenizer {
    ($(#[$doc:meta])* $name:ident, $boundary:expr, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            walker: ClusterWalker,
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            /// Default Latin consonant/vowel sets (`ß` is a consonant, `y` a vowel).
            pub fn new() -> Self {
                Self {
                    walker: ClusterWalker::new(),
                }
            }

            /// Replace the consonant set.
            pub fn with_consonants(mut self, consonants: &str) -> Self {
                self.walker.consonants = consonants.chars().collect();
                self
            }

            /// Replace the vowel set.
            pub fn with_vowels(mut self, vowels: &str) -> Self {
                self.walker.vowels = vowels.chars().collect();
                self
            }

            /// Replace the scaler.
            pub fn with_scaler(mut self, scaler: Scaler) -> Self {
                self.walker.scaler = scaler;
                self
            }
        }

        impl Tokenizer for $name {
            fn tokenize(&self, s: &str) -> Tokens {
                self.walker.tokenize(s, $boundary)
            }

            fn scaler(&self) -> &Scaler {
                &self.walker.scaler
            }

            fn name(&self) -> &'static str {
                $label
            }
        }
    };
}

cluster_tokenizer!(
    /// C\*V\* clusters: a consonant following a vowel starts a new token.
    CVClusterTokenizer,
    Boundary::VowelToConsonant,
    "cv-cluster"
);

cluster_tokenizer!(
    /// V\*C\* clusters: a vowel following a consonant starts a new token.
    VCClusterTokenizer,
    Boundary::ConsonantToVowel,
    "vc-cluster"
);

cluster_tokenizer!(
    /// Runs of consonants and runs of vowels, each as its own token.
    COrVClusterTokenizer,
    Boundary::Either,
    "c-or-v-cluster"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cv_clusters() {
        let t = CVClusterTokenizer::new();
        assert_eq!(
            t.tokenize("seven-twelfths").get_list(),
            &["se", "ve", "n", "-", "twe", "lfths"]
        );
        assert_eq!(t.tokenize("character").get_list(), &["cha", "ra", "cte", "r"]);
    }

    #[test]
    fn vc_and_c_or_v_clusters() {
        assert_eq!(
            VCClusterTokenizer::new()
                .tokenize("seven-twelfths")
                .get_list(),
            &["s", "ev", "en", "-", "tw", "elfths"]
        );
        assert_eq!(
            COrVClusterTokenizer::new()
                .tokenize("seven-twelfths")
                .get_list(),
            &["s", "e", "v", "e", "n", "-", "tw", "e", "lfths"]
        );
    }

    #[test]
    fn combining_marks_attach_and_recompose() {
        // "café" decomposes to c a f e + U+0301; the accent stays with its vowel.
        let toks = CVClusterTokenizer::new().tokenize("cafés");
        assert_eq!(toks.get_list(), &["ca", "fé", "s"]);
    }

    #[test]
    fn non_letter_leading_tokens_pass_through() {
        let toks = CVClusterTokenizer::new().tokenize("42nd ... street");
        assert_eq!(toks.get_list(), &["42nd", "...", "stree", "t"]);
    }

    #[test]
    fn custom_sets() {
        let t = CVClusterTokenizer::new()
            .with_consonants("xyz")
            .with_vowels("a");
        assert_eq!(t.tokenize("xaxya").get_list(), &["xa", "xya"]);
    }
}
