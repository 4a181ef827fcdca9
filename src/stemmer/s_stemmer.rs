//! Harman's S-stemmer (1991): strips English plural endings only.
//!
//! The first matching rule applies:
//! 1. `-ies` (not `-eies`, `-aies`) becomes `-y`
//! 2. `-es` (not `-aes`, `-ees`, `-oes`) becomes `-e`
//! 3. `-s` (not `-us`, `-ss`) is dropped
//!
//! Rules are matched case-insensitively and the input's case is kept.

use super::Stemmer;

#[derive(Debug, Clone, Copy, Default)]
pub struct SStemmer;

impl Stemmer for SStemmer {
    fn stem(&self, word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        let lower: Vec<char> = chars
            .iter()
            .map(|c| c.to_lowercase().next().unwrap_or(*c))
            .collect();
        let n = lower.len();
        let before = |k: usize| if n > k { Some(lower[n - k - 1]) } else { None };

        if lower.ends_with(&['i', 'e', 's']) && !matches!(before(3), Some('e' | 'a')) {
            let y = if chars[n - 1].is_uppercase() { 'Y' } else { 'y' };
            return chars[..n - 3].iter().chain(std::iter::once(&y)).collect();
        }
        if lower.ends_with(&['e', 's']) && !matches!(before(2), Some('a' | 'e' | 'o')) {
            return chars[..n - 1].iter().collect();
        }
        if lower.ends_with(&['s']) && !matches!(before(1), Some('u' | 's')) {
            return chars[..n - 1].iter().collect();
        }
        word.to_string()
    }

    fn name(&self) -> &'static str {
        "s-stemmer"
    }
}
