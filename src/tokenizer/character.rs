use super::{Tokenizer, Tokens};
use crate::scaler::Scaler;

/// One token per Unicode scalar value.
#[derive(Debug, Clone, Default)]
pub struct CharacterTokenizer {
    scaler: Scaler,
}

impl CharacterTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scaler.
    pub fn with_scaler(mut self, scaler: Scaler) -> Self {
        self.scaler = scaler;
        self
    }
}

impl Tokenizer for CharacterTokenizer {
    fn tokenize(&self, s: &str) -> Tokens {
        Tokens::from_ordered(s.chars().map(String::from).collect(), &self.scaler)
    }

    fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    fn name(&self) -> &'static str {
        "character"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_token_per_char() {
        let toks = CharacterTokenizer::new().tokenize("naïve");
        assert_eq!(toks.get_list(), &["n", "a", "ï", "v", "e"]);
        assert_eq!(toks.get_counter().len(), 5);
    }
}
