//! Tokenizers: string -> ordered tokens + scaled multiset.
//!
//! Every tokenizer is a pure function of its input and the configuration fixed at
//! construction. Results come back as an immutable [`Tokens`] value, so one tokenizer can be
//! shared freely (including across threads).

use crate::counter::TokenCounter;
use crate::scaler::Scaler;

mod character;
mod cluster;
mod qgrams;
mod regexp;
mod saps;
mod synonym;

pub use character::CharacterTokenizer;
pub use cluster::{COrVClusterTokenizer, CVClusterTokenizer, VCClusterTokenizer};
pub use qgrams::QGrams;
pub use regexp::{RegexpTokenizer, WhitespaceTokenizer, WordpunctTokenizer};
pub use saps::SapsTokenizer;
pub use synonym::SynonymTokenizer;

/// A string splitting strategy.
pub trait Tokenizer: Send + Sync {
    /// Tokenize `s`.
    fn tokenize(&self, s: &str) -> Tokens;

    /// Scaler applied to raw counts.
    fn scaler(&self) -> &Scaler;

    /// Q-gram lengths produced by this tokenizer (empty for non-q-gram tokenizers).
    ///
    /// Used to size the default population.
    fn qvals(&self) -> &[usize] {
        &[]
    }

    /// Short name (for logging and configuration).
    fn name(&self) -> &'static str;
}

/// Result of one tokenize call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokens {
    ordered: Vec<String>,
    counter: TokenCounter,
}

impl Tokens {
    /// Count `ordered` and apply `scaler` to each token's count.
    pub fn from_ordered(ordered: Vec<String>, scaler: &Scaler) -> Self {
        let counter = TokenCounter::from_tokens(&ordered).map_weights(|t, w| scaler.scale(t, w));
        Self { ordered, counter }
    }

    /// The scaled multiset.
    pub fn get_counter(&self) -> &TokenCounter {
        &self.counter
    }

    /// Tokens in scan order (before aggregation).
    pub fn get_list(&self) -> &[String] {
        &self.ordered
    }

    /// Consume into the scaled multiset.
    pub fn into_counter(self) -> TokenCounter {
        self.counter
    }

    /// True when no tokens were produced.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
