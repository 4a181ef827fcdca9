//! Stemmers.
//!
//! A stemmer is a pure `word -> stem` function. Implementations hold no state, so a single
//! instance can be shared freely.

mod s_stemmer;
mod snowball_norwegian;

pub use s_stemmer::SStemmer;
pub use snowball_norwegian::SnowballNorwegian;

/// Reduces a word to its stem.
pub trait Stemmer: Send + Sync {
    /// Stem `word`. The empty string stems to itself.
    fn stem(&self, word: &str) -> String;

    /// Short name.
    fn name(&self) -> &'static str;
}
