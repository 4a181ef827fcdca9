//! `tokensim`: token-set similarity built on one shared counting substrate.
//!
//! The crate is organised around three pluggable contracts:
//! - [`tokenizer::Tokenizer`] turns a string into an ordered token list plus a scaled multiset.
//! - [`token_distance::TokenDistance`] turns two token multisets into a 2x2 contingency table
//!   (`a`, `b`, `c`, `d`, `n`) under a crisp, fuzzy, soft or group intersection policy.
//! - [`coefficient::Coefficient`] turns a contingency table into a similarity or distance.
//!
//! Any coefficient can be paired with any tokenizer and intersection policy through
//! [`coefficient::TokenMeasure`], which also implements the identity short-circuit
//! (`sim(s, s) == 1.0` without tokenizing).
//!
//! Scope:
//! - Pairwise comparison of two strings
//! - Deterministic results (insertion-ordered multisets, stable tie-breaks)
//! - Stemmers sharing the same "pure function" shape (`stem(word)`)
//!
//! Non-goals:
//! - Indexing, ranking or corpus-scale scoring
//! - Persistence of any kind
//!
//! ```
//! use tokensim::coefficient::{HarrisLahey, TokenMeasure};
//! use tokensim::metric::Distance;
//!
//! let cmp = TokenMeasure::new(HarrisLahey);
//! assert!((cmp.sim("cat", "hat") - 0.3367).abs() < 1e-4);
//! assert_eq!(cmp.sim("cat", "cat"), 1.0);
//! ```

pub mod affine_gap;
pub mod coefficient;
pub mod config;
pub mod counter;
pub mod intersection;
pub mod metric;
pub mod population;
pub mod scaler;
pub mod stemmer;
pub mod token_distance;
pub mod tokenizer;

pub use error::Error;

mod error {
    /// Errors for comparator and tokenizer construction.
    ///
    /// Comparisons themselves never fail; every variant here is raised while
    /// building a tokenizer, metric or [`crate::token_distance::TokenDistance`].
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        /// Scaler name was not recognised.
        #[error("unknown scaler: {0}")]
        InvalidScaler(String),
        /// Intersection type name was not recognised.
        #[error("unknown intersection type: {0}")]
        InvalidIntersectionType(String),
        /// Alphabet/population specification was malformed.
        #[error("invalid alphabet: {0}")]
        InvalidAlphabet(&'static str),
        /// Tokenizer parameters were invalid.
        #[error("invalid tokenizer configuration: {0}")]
        InvalidTokenizer(&'static str),
        /// Tokenizer pattern failed to compile.
        #[error("invalid pattern: {0}")]
        InvalidPattern(#[from] regex::Error),
        /// Threshold was outside `[0, 1]` or not finite.
        #[error("invalid threshold: {0}")]
        InvalidThreshold(f64),
        /// Metric name was not recognised.
        #[error("unknown metric: {0}")]
        UnknownMetric(String),
        /// Tokenizer kind was not recognised.
        #[error("unknown tokenizer: {0}")]
        UnknownTokenizer(String),
        /// Both inputs were empty where a length normalisation is required.
        #[error("empty input")]
        EmptyInput,
    }
}
