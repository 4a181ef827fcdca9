//! Alphabet / population handling.
//!
//! The population `N` is the universe the complement cardinality `d = |N \ (X ∪ Y)|` is taken
//! against. Callers describe it with an [`Alphabet`]; construction resolves that once into a
//! canonical [`Population`].

use crate::counter::TokenCounter;
use crate::Error;
use std::collections::HashSet;

/// Size of the default symbol set: 26 letters plus the start and stop padding symbols.
pub const DEFAULT_ALPHABET_SIZE: f64 = 28.0;

/// Caller-facing population specification.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Alphabet {
    /// Let the tokenizer decide: `Σ 28^q` for q-gram tokenizers, otherwise [`Alphabet::Derived`].
    #[default]
    Unspecified,
    /// Use `X ∪ Y` of each comparison (so `d` is always 0).
    Derived,
    /// An explicit weighted population.
    FromCounts(TokenCounter),
    /// The symbols tokens are built from; sized as `Σ |symbols|^q` for q-gram tokenizers.
    FromCollection(Vec<String>),
    /// An explicit population size.
    FromSize(f64),
}

/// Resolved population.
#[derive(Debug, Clone, PartialEq)]
pub enum Population {
    /// `N = X ∪ Y`, per comparison.
    Derived,
    /// Explicit weighted multiset.
    Counts(TokenCounter),
    /// Explicit size.
    Size(f64),
}

impl Alphabet {
    /// Resolve against the q-gram lengths reported by the tokenizer.
    pub fn resolve(self, qvals: &[usize]) -> Result<Population, Error> {
        let size_for = |symbols: f64| -> f64 {
            if qvals.is_empty() {
                symbols
            } else {
                qvals
                    .iter()
                    .map(|&q| i32::try_from(q).map_or(f64::INFINITY, |q| symbols.powi(q)))
                    .fold(0.0, |acc, s| acc + s)
            }
        };

        match self {
            Alphabet::Unspecified if qvals.is_empty() => Ok(Population::Derived),
            Alphabet::Unspecified => finite_size(size_for(DEFAULT_ALPHABET_SIZE)),
            Alphabet::Derived => Ok(Population::Derived),
            Alphabet::FromCounts(counts) => {
                if counts.is_empty() {
                    return Err(Error::InvalidAlphabet("population counts are empty"));
                }
                Ok(Population::Counts(counts))
            }
            Alphabet::FromCollection(symbols) => {
                let unique: HashSet<&str> = symbols.iter().map(String::as_str).collect();
                if unique.is_empty() {
                    return Err(Error::InvalidAlphabet("symbol collection is empty"));
                }
                finite_size(size_for(unique.len() as f64))
            }
            Alphabet::FromSize(size) => {
                if !size.is_finite() || size < 0.0 {
                    return Err(Error::InvalidAlphabet("size must be finite and >= 0"));
                }
                Ok(Population::Size(size))
            }
        }
    }
}

fn finite_size(size: f64) -> Result<Population, Error> {
    if !size.is_finite() {
        return Err(Error::InvalidAlphabet("population size overflows"));
    }
    Ok(Population::Size(size))
}

impl From<usize> for Alphabet {
    fn from(size: usize) -> Self {
        Alphabet::FromSize(size as f64)
    }
}

impl From<TokenCounter> for Alphabet {
    fn from(counts: TokenCounter) -> Self {
        Alphabet::FromCounts(counts)
    }
}

impl From<Vec<String>> for Alphabet {
    fn from(symbols: Vec<String>) -> Self {
        Alphabet::FromCollection(symbols)
    }
}

impl From<&str> for Alphabet {
    /// Each character of the string is a symbol.
    fn from(symbols: &str) -> Self {
        Alphabet::FromCollection(symbols.chars().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_population_for_bigrams() {
        assert_eq!(
            Alphabet::Unspecified.resolve(&[2]).unwrap(),
            Population::Size(784.0)
        );
        assert_eq!(
            Alphabet::Unspecified.resolve(&[1, 2]).unwrap(),
            Population::Size(28.0 + 784.0)
        );
        assert_eq!(Alphabet::Unspecified.resolve(&[]).unwrap(), Population::Derived);
    }

    #[test]
    fn collection_is_sized_by_unique_symbols() {
        assert_eq!(
            Alphabet::from("ACGTACGT").resolve(&[2]).unwrap(),
            Population::Size(16.0)
        );
        assert_eq!(
            Alphabet::from("ACGT").resolve(&[]).unwrap(),
            Population::Size(4.0)
        );
    }

    #[test]
    fn malformed_alphabets_fail() {
        assert!(matches!(
            Alphabet::FromSize(-1.0).resolve(&[]),
            Err(Error::InvalidAlphabet(_))
        ));
        assert!(matches!(
            Alphabet::FromSize(f64::NAN).resolve(&[]),
            Err(Error::InvalidAlphabet(_))
        ));
        assert!(matches!(
            Alphabet::FromCollection(vec![]).resolve(&[2]),
            Err(Error::InvalidAlphabet(_))
        ));
        assert!(matches!(
            Alphabet::FromCounts(TokenCounter::new()).resolve(&[2]),
            Err(Error::InvalidAlphabet(_))
        ));
    }

    #[test]
    fn overflowing_qgram_population_fails() {
        assert!(matches!(
            Alphabet::Unspecified.resolve(&[250]),
            Err(Error::InvalidAlphabet(_))
        ));
        assert!(matches!(
            Alphabet::from("ACGT").resolve(&[usize::MAX]),
            Err(Error::InvalidAlphabet(_))
        ));
        assert!(Alphabet::Unspecified.resolve(&[200]).is_ok());
    }

    #[test]
    fn explicit_size_wins() {
        assert_eq!(Alphabet::from(1000usize).resolve(&[2]).unwrap(), Population::Size(1000.0));
    }
}
