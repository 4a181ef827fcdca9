//! The token-distance framework.
//!
//! [`TokenDistance`] owns a tokenizer, an intersection policy and a resolved population. For
//! each pair of strings it produces a [`Comparison`]: both token multisets, their intersection,
//! and the 2x2 contingency table
//!
//! | | in Y | not in Y |
//! |---|---|---|
//! | **in X** | `a` | `b` |
//! | **not in X** | `c` | `d` |
//!
//! with `n` the population size. Every coefficient reads these five numbers and nothing else.
//!
//! Cardinalities, for source multiset `X`, target `Y`, intersection `I` and union
//! `U = (X + Y − I)⁺`:
//! - `a = ΣI`, `b = Σ(X − I)⁺`, `c = Σ(Y − I)⁺`
//! - derived population: `d = 0`
//! - population of size `s`: `d = max(0, s − #U)`, where `#U` counts distinct tokens
//! - weighted population `N`: `d = Σ(N − U)⁺`
//! - `n = a + b + c + d`
//!
//! A population size counts distinct tokens, so repeated tokens can push `n` above `s`.

use crate::counter::TokenCounter;
use crate::intersection::{
    check_threshold, Crisp, Fuzzy, GroupLinkage, Intersection, IntersectionType, Soft,
};
use crate::metric::{DamerauLevenshtein, Distance, Levenshtein};
use crate::population::{Alphabet, Population};
use crate::tokenizer::{QGrams, Tokenizer, Tokens, WhitespaceTokenizer};
use crate::Error;
use std::fmt;
use std::sync::Arc;

/// The 2x2 confusion table of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContingencyTable {
    /// `|X ∩ Y|`
    pub a: f64,
    /// `|X \ Y|`
    pub b: f64,
    /// `|Y \ X|`
    pub c: f64,
    /// `|N \ (X ∪ Y)|`
    pub d: f64,
    /// `|N|`
    pub n: f64,
}

impl ContingencyTable {
    /// Table with `n = a + b + c + d`.
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            n: a + b + c + d,
        }
    }
}

/// Result of comparing two strings.
#[derive(Debug, Clone)]
pub struct Comparison {
    src: Tokens,
    tar: Tokens,
    intersection: TokenCounter,
    union: TokenCounter,
    table: ContingencyTable,
}

impl Comparison {
    /// `a`: cardinality of the intersection.
    pub fn intersection_card(&self) -> f64 {
        self.table.a
    }

    /// `b`: cardinality of the source-only part.
    pub fn src_only_card(&self) -> f64 {
        self.table.b
    }

    /// `c`: cardinality of the target-only part.
    pub fn tar_only_card(&self) -> f64 {
        self.table.c
    }

    /// `d`: cardinality of the population outside `X ∪ Y`.
    pub fn total_complement_card(&self) -> f64 {
        self.table.d
    }

    /// `n`: cardinality of the population.
    pub fn population_unique_card(&self) -> f64 {
        self.table.n
    }

    /// `|X|`
    pub fn src_card(&self) -> f64 {
        self.src.get_counter().total()
    }

    /// `|Y|`
    pub fn tar_card(&self) -> f64 {
        self.tar.get_counter().total()
    }

    /// `|X ∪ Y|`
    pub fn union_card(&self) -> f64 {
        self.union.total()
    }

    /// `|X| + |Y|`
    pub fn total_card(&self) -> f64 {
        self.src_card() + self.tar_card()
    }

    /// All five cardinalities.
    pub fn table(&self) -> ContingencyTable {
        self.table
    }

    /// Source tokens.
    pub fn src_tokens(&self) -> &Tokens {
        &self.src
    }

    /// Target tokens.
    pub fn tar_tokens(&self) -> &Tokens {
        &self.tar
    }

    /// The intersection multiset chosen by the policy.
    pub fn intersection(&self) -> &TokenCounter {
        &self.intersection
    }
}

/// Tokenizer + intersection policy + population.
pub struct TokenDistance {
    tokenizer: Box<dyn Tokenizer>,
    intersection: Box<dyn Intersection>,
    population: Population,
}

impl Default for TokenDistance {
    /// Padded bigrams, crisp intersection, population of `28^2`.
    fn default() -> Self {
        let tokenizer = QGrams::new();
        let population = Population::Size(crate::population::DEFAULT_ALPHABET_SIZE.powi(2));
        Self {
            tokenizer: Box::new(tokenizer),
            intersection: Box::new(Crisp),
            population,
        }
    }
}

impl fmt::Debug for TokenDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenDistance")
            .field("tokenizer", &self.tokenizer.name())
            .field("intersection", &self.intersection.name())
            .field("population", &self.population)
            .finish()
    }
}

impl TokenDistance {
    /// Start configuring a framework instance.
    pub fn builder() -> TokenDistanceBuilder {
        TokenDistanceBuilder::default()
    }

    /// The configured tokenizer.
    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// The resolved population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Name of the intersection policy.
    pub fn intersection_name(&self) -> &'static str {
        self.intersection.name()
    }

    /// Tokenize with the configured tokenizer.
    pub fn tokenize(&self, s: &str) -> Tokens {
        self.tokenizer.tokenize(s)
    }

    /// Tokenize both strings and derive the contingency table.
    ///
    /// This never fails: empty strings produce empty multisets and a table of zeros (plus
    /// whatever population was configured).
    pub fn compare(&self, src: &str, tar: &str) -> Comparison {
        let src = self.tokenizer.tokenize(src);
        let tar = self.tokenizer.tokenize(tar);
        let x = src.get_counter();
        let y = tar.get_counter();

        let intersection = self.intersection.intersect(x, y);
        let a = intersection.total();
        let b = x.difference(&intersection).total();
        let c = y.difference(&intersection).total();

        let union = x.sum(y).difference(&intersection);
        let d = match &self.population {
            Population::Derived => 0.0,
            Population::Size(s) => (s - union.len() as f64).max(0.0),
            Population::Counts(pop) => pop.difference(&union).total(),
        };
        let n = a + b + c + d;

        tracing::trace!(
            tokenizer = self.tokenizer.name(),
            intersection = self.intersection.name(),
            a,
            b,
            c,
            d,
            n,
            "compared token multisets"
        );

        Comparison {
            src,
            tar,
            intersection,
            union,
            table: ContingencyTable { a, b, c, d, n },
        }
    }
}

/// Builder for [`TokenDistance`].
pub struct TokenDistanceBuilder {
    alphabet: Alphabet,
    tokenizer: Option<Box<dyn Tokenizer>>,
    intersection_type: IntersectionType,
    custom_intersection: Option<Box<dyn Intersection>>,
    qval: usize,
    metric: Option<Arc<dyn Distance>>,
    threshold: Option<f64>,
}

impl Default for TokenDistanceBuilder {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::Unspecified,
            tokenizer: None,
            intersection_type: IntersectionType::Crisp,
            custom_intersection: None,
            qval: 2,
            metric: None,
            threshold: None,
        }
    }
}

impl TokenDistanceBuilder {
    /// Population specification.
    pub fn alphabet(mut self, alphabet: impl Into<Alphabet>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    /// Tokenizer (default: padded q-grams of length `qval`).
    pub fn tokenizer(self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.boxed_tokenizer(Box::new(tokenizer))
    }

    /// Tokenizer, already boxed.
    pub fn boxed_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Built-in intersection policy.
    pub fn intersection_type(mut self, intersection_type: IntersectionType) -> Self {
        self.intersection_type = intersection_type;
        self
    }

    /// Caller-defined intersection policy (overrides `intersection_type`, `metric` and
    /// `threshold`).
    pub fn intersection(mut self, intersection: impl Intersection + 'static) -> Self {
        self.custom_intersection = Some(Box::new(intersection));
        self
    }

    /// Q-gram length of the default tokenizer; `0` selects whitespace tokenization.
    pub fn qval(mut self, qval: usize) -> Self {
        self.qval = qval;
        self
    }

    /// Secondary metric for the fuzzy, soft and group policies.
    pub fn metric(mut self, metric: Arc<dyn Distance>) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Similarity threshold for the fuzzy and group policies.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<TokenDistance, Error> {
        if let Some(t) = self.threshold {
            check_threshold(t)?;
        }

        let tokenizer: Box<dyn Tokenizer> = match self.tokenizer {
            Some(t) => t,
            None if self.qval == 0 => Box::new(WhitespaceTokenizer::new()),
            None => Box::new(QGrams::with_qval(self.qval)?),
        };

        let intersection: Box<dyn Intersection> = match self.custom_intersection {
            Some(custom) => custom,
            None => match self.intersection_type {
                IntersectionType::Crisp => Box::new(Crisp),
                IntersectionType::Fuzzy => Box::new(Fuzzy::new(
                    self.metric.unwrap_or_else(|| Arc::new(Levenshtein)),
                    self.threshold.unwrap_or(Fuzzy::DEFAULT_THRESHOLD),
                )?),
                IntersectionType::Soft => Box::new(Soft::new(
                    self.metric.unwrap_or_else(|| Arc::new(Levenshtein)),
                )),
                IntersectionType::Group => Box::new(GroupLinkage::new(
                    self.metric.unwrap_or_else(|| Arc::new(DamerauLevenshtein)),
                    self.threshold.unwrap_or(GroupLinkage::DEFAULT_THRESHOLD),
                )?),
            },
        };

        let population = self.alphabet.resolve(tokenizer.qvals())?;

        tracing::debug!(
            tokenizer = tokenizer.name(),
            intersection = intersection.name(),
            population = ?population,
            "built token distance"
        );

        Ok(TokenDistance {
            tokenizer,
            intersection,
            population,
        })
    }
}
