//! Declarative configuration for [`TokenDistance`].
//!
//! Everything here is plain data with sensible defaults; names are resolved (and validated)
//! only by [`TokenDistanceConfig::build`]. With the `serde` feature the types can be loaded
//! from any serde format.

use crate::intersection::IntersectionType;
use crate::metric::metric_by_name;
use crate::population::Alphabet;
use crate::scaler::Scaler;
use crate::token_distance::TokenDistance;
use crate::tokenizer::{
    COrVClusterTokenizer, CVClusterTokenizer, CharacterTokenizer, QGrams, RegexpTokenizer,
    SapsTokenizer, Tokenizer, VCClusterTokenizer, WhitespaceTokenizer, WordpunctTokenizer,
};
use crate::Error;

/// Population specification, in config form.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlphabetConfig {
    /// Tokenizer-dependent default.
    #[default]
    Unspecified,
    /// `N = X ∪ Y`.
    Derived,
    /// Explicit population size.
    Size(f64),
    /// Symbol set, one symbol per character.
    Symbols(String),
    /// Explicit weighted population.
    Counts(Vec<(String, f64)>),
}

impl AlphabetConfig {
    fn to_alphabet(&self) -> Alphabet {
        match self {
            AlphabetConfig::Unspecified => Alphabet::Unspecified,
            AlphabetConfig::Derived => Alphabet::Derived,
            AlphabetConfig::Size(s) => Alphabet::FromSize(*s),
            AlphabetConfig::Symbols(symbols) => Alphabet::from(symbols.as_str()),
            AlphabetConfig::Counts(counts) => Alphabet::FromCounts(counts.iter().cloned().collect()),
        }
    }
}

/// Tokenizer selection.
///
/// `kind` is one of `qgrams`, `whitespace`, `wordpunct`, `regexp`, `character`,
/// `cv-cluster`, `vc-cluster`, `c-or-v-cluster`, `saps`. The q-gram fields only apply to
/// `qgrams`; `pattern` is required by `regexp`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenizerConfig {
    pub kind: String,
    pub qval: Vec<usize>,
    pub skip: Vec<usize>,
    pub start_stop: Option<(char, char)>,
    /// Scaler name (`none`, `set`, `length`, `length-log`, `length-exp`).
    pub scaler: String,
    pub pattern: Option<String>,
    pub case_insensitive: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            kind: "qgrams".to_string(),
            qval: vec![2],
            skip: vec![0],
            start_stop: Some(('$', '#')),
            scaler: "none".to_string(),
            pattern: None,
            case_insensitive: false,
        }
    }
}

impl TokenizerConfig {
    /// Instantiate the configured tokenizer.
    pub fn build(&self) -> Result<Box<dyn Tokenizer>, Error> {
        let scaler: Scaler = self.scaler.parse()?;
        let tokenizer: Box<dyn Tokenizer> = match self.kind.as_str() {
            "qgrams" | "qgram" => Box::new(
                QGrams::new()
                    .qvals(self.qval.clone())?
                    .skips(self.skip.clone())?
                    .start_stop(self.start_stop)
                    .with_scaler(scaler),
            ),
            "whitespace" => Box::new(WhitespaceTokenizer::new().with_scaler(scaler)),
            "wordpunct" => Box::new(WordpunctTokenizer::new().with_scaler(scaler)),
            "regexp" => {
                let pattern = self
                    .pattern
                    .as_deref()
                    .ok_or(Error::InvalidTokenizer("regexp tokenizer requires a pattern"))?;
                Box::new(
                    RegexpTokenizer::with_flags(pattern, self.case_insensitive)?
                        .with_scaler(scaler),
                )
            }
            "character" => Box::new(CharacterTokenizer::new().with_scaler(scaler)),
            "cv-cluster" => Box::new(CVClusterTokenizer::new().with_scaler(scaler)),
            "vc-cluster" => Box::new(VCClusterTokenizer::new().with_scaler(scaler)),
            "c-or-v-cluster" => Box::new(COrVClusterTokenizer::new().with_scaler(scaler)),
            "saps" => Box::new(SapsTokenizer::new().with_scaler(scaler)),
            other => return Err(Error::UnknownTokenizer(other.to_string())),
        };
        Ok(tokenizer)
    }
}

/// Full framework configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenDistanceConfig {
    pub alphabet: AlphabetConfig,
    pub tokenizer: TokenizerConfig,
    /// `crisp`, `fuzzy`, `soft` or `group` (alias `linkage`).
    pub intersection_type: String,
    /// Secondary metric name; the policy default when unset.
    pub metric: Option<String>,
    /// Similarity threshold; the policy default when unset.
    pub threshold: Option<f64>,
}

impl Default for TokenDistanceConfig {
    fn default() -> Self {
        Self {
            alphabet: AlphabetConfig::default(),
            tokenizer: TokenizerConfig::default(),
            intersection_type: IntersectionType::default().to_string(),
            metric: None,
            threshold: None,
        }
    }
}

impl TokenDistanceConfig {
    /// Resolve names and build the framework.
    pub fn build(&self) -> Result<TokenDistance, Error> {
        let intersection_type: IntersectionType = self.intersection_type.parse()?;
        let tokenizer = self.tokenizer.build()?;

        tracing::debug!(
            tokenizer = %self.tokenizer.kind,
            intersection = %intersection_type,
            metric = ?self.metric,
            threshold = ?self.threshold,
            "resolved token distance config"
        );

        let mut builder = TokenDistance::builder()
            .boxed_tokenizer(tokenizer)
            .alphabet(self.alphabet.to_alphabet())
            .intersection_type(intersection_type);
        if let Some(name) = &self.metric {
            builder = builder.metric(metric_by_name(name)?);
        }
        if let Some(threshold) = self.threshold {
            builder = builder.threshold(threshold);
        }
        builder.build()
    }
}
