//! Token weight scaling.
//!
//! A scaler maps the raw occurrence count of a token to the weight stored in its
//! [`TokenCounter`](crate::counter::TokenCounter). It is fixed when the tokenizer is built
//! and applied uniformly on every `tokenize` call.

use crate::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Caller-supplied weight function (applied to the raw count).
pub type ScaleFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Weighting applied to each token after counting.
#[derive(Clone, Default)]
pub enum Scaler {
    /// Weight is the raw count.
    #[default]
    None,
    /// Weight is 1 for every present token.
    Set,
    /// Weight is the token length in characters.
    Length,
    /// Weight is `ln(length + 1)`.
    LengthLog,
    /// Weight is `e^length`.
    LengthExp,
    /// Weight is `f(count)`.
    Custom(ScaleFn),
}

impl Scaler {
    /// Wrap a closure as a custom scaler.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Scale one token's raw count.
    pub fn scale(&self, token: &str, count: f64) -> f64 {
        match self {
            Scaler::None => count,
            Scaler::Set => {
                if count > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Scaler::Length => token.chars().count() as f64,
            Scaler::LengthLog => (token.chars().count() as f64).ln_1p(),
            Scaler::LengthExp => (token.chars().count() as f64).exp(),
            Scaler::Custom(f) => f(count),
        }
    }

    /// Canonical name (`"custom"` for closures).
    pub fn name(&self) -> &'static str {
        match self {
            Scaler::None => "none",
            Scaler::Set => "set",
            Scaler::Length => "length",
            Scaler::LengthLog => "length-log",
            Scaler::LengthExp => "length-exp",
            Scaler::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Scaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Scaler").field(&self.name()).finish()
    }
}

impl FromStr for Scaler {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(Scaler::None),
            "set" => Ok(Scaler::Set),
            "length" => Ok(Scaler::Length),
            "length-log" => Ok(Scaler::LengthLog),
            "length-exp" => Ok(Scaler::LengthExp),
            other => Err(Error::InvalidScaler(other.to_string())),
        }
    }
}
