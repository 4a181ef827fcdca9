//! Intersection policies.
//!
//! An intersection policy decides how much of each token counts as shared between the source
//! multiset `X` and the target multiset `Y`. The result is itself a multiset `I`; the framework
//! derives every cardinality from `X`, `Y`, `I` and the population.
//!
//! - crisp: exact token equality, `I = X ∩ Y`.
//! - fuzzy: crisp plus pairs whose secondary-metric similarity passes a threshold
//!   (Wang et al., 2014).
//! - soft: crisp plus greedy partial membership weighted by edit similarity
//!   (Russ et al., 2014).
//! - group: crisp plus one-to-one greedy linkage of the most similar leftovers
//!   (On et al., 2007).
//!
//! Non-crisp policies yield fractional weights; `a + b + c + d == n` is then not guaranteed.

use crate::counter::TokenCounter;
use crate::metric::{DamerauLevenshtein, Distance, LcPrefix, Levenshtein};
use crate::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Computes the intersection multiset of two token multisets.
pub trait Intersection: Send + Sync {
    /// Intersection of `src` and `tar`.
    fn intersect(&self, src: &TokenCounter, tar: &TokenCounter) -> TokenCounter;

    /// Short name (for logging).
    fn name(&self) -> &'static str;
}

/// Built-in policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IntersectionType {
    /// Exact token equality.
    #[default]
    Crisp,
    /// Threshold on a secondary metric.
    Fuzzy,
    /// Graded membership from edit similarity.
    Soft,
    /// Greedy one-to-one linkage.
    Group,
}

impl IntersectionType {
    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntersectionType::Crisp => "crisp",
            IntersectionType::Fuzzy => "fuzzy",
            IntersectionType::Soft => "soft",
            IntersectionType::Group => "group",
        }
    }
}

impl fmt::Display for IntersectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntersectionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crisp" => Ok(IntersectionType::Crisp),
            "fuzzy" => Ok(IntersectionType::Fuzzy),
            "soft" => Ok(IntersectionType::Soft),
            "group" | "linkage" => Ok(IntersectionType::Group),
            other => Err(Error::InvalidIntersectionType(other.to_string())),
        }
    }
}

/// Similarity thresholds must be finite and within `[0, 1]`.
pub(crate) fn check_threshold(threshold: f64) -> Result<f64, Error> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(Error::InvalidThreshold(threshold))
    }
}

/// `I = X ∩ Y`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crisp;

impl Intersection for Crisp {
    fn intersect(&self, src: &TokenCounter, tar: &TokenCounter) -> TokenCounter {
        src.intersection(tar)
    }

    fn name(&self) -> &'static str {
        "crisp"
    }
}

/// Pairs of leftover tokens whose similarity is at least `threshold` each contribute half
/// their similarity, times their weight, to both tokens' membership.
#[derive(Clone)]
pub struct Fuzzy {
    metric: Arc<dyn Distance>,
    threshold: f64,
}

impl Fuzzy {
    /// Default threshold.
    pub const DEFAULT_THRESHOLD: f64 = 0.8;

    /// Fails with [`Error::InvalidThreshold`] outside `[0, 1]`.
    pub fn new(metric: Arc<dyn Distance>, threshold: f64) -> Result<Self, Error> {
        Ok(Self {
            metric,
            threshold: check_threshold(threshold)?,
        })
    }
}

impl Default for Fuzzy {
    fn default() -> Self {
        Self {
            metric: Arc::new(Levenshtein),
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl Intersection for Fuzzy {
    fn intersect(&self, src: &TokenCounter, tar: &TokenCounter) -> TokenCounter {
        let mut inter = src.intersection(tar);
        let src_only = src.difference(tar);
        let tar_only = tar.difference(src);

        for (s, sw) in src_only.iter() {
            for (t, tw) in tar_only.iter() {
                let sim = self.metric.sim(s, t);
                if sim >= self.threshold {
                    inter.add(s, sim / 2.0 * sw);
                    inter.add(t, sim / 2.0 * tw);
                }
            }
        }
        inter
    }

    fn name(&self) -> &'static str {
        "fuzzy"
    }
}

/// Greedy graded membership.
///
/// Membership of a pair is `max(L - metric.dist_abs(s, t), lcprefix(s, t)) / L` with `L` the
/// longer token length. Pairs are consumed best-first (ties broken by sorted `(s, t)` order);
/// each pairs as many occurrences as both residues still hold.
#[derive(Clone)]
pub struct Soft {
    metric: Arc<dyn Distance>,
}

impl Soft {
    pub fn new(metric: Arc<dyn Distance>) -> Self {
        Self { metric }
    }

    fn membership(&self, s: &str, t: &str) -> f64 {
        let longest = s.chars().count().max(t.chars().count()) as f64;
        if longest == 0.0 {
            return 0.0;
        }
        let edit = longest - self.metric.dist_abs(s, t);
        let prefix = LcPrefix.prefix_len(s, t) as f64;
        (edit.max(prefix) / longest).max(0.0)
    }
}

impl Default for Soft {
    fn default() -> Self {
        Self::new(Arc::new(Levenshtein))
    }
}

impl Intersection for Soft {
    fn intersect(&self, src: &TokenCounter, tar: &TokenCounter) -> TokenCounter {
        let mut inter = src.intersection(tar);
        let mut src_only = src.difference(tar);
        let mut tar_only = tar.difference(src);

        let mut pairs: Vec<(String, String, f64)> = Vec::new();
        for s in src_only.elements() {
            for t in tar_only.elements() {
                pairs.push((s.to_string(), t.to_string(), self.membership(s, t)));
            }
        }
        pairs.sort_by(|x, y| x.0.cmp(&y.0).then_with(|| x.1.cmp(&y.1)));

        while !pairs.is_empty() {
            let mut best = 0;
            for i in 1..pairs.len() {
                if pairs[i].2 > pairs[best].2 {
                    best = i;
                }
            }
            let (s, t, m) = pairs.remove(best);
            if m <= 0.0 {
                continue;
            }
            let p = src_only.get(&s).min(tar_only.get(&t));
            if p > 0.0 {
                inter.add(&s, m * p / 2.0);
                inter.add(&t, m * p / 2.0);
                src_only.add(&s, -p);
                tar_only.add(&t, -p);
            }
        }
        inter
    }

    fn name(&self) -> &'static str {
        "soft"
    }
}

/// Greedy one-to-one linkage of leftover tokens.
///
/// Candidate pairs with similarity at least `threshold` are linked in descending similarity
/// order; a token's weight can only be linked once.
#[derive(Clone)]
pub struct GroupLinkage {
    metric: Arc<dyn Distance>,
    threshold: f64,
}

impl GroupLinkage {
    /// Default threshold.
    pub const DEFAULT_THRESHOLD: f64 = 0.1;

    /// Fails with [`Error::InvalidThreshold`] outside `[0, 1]`.
    pub fn new(metric: Arc<dyn Distance>, threshold: f64) -> Result<Self, Error> {
        Ok(Self {
            metric,
            threshold: check_threshold(threshold)?,
        })
    }
}

impl Default for GroupLinkage {
    fn default() -> Self {
        Self {
            metric: Arc::new(DamerauLevenshtein),
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl Intersection for GroupLinkage {
    fn intersect(&self, src: &TokenCounter, tar: &TokenCounter) -> TokenCounter {
        let mut inter = src.intersection(tar);
        let mut src_only = src.difference(tar);
        let mut tar_only = tar.difference(src);

        let mut links: Vec<(String, String, f64)> = Vec::new();
        for s in src_only.elements() {
            for t in tar_only.elements() {
                let sim = self.metric.sim(s, t);
                if sim >= self.threshold {
                    links.push((s.to_string(), t.to_string(), sim));
                }
            }
        }
        links.sort_by(|x, y| {
            y.2.total_cmp(&x.2)
                .then_with(|| x.0.cmp(&y.0))
                .then_with(|| x.1.cmp(&y.1))
        });

        for (s, t, sim) in links {
            let p = src_only.get(&s).min(tar_only.get(&t));
            if p <= 0.0 {
                continue;
            }
            inter.add(&s, sim * p / 2.0);
            inter.add(&t, sim * p / 2.0);
            src_only.add(&s, -p);
            tar_only.add(&t, -p);
        }
        inter
    }

    fn name(&self) -> &'static str {
        "group"
    }
}
