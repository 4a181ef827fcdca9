//! Synonym-aware tokenization.
//!
//! Wraps another tokenizer and rewrites every token that belongs to a synonym group to the
//! group's canonical (first) member, so `"user account"` and `"person member"` produce the same
//! multiset when those words share groups.

use super::{Tokenizer, Tokens};
use crate::scaler::Scaler;
use std::collections::HashMap;

/// Rewrites tokens through a synonym table before counting.
pub struct SynonymTokenizer {
    inner: Box<dyn Tokenizer>,
    canonical: HashMap<String, String>,
}

impl SynonymTokenizer {
    /// Wrap `inner` with the given synonym groups.
    ///
    /// A token listed in several groups maps to the canonical member of the first group
    /// that lists it.
    pub fn new<G, S>(inner: Box<dyn Tokenizer>, groups: G) -> Self
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut canonical: HashMap<String, String> = HashMap::new();
        for group in groups {
            let mut members = group.into_iter().map(Into::into);
            let Some(head) = members.next() else {
                continue;
            };
            canonical.entry(head.clone()).or_insert_with(|| head.clone());
            for m in members {
                canonical.entry(m).or_insert_with(|| head.clone());
            }
        }
        Self { inner, canonical }
    }

    /// Canonical form of `token` (the token itself when it has no group).
    pub fn canonical<'a>(&'a self, token: &'a str) -> &'a str {
        self.canonical
            .get(token)
            .map(String::as_str)
            .unwrap_or(token)
    }
}

impl std::fmt::Debug for SynonymTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynonymTokenizer")
            .field("inner", &self.inner.name())
            .field("entries", &self.canonical.len())
            .finish()
    }
}

impl Tokenizer for SynonymTokenizer {
    fn tokenize(&self, s: &str) -> Tokens {
        let ordered = self
            .inner
            .tokenize(s)
            .get_list()
            .iter()
            .map(|t| self.canonical(t).to_string())
            .collect();
        Tokens::from_ordered(ordered, self.inner.scaler())
    }

    fn scaler(&self) -> &Scaler {
        self.inner.scaler()
    }

    fn qvals(&self) -> &[usize] {
        self.inner.qvals()
    }

    fn name(&self) -> &'static str {
        "synonym"
    }
}
