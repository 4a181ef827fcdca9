//! Insertion-ordered weighted multiset of tokens.
//!
//! Weights are `f64` so the same type carries raw counts, scaled weights and the fractional
//! memberships produced by the fuzzy/soft/group intersection policies. Iteration follows the
//! order in which each token was first inserted, which keeps every downstream computation
//! reproducible.

use std::collections::HashMap;

/// Weighted multiset: token -> weight (`>= 0`).
/// Equality compares positive weights only; insertion order is ignored.
#[derive(Debug, Clone, Default)]
pub struct TokenCounter {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl TokenCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count occurrences of each token in `tokens`, in scan order.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counter = Self::new();
        for t in tokens {
            counter.add(t.as_ref(), 1.0);
        }
        counter
    }

    /// Add `weight` to `token` (inserting it if unseen).
    ///
    /// Negative results are clamped to zero.
    pub fn add(&mut self, token: &str, weight: f64) {
        match self.index.get(token) {
            Some(&i) => {
                let w = &mut self.entries[i].1;
                *w = (*w + weight).max(0.0);
            }
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), weight.max(0.0)));
            }
        }
    }

    /// Overwrite the weight of `token`.
    pub fn set(&mut self, token: &str, weight: f64) {
        match self.index.get(token) {
            Some(&i) => self.entries[i].1 = weight.max(0.0),
            None => self.add(token, weight),
        }
    }

    /// Weight of `token` (0 when absent).
    pub fn get(&self, token: &str) -> f64 {
        self.index
            .get(token)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Whether `token` has a positive weight.
    pub fn contains(&self, token: &str) -> bool {
        self.get(token) > 0.0
    }

    /// Number of distinct tokens with a positive weight.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|(_, w)| *w > 0.0).count()
    }

    /// True when no token has a positive weight.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all weights (the multiset cardinality).
    pub fn total(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, (_, w)| acc + w)
    }

    /// Iterate `(token, weight)` pairs with positive weight, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries
            .iter()
            .filter(|(_, w)| *w > 0.0)
            .map(|(t, w)| (t.as_str(), *w))
    }

    /// Tokens with positive weight, in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(t, _)| t)
    }

    /// Apply `f(token, weight)` to every entry.
    pub fn map_weights(&self, mut f: impl FnMut(&str, f64) -> f64) -> Self {
        let mut out = Self::new();
        for (t, w) in self.iter() {
            out.add(t, f(t, w));
        }
        out
    }

    /// Multiset intersection (per-token minimum).
    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = Self::new();
        for (t, w) in self.iter() {
            let m = w.min(other.get(t));
            if m > 0.0 {
                out.add(t, m);
            }
        }
        out
    }

    /// Multiset union (per-token maximum).
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (t, w) in other.iter() {
            if w > out.get(t) {
                out.set(t, w);
            }
        }
        out.compact()
    }

    /// Multiset sum (weights added).
    pub fn sum(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (t, w) in other.iter() {
            out.add(t, w);
        }
        out.compact()
    }

    /// Multiset difference, keeping only positive remainders.
    pub fn difference(&self, other: &Self) -> Self {
        let mut out = Self::new();
        for (t, w) in self.iter() {
            let r = w - other.get(t);
            if r > 0.0 {
                out.add(t, r);
            }
        }
        out
    }

    fn compact(self) -> Self {
        if self.entries.iter().all(|(_, w)| *w > 0.0) {
            return self;
        }
        let mut out = Self::new();
        for (t, w) in self.iter() {
            out.add(t, w);
        }
        out
    }
}

impl PartialEq for TokenCounter {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(t, w)| other.get(t) == w)
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for TokenCounter {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (t, w) in iter {
            out.add(t.as_ref(), w);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctr(pairs: &[(&str, f64)]) -> TokenCounter {
        pairs.iter().map(|&(t, w)| (t, w)).collect()
    }

    #[test]
    fn counts_preserve_first_seen_order() {
        let c = TokenCounter::from_tokens(["b", "a", "b", "c", "a", "b"]);
        let items: Vec<(&str, f64)> = c.iter().collect();
        assert_eq!(items, vec![("b", 3.0), ("a", 2.0), ("c", 1.0)]);
        assert_eq!(c.total(), 6.0);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn multiset_algebra() {
        let x = ctr(&[("a", 3.0), ("b", 1.0)]);
        let y = ctr(&[("a", 1.0), ("c", 2.0)]);

        assert_eq!(x.intersection(&y), ctr(&[("a", 1.0)]));
        assert_eq!(x.union(&y).total(), 6.0);
        assert_eq!(x.sum(&y).get("a"), 4.0);
        assert_eq!(x.difference(&y), ctr(&[("a", 2.0), ("b", 1.0)]));
        assert_eq!(y.difference(&x), ctr(&[("c", 2.0)]));
    }

    #[test]
    fn empty_counter() {
        let c = TokenCounter::from_tokens(Vec::<String>::new());
        assert!(c.is_empty());
        assert_eq!(c.total(), 0.0);
        assert_eq!(c.get("missing"), 0.0);
        assert!(c.total().is_sign_positive());
        assert!(x_minus_x().total().is_sign_positive());
    }

    fn x_minus_x() -> TokenCounter {
        let x = ctr(&[("a", 1.0)]);
        x.difference(&x)
    }

    #[test]
    fn equality_ignores_order_and_zero_weights() {
        let x = ctr(&[("a", 1.0), ("b", 2.0)]);
        let y = ctr(&[("b", 2.0), ("a", 1.0)]);
        assert_eq!(x, y);

        let mut z = ctr(&[("c", 1.0), ("b", 2.0), ("a", 1.0)]);
        z.set("c", 0.0);
        assert_eq!(x, z);
        assert_ne!(x, ctr(&[("a", 1.0), ("b", 3.0)]));
        assert_ne!(x, ctr(&[("a", 1.0)]));
    }
}
