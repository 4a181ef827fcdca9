//! String metrics.
//!
//! [`Distance`] is the shared runtime contract for every comparator in the crate: the
//! token-based measures in [`crate::coefficient`] implement it, and the character-level metrics
//! here implement it too so they can serve as the secondary metric of the fuzzy, soft and group
//! intersection policies.
//!
//! References:
//! - Levenshtein (1966): binary codes capable of correcting deletions, insertions and reversals
//! - Damerau (1964); Lowrance & Wagner (1975): edit distance with transpositions
//! - Winkler (1990): string comparator metrics for record linkage

use crate::Error;
use std::collections::HashMap;
use std::sync::Arc;

/// A string similarity/distance measure.
///
/// Implementors provide [`Distance::sim`]; `dist` defaults to `1 - sim` and `dist_abs` to
/// `dist`. Measures that have a natural unnormalised form (edit counts) override `dist_abs`.
pub trait Distance: Send + Sync {
    /// Similarity in `[0, 1]`.
    fn sim(&self, src: &str, tar: &str) -> f64;

    /// Normalised distance.
    fn dist(&self, src: &str, tar: &str) -> f64 {
        1.0 - self.sim(src, tar)
    }

    /// Absolute (possibly unbounded) distance.
    fn dist_abs(&self, src: &str, tar: &str) -> f64 {
        self.dist(src, tar)
    }

    /// Short name (for logging).
    fn name(&self) -> &'static str;
}

/// Resolve a metric by name: `levenshtein`, `damerau-levenshtein`, `jaro-winkler`, `lcprefix`.
pub fn metric_by_name(name: &str) -> Result<Arc<dyn Distance>, Error> {
    match name {
        "levenshtein" => Ok(Arc::new(Levenshtein)),
        "damerau-levenshtein" | "damerau" => Ok(Arc::new(DamerauLevenshtein)),
        "jaro-winkler" => Ok(Arc::new(JaroWinkler::default())),
        "lcprefix" => Ok(Arc::new(LcPrefix)),
        other => Err(Error::UnknownMetric(other.to_string())),
    }
}

fn max_len(a: &[char], b: &[char]) -> usize {
    a.len().max(b.len())
}

/// Levenshtein edit distance (unit costs).
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl Levenshtein {
    /// Number of single-character insertions, deletions and substitutions.
    pub fn edits(&self, src: &str, tar: &str) -> usize {
        let a: Vec<char> = src.chars().collect();
        let b: Vec<char> = tar.chars().collect();
        levenshtein_chars(&a, &b)
    }
}

fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    // Keep the shorter string in the inner loop.
    let (a, b) = if a.len() > b.len() { (b, a) } else { (a, b) };
    let m = a.len();

    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr: Vec<usize> = vec![0; m + 1];

    for (j, &bc) in b.iter().enumerate() {
        curr[0] = j + 1;
        for i in 1..=m {
            let cost = usize::from(a[i - 1] != bc);
            curr[i] = (prev[i] + 1).min(curr[i - 1] + 1).min(prev[i - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

impl Distance for Levenshtein {
    fn sim(&self, src: &str, tar: &str) -> f64 {
        1.0 - self.dist(src, tar)
    }

    fn dist(&self, src: &str, tar: &str) -> f64 {
        let a: Vec<char> = src.chars().collect();
        let b: Vec<char> = tar.chars().collect();
        let longest = max_len(&a, &b);
        if longest == 0 {
            return 0.0;
        }
        levenshtein_chars(&a, &b) as f64 / longest as f64
    }

    fn dist_abs(&self, src: &str, tar: &str) -> f64 {
        self.edits(src, tar) as f64
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Damerau-Levenshtein distance with unrestricted adjacent transpositions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DamerauLevenshtein;

impl DamerauLevenshtein {
    /// Edit count allowing transpositions of adjacent characters (Lowrance-Wagner).
    pub fn edits(&self, src: &str, tar: &str) -> usize {
        let a: Vec<char> = src.chars().collect();
        let b: Vec<char> = tar.chars().collect();
        damerau_chars(&a, &b)
    }
}

fn damerau_chars(a: &[char], b: &[char]) -> usize {
    let (m, n) = (a.len(), b.len());
    if m == 0 || n == 0 {
        return m.max(n);
    }
    let inf = m + n;
    // (m + 2) x (n + 2) table; row/col 0 hold the sentinel.
    let mut d = vec![vec![0usize; n + 2]; m + 2];
    d[0][0] = inf;
    for i in 0..=m {
        d[i + 1][0] = inf;
        d[i + 1][1] = i;
    }
    for j in 0..=n {
        d[0][j + 1] = inf;
        d[1][j + 1] = j;
    }

    let mut last_row: HashMap<char, usize> = HashMap::new();
    for i in 1..=m {
        let mut last_match_col = 0usize;
        for j in 1..=n {
            let i1 = last_row.get(&b[j - 1]).copied().unwrap_or(0);
            let j1 = last_match_col;
            let cost = if a[i - 1] == b[j - 1] {
                last_match_col = j;
                0
            } else {
                1
            };
            d[i + 1][j + 1] = (d[i][j] + cost)
                .min(d[i + 1][j] + 1)
                .min(d[i][j + 1] + 1)
                .min(d[i1][j1] + (i - i1 - 1) + 1 + (j - j1 - 1));
        }
        last_row.insert(a[i - 1], i);
    }
    d[m + 1][n + 1]
}

impl Distance for DamerauLevenshtein {
    fn sim(&self, src: &str, tar: &str) -> f64 {
        1.0 - self.dist(src, tar)
    }

    fn dist(&self, src: &str, tar: &str) -> f64 {
        let a: Vec<char> = src.chars().collect();
        let b: Vec<char> = tar.chars().collect();
        let longest = max_len(&a, &b);
        if longest == 0 {
            return 0.0;
        }
        damerau_chars(&a, &b) as f64 / longest as f64
    }

    fn dist_abs(&self, src: &str, tar: &str) -> f64 {
        self.edits(src, tar) as f64
    }

    fn name(&self) -> &'static str {
        "damerau-levenshtein"
    }
}

/// Jaro-Winkler similarity.
#[derive(Debug, Clone, Copy)]
pub struct JaroWinkler {
    /// Weight given to each matching prefix character.
    pub prefix_scale: f64,
    /// Longest prefix considered.
    pub max_prefix: usize,
    /// The prefix boost only applies above this Jaro score.
    pub boost_threshold: f64,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        Self {
            prefix_scale: 0.1,
            max_prefix: 4,
            boost_threshold: 0.7,
        }
    }
}

/// Plain Jaro similarity.
pub fn jaro(src: &str, tar: &str) -> f64 {
    let a: Vec<char> = src.chars().collect();
    let b: Vec<char> = tar.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Match window: floor(max(|a|, |b|) / 2) - 1
    let window = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for i in 0..a.len() {
        let lo = i.saturating_sub(window);
        let hi = (i + window + 1).min(b.len());
        for j in lo..hi {
            if b_matched[j] || a[i] != b[j] {
                continue;
            }
            a_matched[i] = true;
            b_matched[j] = true;
            matches += 1;
            break;
        }
    }
    if matches == 0 {
        return 0.0;
    }

    let mut k = 0usize;
    let mut half_transpositions = 0usize;
    for i in 0..a.len() {
        if !a_matched[i] {
            continue;
        }
        while !b_matched[k] {
            k += 1;
        }
        if a[i] != b[k] {
            half_transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let t = (half_transpositions / 2) as f64;
    (m / a.len() as f64 + m / b.len() as f64 + (m - t) / m) / 3.0
}

impl Distance for JaroWinkler {
    fn sim(&self, src: &str, tar: &str) -> f64 {
        let j = jaro(src, tar);
        if j <= self.boost_threshold {
            return j;
        }
        let prefix = src
            .chars()
            .zip(tar.chars())
            .take(self.max_prefix)
            .take_while(|(x, y)| x == y)
            .count() as f64;
        (j + prefix * self.prefix_scale * (1.0 - j)).min(1.0)
    }

    fn name(&self) -> &'static str {
        "jaro-winkler"
    }
}

/// Longest common prefix.
///
/// `dist_abs` is the prefix length (in characters); `sim` normalises it by the longer string.
#[derive(Debug, Clone, Copy, Default)]
pub struct LcPrefix;

impl LcPrefix {
    /// Length of the longest common prefix in characters.
    pub fn prefix_len(&self, src: &str, tar: &str) -> usize {
        src.chars()
            .zip(tar.chars())
            .take_while(|(x, y)| x == y)
            .count()
    }
}

impl Distance for LcPrefix {
    fn sim(&self, src: &str, tar: &str) -> f64 {
        let longest = src.chars().count().max(tar.chars().count());
        if longest == 0 {
            return 1.0;
        }
        self.prefix_len(src, tar) as f64 / longest as f64
    }

    fn dist_abs(&self, src: &str, tar: &str) -> f64 {
        self.prefix_len(src, tar) as f64
    }

    fn name(&self) -> &'static str {
        "lcprefix"
    }
}
