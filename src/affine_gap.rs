//! Affine-gap edit distance, as used for record linkage of short fields.
//!
//! Opening a gap costs `gap + space`, extending it costs `space`. Once the shorter string is
//! exhausted, further insertions are charged at `abbreviation_scale` of the usual cost, so
//! abbreviations ("Inc" vs "Incorporated") stay close. With a negative `match_weight` the
//! result can be negative: lower is more similar.

use crate::Error;

/// Weights for [`affine_gap_distance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineGapParams {
    /// Cost of aligning two equal characters.
    pub match_weight: f64,
    /// Cost of aligning two different characters.
    pub mismatch_weight: f64,
    /// Cost of opening a gap.
    pub gap_weight: f64,
    /// Cost of each gap position.
    pub space_weight: f64,
    /// Discount for gap positions past the end of the shorter string.
    pub abbreviation_scale: f64,
}

impl Default for AffineGapParams {
    fn default() -> Self {
        Self {
            match_weight: 1.0,
            mismatch_weight: 11.0,
            gap_weight: 10.0,
            space_weight: 7.0,
            abbreviation_scale: 0.125,
        }
    }
}

/// Affine-gap distance between `s1` and `s2`.
pub fn affine_gap_distance(s1: &str, s2: &str, p: &AffineGapParams) -> f64 {
    let mut a: Vec<char> = s1.chars().collect();
    let mut b: Vec<char> = s2.chars().collect();

    if a == b && p.match_weight <= p.mismatch_weight.min(p.gap_weight) {
        return p.match_weight * a.len() as f64;
    }
    // `a` is the longer string.
    if a.len() < b.len() {
        std::mem::swap(&mut a, &mut b);
    }
    let (len1, len2) = (a.len(), b.len());

    let mut deletion = vec![f64::INFINITY; len1 + 1];
    let mut current = vec![0.0f64; len1 + 1];
    let mut previous = vec![0.0f64; len1 + 1];

    for (j, v) in current.iter_mut().enumerate().skip(1) {
        *v = p.gap_weight + p.space_weight * j as f64;
    }

    for i in 1..=len2 {
        let c2 = b[i - 1];
        previous.copy_from_slice(&current);
        current[0] = p.gap_weight + p.space_weight * i as f64;
        let mut insertion = f64::INFINITY;

        for j in 1..=len1 {
            insertion = if j <= len2 {
                insertion.min(current[j - 1] + p.gap_weight) + p.space_weight
            } else {
                insertion.min(current[j - 1] + p.gap_weight * p.abbreviation_scale)
                    + p.space_weight * p.abbreviation_scale
            };
            deletion[j] = deletion[j].min(previous[j] + p.gap_weight) + p.space_weight;
            let substitution = if a[j - 1] == c2 {
                previous[j - 1] + p.match_weight
            } else {
                previous[j - 1] + p.mismatch_weight
            };
            current[j] = insertion.min(deletion[j]).min(substitution);
        }
    }
    current[len1]
}

/// [`affine_gap_distance`] divided by the combined length of both strings.
///
/// Returns [`Error::EmptyInput`] when both strings are empty.
pub fn normalized_affine_gap_distance(s1: &str, s2: &str, p: &AffineGapParams) -> Result<f64, Error> {
    let total = s1.chars().count() + s2.chars().count();
    if total == 0 {
        return Err(Error::EmptyInput);
    }
    Ok(affine_gap_distance(s1, s2, p) / total as f64)
}
