//! Similarity coefficients over the contingency table.
//!
//! A [`Coefficient`] is a pure function of `(a, b, c, d, n)`. It never divides by zero: each
//! one documents the value it returns for degenerate tables. [`TokenMeasure`] pairs a
//! coefficient with a [`TokenDistance`] and exposes the string-level [`Distance`] contract.
//!
//! References:
//! - Jaccard (1901); Dice (1945); Ochiai (1957); Tversky (1977)
//! - Sokal & Michener (1958); Russell & Rao (1940)
//! - Harris & Lahey (1978); Baroni-Urbani & Buser (1976); Batagelj & Bren (1995)
//! - Yule (1912); Pearson & Heron (1913)
//! - Warrens (2008): catalog of 2x2 similarity coefficients

use crate::metric::Distance;
use crate::token_distance::{Comparison, ContingencyTable, TokenDistance};

/// A similarity coefficient over a contingency table.
pub trait Coefficient: Send + Sync {
    /// Similarity.
    fn sim(&self, t: &ContingencyTable) -> f64;

    /// Normalised distance (`1 - sim` unless overridden).
    fn dist(&self, t: &ContingencyTable) -> f64 {
        1.0 - self.sim(t)
    }

    /// Absolute distance (`dist` unless the measure has an unbounded form).
    fn dist_abs(&self, t: &ContingencyTable) -> f64 {
        self.dist(t)
    }

    /// Whether `sim(X, Y) == sim(Y, X)`.
    fn symmetric(&self) -> bool {
        true
    }

    /// Short name.
    fn name(&self) -> &'static str;
}

impl<C: Coefficient + ?Sized> Coefficient for Box<C> {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        (**self).sim(t)
    }

    fn dist(&self, t: &ContingencyTable) -> f64 {
        (**self).dist(t)
    }

    fn dist_abs(&self, t: &ContingencyTable) -> f64 {
        (**self).dist_abs(t)
    }

    fn symmetric(&self) -> bool {
        (**self).symmetric()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// A coefficient bound to a tokenizer/intersection/population configuration.
///
/// Identical strings short-circuit to `sim = 1`, `dist = dist_abs = 0` without tokenizing;
/// degenerate tokenizations (e.g. two empty multisets) would otherwise give undefined ratios.
#[derive(Debug)]
pub struct TokenMeasure<C> {
    framework: TokenDistance,
    coefficient: C,
}

impl<C: Coefficient> TokenMeasure<C> {
    /// Use the default framework: padded bigrams, crisp intersection, population `28^2`.
    pub fn new(coefficient: C) -> Self {
        Self::with_framework(coefficient, TokenDistance::default())
    }

    /// Use a configured framework.
    pub fn with_framework(coefficient: C, framework: TokenDistance) -> Self {
        Self {
            framework,
            coefficient,
        }
    }

    pub fn framework(&self) -> &TokenDistance {
        &self.framework
    }

    pub fn coefficient(&self) -> &C {
        &self.coefficient
    }

    /// Contingency table of a pair (no identity short-circuit).
    pub fn compare(&self, src: &str, tar: &str) -> Comparison {
        self.framework.compare(src, tar)
    }
}

impl<C: Coefficient> Distance for TokenMeasure<C> {
    fn sim(&self, src: &str, tar: &str) -> f64 {
        if src == tar {
            return 1.0;
        }
        self.coefficient.sim(&self.compare(src, tar).table())
    }

    fn dist(&self, src: &str, tar: &str) -> f64 {
        if src == tar {
            return 0.0;
        }
        self.coefficient.dist(&self.compare(src, tar).table())
    }

    fn dist_abs(&self, src: &str, tar: &str) -> f64 {
        if src == tar {
            return 0.0;
        }
        self.coefficient.dist_abs(&self.compare(src, tar).table())
    }

    fn name(&self) -> &'static str {
        self.coefficient.name()
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Jaccard: `a / (a + b + c)`. Empty union gives 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jaccard;

impl Coefficient for Jaccard {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        ratio(t.a, t.a + t.b + t.c)
    }

    fn name(&self) -> &'static str {
        "jaccard"
    }
}

/// Sørensen-Dice: `2a / (2a + b + c)`. Empty inputs give 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dice;

impl Coefficient for Dice {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        ratio(2.0 * t.a, 2.0 * t.a + t.b + t.c)
    }

    fn name(&self) -> &'static str {
        "dice"
    }
}

/// Szymkiewicz-Simpson overlap: `a / min(a + b, a + c)`. An empty side gives 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlap;

impl Coefficient for Overlap {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        ratio(t.a, (t.a + t.b).min(t.a + t.c))
    }

    fn name(&self) -> &'static str {
        "overlap"
    }
}

/// Ochiai / cosine: `a / sqrt((a + b)(a + c))`. An empty side gives 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl Coefficient for Cosine {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        ratio(t.a, ((t.a + t.b) * (t.a + t.c)).sqrt())
    }

    fn name(&self) -> &'static str {
        "cosine"
    }
}

/// Tversky index: `a / (a + αb + βc)`. Zero denominator gives 0.
///
/// `α = β = 1` is Jaccard, `α = β = 0.5` is Dice; unequal weights make it asymmetric.
#[derive(Debug, Clone, Copy)]
pub struct Tversky {
    /// Weight of source-only tokens.
    pub alpha: f64,
    /// Weight of target-only tokens.
    pub beta: f64,
}

impl Default for Tversky {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }
}

impl Coefficient for Tversky {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        ratio(t.a, t.a + self.alpha * t.b + self.beta * t.c)
    }

    fn symmetric(&self) -> bool {
        self.alpha == self.beta
    }

    fn name(&self) -> &'static str {
        "tversky"
    }
}

/// Sokal-Michener simple matching: `(a + d) / n`. Empty population gives 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMatching;

impl Coefficient for SimpleMatching {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        ratio(t.a + t.d, t.n)
    }

    fn name(&self) -> &'static str {
        "simple-matching"
    }
}

/// Russell-Rao: `a / n`. Empty population gives 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct RussellRao;

impl Coefficient for RussellRao {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        ratio(t.a, t.n)
    }

    fn name(&self) -> &'static str {
        "russell-rao"
    }
}

/// Harris & Lahey:
/// `a/(a+b+c) · (2d+b+c)/(2n) + d/(d+b+c) · (2a+b+c)/(2n)`.
///
/// Each term is dropped when its leading count or its denominator is zero, so a table with
/// no overlap and no complement scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarrisLahey;

impl Coefficient for HarrisLahey {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        let ContingencyTable { a, b, c, d, n } = *t;
        let mut score = 0.0;
        if a != 0.0 && d + b + c != 0.0 {
            score += a / (a + b + c) * (2.0 * d + b + c) / (2.0 * n);
        }
        if d != 0.0 && a + b + c != 0.0 {
            score += d / (d + b + c) * (2.0 * a + b + c) / (2.0 * n);
        }
        score
    }

    fn name(&self) -> &'static str {
        "harris-lahey"
    }
}

/// Baroni-Urbani & Buser I: `(√(ad) + a) / (√(ad) + a + b + c)`. Zero denominator gives 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaroniUrbaniBuserI;

impl Coefficient for BaroniUrbaniBuserI {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        let root = (t.a * t.d).sqrt();
        ratio(root + t.a, root + t.a + t.b + t.c)
    }

    fn name(&self) -> &'static str {
        "baroni-urbani-buser-i"
    }
}

/// Batagelj & Bren.
///
/// `dist_abs = bc / (ad)`, infinite when `a` or `d` is zero; `dist` divides that by `n`, is
/// capped at 1 for small populations and is 1 in the infinite case.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatageljBren;

impl Coefficient for BatageljBren {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        1.0 - self.dist(t)
    }

    fn dist(&self, t: &ContingencyTable) -> f64 {
        if t.a == 0.0 || t.d == 0.0 {
            return 1.0;
        }
        ((t.b * t.c / (t.a * t.d)) / (t.a + t.b + t.c + t.d)).min(1.0)
    }

    fn dist_abs(&self, t: &ContingencyTable) -> f64 {
        if t.a == 0.0 || t.d == 0.0 {
            return f64::INFINITY;
        }
        t.b * t.c / (t.a * t.d)
    }

    fn name(&self) -> &'static str {
        "batagelj-bren"
    }
}

/// Unnamed coefficient "B" of Warrens' catalog:
/// `(ad − bc)² / ((a+b)(a+c)(b+d)(c+d))`.
///
/// Exactly 0 whenever `ad == bc`; every zero denominator implies a zero numerator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownB;

impl Coefficient for UnknownB {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        let ContingencyTable { a, b, c, d, .. } = *t;
        let num = (a * d - b * c).powi(2);
        if num == 0.0 {
            return 0.0;
        }
        num / ((a + b) * (a + c) * (b + d) * (c + d))
    }

    fn name(&self) -> &'static str {
        "unknown-b"
    }
}

/// Yule's Q, rescaled to `[0, 1]`: `((ad − bc)/(ad + bc) + 1) / 2`.
///
/// With `ad + bc == 0` the correlation is taken as 0, giving 0.5.
#[derive(Debug, Clone, Copy, Default)]
pub struct YuleQ;

impl YuleQ {
    /// Yule's Q in `[-1, 1]`.
    pub fn corr(&self, t: &ContingencyTable) -> f64 {
        let ad = t.a * t.d;
        let bc = t.b * t.c;
        ratio(ad - bc, ad + bc)
    }
}

impl Coefficient for YuleQ {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        (self.corr(t) + 1.0) / 2.0
    }

    fn name(&self) -> &'static str {
        "yule-q"
    }
}

/// Pearson's φ, rescaled to `[0, 1]`: `(φ + 1) / 2` with
/// `φ = (ad − bc) / √((a+b)(a+c)(b+d)(c+d))`.
///
/// A zero marginal makes φ 0, giving 0.5.
#[derive(Debug, Clone, Copy, Default)]
pub struct Phi;

impl Phi {
    /// φ in `[-1, 1]`.
    pub fn corr(&self, t: &ContingencyTable) -> f64 {
        let ContingencyTable { a, b, c, d, .. } = *t;
        ratio(a * d - b * c, ((a + b) * (a + c) * (b + d) * (c + d)).sqrt())
    }
}

impl Coefficient for Phi {
    fn sim(&self, t: &ContingencyTable) -> f64 {
        (self.corr(t) + 1.0) / 2.0
    }

    fn name(&self) -> &'static str {
        "phi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-12
    }

    const PAIRS: [(&str, &str); 4] = [
        ("cat", "hat"),
        ("Niall", "Neil"),
        ("aluminum", "Catalan"),
        ("ATCG", "TAGC"),
    ];

    type Probe<C> = fn(&TokenMeasure<C>, &str, &str) -> f64;

    fn check<C: Coefficient>(measure: &TokenMeasure<C>, f: Probe<C>, want: [f64; 4]) {
        for ((s, t), w) in PAIRS.iter().zip(want) {
            let got = f(measure, s, t);
            assert!(
                close(got, w) || (got.is_infinite() && w.is_infinite()),
                "{s}/{t}: {got} != {w}"
            );
        }
    }

    #[test]
    fn harris_lahey_reference_values() {
        check(
            &TokenMeasure::new(HarrisLahey),
            |m, s, t| m.sim(s, t),
            [
                0.3367085964820711,
                0.22761577457069784,
                0.07244410503054725,
                0.006296204706372345,
            ],
        );
    }

    #[test]
    fn baroni_urbani_buser_reference_values() {
        check(
            &TokenMeasure::new(BaroniUrbaniBuserI),
            |m, s, t| m.sim(s, t),
            [0.9119837740878104, 0.8552823175014205, 0.656992712054851, 0.0],
        );
    }

    #[test]
    fn unknown_b_reference_values() {
        check(
            &TokenMeasure::new(UnknownB),
            |m, s, t| m.sim(s, t),
            [
                0.24744247205785666,
                0.13009912077202224,
                0.011710186806836291,
                4.1196952743799446e-05,
            ],
        );
    }

    #[test]
    fn batagelj_bren_reference_values() {
        let m = TokenMeasure::new(BatageljBren);
        check(
            &m,
            |m, s, t| m.dist_abs(s, t),
            [
                0.002570694087403599,
                0.007741935483870968,
                0.07282184655396619,
                f64::INFINITY,
            ],
        );
        check(
            &m,
            |m, s, t| m.dist(s, t),
            [
                3.2789465400556106e-06,
                9.874917709019092e-06,
                9.276668350823718e-05,
                1.0,
            ],
        );
        assert_eq!(m.dist_abs("cat", "cat"), 0.0);
    }

    #[test]
    fn batagelj_bren_stays_bounded_on_small_populations() {
        // a = 1, b = c = 3, d = 1: bc / (ad) = 9, n = 8.
        let t = ContingencyTable::new(1.0, 3.0, 3.0, 1.0);
        assert_eq!(BatageljBren.dist_abs(&t), 9.0);
        assert_eq!(BatageljBren.dist(&t), 1.0);
        assert_eq!(BatageljBren.sim(&t), 0.0);

        let td = TokenDistance::builder()
            .qval(0)
            .alphabet(8usize)
            .build()
            .unwrap();
        let m = TokenMeasure::with_framework(BatageljBren, td);
        let sim = m.sim("a b c d", "a e f g");
        assert!((0.0..=1.0).contains(&sim), "{sim}");
    }

    #[test]
    fn set_coefficients_on_cat_hat() {
        assert!(close(TokenMeasure::new(Jaccard).sim("cat", "hat"), 1.0 / 3.0));
        assert!(close(TokenMeasure::new(Dice).sim("cat", "hat"), 0.5));
        assert!(close(TokenMeasure::new(Overlap).sim("cat", "hat"), 0.5));
        assert!(close(TokenMeasure::new(Cosine).sim("cat", "hat"), 0.5));
        assert!(close(
            TokenMeasure::new(Tversky { alpha: 0.5, beta: 0.5 }).sim("cat", "hat"),
            0.5
        ));
        assert!(close(
            TokenMeasure::new(SimpleMatching).sim("cat", "hat"),
            780.0 / 784.0
        ));
        assert!(close(TokenMeasure::new(RussellRao).sim("cat", "hat"), 2.0 / 784.0));
        assert!(close(
            TokenMeasure::new(YuleQ).sim("cat", "hat"),
            (1552.0 / 1560.0 + 1.0) / 2.0
        ));
        assert!(close(
            TokenMeasure::new(Phi).sim("cat", "hat"),
            (1552.0 / 3120.0 + 1.0) / 2.0
        ));
    }

    #[test]
    fn zero_numerator_is_exactly_zero() {
        // ad == bc, including a = d = 0.
        assert_eq!(UnknownB.sim(&ContingencyTable::new(0.0, 3.0, 0.0, 0.0)), 0.0);
        assert_eq!(UnknownB.sim(&ContingencyTable::new(2.0, 2.0, 2.0, 2.0)), 0.0);
        assert_eq!(UnknownB.sim(&ContingencyTable::default()), 0.0);
    }

    #[test]
    fn degenerate_tables_never_divide_by_zero() {
        let empty = ContingencyTable::default();
        let coefficients: Vec<Box<dyn Coefficient>> = vec![
            Box::new(Jaccard),
            Box::new(Dice),
            Box::new(Overlap),
            Box::new(Cosine),
            Box::new(Tversky::default()),
            Box::new(SimpleMatching),
            Box::new(RussellRao),
            Box::new(HarrisLahey),
            Box::new(BaroniUrbaniBuserI),
            Box::new(BatageljBren),
            Box::new(UnknownB),
            Box::new(YuleQ),
            Box::new(Phi),
        ];
        for c in &coefficients {
            let s = c.sim(&empty);
            assert!(s.is_finite() && (0.0..=1.0).contains(&s), "{}: {s}", c.name());
        }
    }

    #[test]
    fn identical_strings_short_circuit() {
        let m = TokenMeasure::new(Jaccard);
        assert_eq!(m.sim("", ""), 1.0);
        assert_eq!(m.dist("", ""), 0.0);
        assert_eq!(m.sim("same", "same"), 1.0);
        // Different strings with no tokens in common score 0.
        assert_eq!(m.sim("", "abc"), 0.0);
        assert_eq!(m.dist("", "abc"), 1.0);
    }

    #[test]
    fn tversky_asymmetry() {
        let t = Tversky {
            alpha: 1.0,
            beta: 0.0,
        };
        assert!(!t.symmetric());
        let table = ContingencyTable::new(1.0, 1.0, 3.0, 0.0);
        assert!(close(t.sim(&table), 0.5));
    }
}
