use std::sync::Arc;

use tokensim::coefficient::{BatageljBren, Coefficient, HarrisLahey, Jaccard, TokenMeasure, UnknownB};
use tokensim::counter::TokenCounter;
use tokensim::intersection::{Intersection, IntersectionType};
use tokensim::metric::{Distance, JaroWinkler};
use tokensim::population::{Alphabet, Population};
use tokensim::scaler::Scaler;
use tokensim::token_distance::{ContingencyTable, TokenDistance};
use tokensim::tokenizer::{
    CVClusterTokenizer, QGrams, SynonymTokenizer, Tokenizer, WhitespaceTokenizer,
};
use tokensim::Error;

fn close(x: f64, y: f64) -> bool {
    (x - y).abs() < 1e-12
}

#[test]
fn harris_lahey_end_to_end() {
    let m = TokenMeasure::new(HarrisLahey);
    assert!(close(m.sim("cat", "hat"), 0.3367085964820711));
    assert!(close(m.sim("ATCG", "TAGC"), 0.006296204706372345));
    assert!(close(m.dist("cat", "hat"), 1.0 - 0.3367085964820711));
    assert_eq!(m.name(), "harris-lahey");
}

#[test]
fn unknown_b_is_zero_when_ad_equals_bc() {
    // Derived population with an empty source: a == b == d == 0, so ad == bc == 0.
    let td = TokenDistance::builder()
        .alphabet(Alphabet::Derived)
        .build()
        .unwrap();
    let m = TokenMeasure::with_framework(UnknownB, td);
    let t = m.compare("", "abc").table();
    assert_eq!((t.a, t.b, t.c, t.d), (0.0, 0.0, 4.0, 0.0));
    assert_eq!(m.sim("", "abc"), 0.0);

    // Disjoint inputs have ad == 0 but bc > 0, which is maximal dissociation.
    assert_eq!(m.sim("abc", "xyz"), 1.0);

    // ad == bc with every cell non-zero.
    assert_eq!(UnknownB.sim(&ContingencyTable::new(2.0, 1.0, 4.0, 2.0)), 0.0);
    assert!(close(TokenMeasure::new(UnknownB).sim("cat", "hat"), 0.24744247205785666));
}

#[test]
fn batagelj_bren_on_a_tiny_population() {
    let td = TokenDistance::builder()
        .qval(0)
        .alphabet(8usize)
        .build()
        .unwrap();
    let m = TokenMeasure::with_framework(BatageljBren, td);
    let t = m.compare("a b c d", "a e f g").table();
    assert_eq!((t.a, t.b, t.c, t.d, t.n), (1.0, 3.0, 3.0, 1.0, 8.0));
    assert_eq!(m.dist_abs("a b c d", "a e f g"), 9.0);
    assert_eq!(m.dist("a b c d", "a e f g"), 1.0);
    assert_eq!(m.sim("a b c d", "a e f g"), 0.0);
}

#[test]
fn whitespace_counter_literal() {
    let tokens = WhitespaceTokenizer::new().tokenize("a b c f a c g e a b");
    let counter = tokens.get_counter();
    let got: Vec<(&str, f64)> = counter.iter().collect();
    assert_eq!(
        got,
        [("a", 3.0), ("b", 2.0), ("c", 2.0), ("f", 1.0), ("g", 1.0), ("e", 1.0)]
    );
}

#[test]
fn cv_cluster_literals() {
    let tok = CVClusterTokenizer::new();
    assert_eq!(
        tok.tokenize("seven-twelfths").get_list(),
        ["se", "ve", "n", "-", "twe", "lfths"]
    );
    assert_eq!(tok.tokenize("character").get_list(), ["cha", "ra", "cte", "r"]);
}

#[test]
fn empty_strings_compare_cleanly() {
    let m = TokenMeasure::new(Jaccard);
    assert_eq!(m.sim("", ""), 1.0);
    assert_eq!(m.sim("", "abc"), 0.0);
    let cmp = TokenDistance::default().compare("", "");
    let t = cmp.table();
    assert_eq!((t.a, t.b, t.c, t.d, t.n), (0.0, 0.0, 0.0, 784.0, 784.0));
    assert!(cmp.src_tokens().is_empty());
}

#[test]
fn dna_alphabet_shrinks_the_population() {
    let td = TokenDistance::builder()
        .tokenizer(QGrams::new().start_stop(None))
        .alphabet("ACGT")
        .build()
        .unwrap();
    assert_eq!(td.population(), &Population::Size(16.0));
    let t = td.compare("ATCG", "TAGC").table();
    // {AT, TC, CG} vs {TA, AG, GC}
    assert_eq!((t.a, t.b, t.c, t.d, t.n), (0.0, 3.0, 3.0, 10.0, 16.0));
}

#[test]
fn weighted_population() {
    let pop: TokenCounter = [("a", 2.0), ("b", 1.0), ("zz", 4.0)].into_iter().collect();
    let td = TokenDistance::builder()
        .qval(0)
        .alphabet(pop)
        .build()
        .unwrap();
    let t = td.compare("a b", "b c").table();
    // U = {a, b, c}; N - U leaves a:1 and zz:4.
    assert_eq!((t.a, t.b, t.c, t.d), (1.0, 1.0, 1.0, 5.0));
    assert_eq!(t.n, 8.0);
}

#[test]
fn synonyms_merge_tokens_before_counting() {
    let tok = SynonymTokenizer::new(
        Box::new(WhitespaceTokenizer::new()),
        [vec!["user", "person", "member"], vec!["account", "profile"]],
    );
    let td = TokenDistance::builder().tokenizer(tok).build().unwrap();
    let m = TokenMeasure::with_framework(Jaccard, td);
    assert_eq!(m.sim("user account", "member profile"), 1.0);
    assert!(close(m.sim("user account", "person login"), 1.0 / 3.0));
}

#[test]
fn custom_scaler_closure() {
    let tok = QGrams::new().with_scaler(Scaler::custom(|count| count * 10.0));
    let td = TokenDistance::builder().tokenizer(tok).build().unwrap();
    let t = td.compare("cat", "hat").table();
    assert_eq!((t.a, t.b, t.c), (20.0, 20.0, 20.0));
}

#[test]
fn fuzzy_with_named_metric() {
    let td = TokenDistance::builder()
        .qval(0)
        .intersection_type(IntersectionType::Fuzzy)
        .metric(Arc::new(JaroWinkler::default()))
        .threshold(0.9)
        .build()
        .unwrap();
    let t = td.compare("martha smith", "marhta smith").table();
    // jw(martha, marhta) ~ 0.961: half of it credited to each side.
    assert!(t.a > 1.95 && t.a < 1.97);
    assert!(t.b > 0.51 && t.b < 0.53);
    assert!(close(t.b, t.c));
}

struct PrefixMatch;

impl Intersection for PrefixMatch {
    fn intersect(&self, src: &TokenCounter, tar: &TokenCounter) -> TokenCounter {
        let mut out = src.intersection(tar);
        for (s, w) in src.difference(tar).iter() {
            if tar.elements().any(|t| t.starts_with(s) || s.starts_with(t)) {
                out.add(s, w);
            }
        }
        out
    }

    fn name(&self) -> &'static str {
        "prefix"
    }
}

#[test]
fn caller_defined_intersection() {
    let td = TokenDistance::builder()
        .qval(0)
        .intersection(PrefixMatch)
        .build()
        .unwrap();
    assert_eq!(td.intersection_name(), "prefix");
    let cmp = td.compare("intl business", "international business");
    assert_eq!(cmp.intersection_card(), 1.0);

    let cmp = td.compare("inter business", "international business");
    assert_eq!(cmp.intersection_card(), 2.0);
}

#[test]
fn construction_errors() {
    assert!(matches!(
        TokenDistance::builder().threshold(-0.1).build(),
        Err(Error::InvalidThreshold(_))
    ));
    assert!(matches!(
        TokenDistance::builder().alphabet(Alphabet::FromSize(-5.0)).build(),
        Err(Error::InvalidAlphabet(_))
    ));
    assert!(matches!("length-cubed".parse::<Scaler>(), Err(Error::InvalidScaler(_))));
}

#[test]
fn measures_are_shareable_across_threads() {
    let m = &TokenMeasure::new(HarrisLahey);
    let pairs = [("cat", "hat"), ("Niall", "Neil"), ("aluminum", "Catalan")];
    let serial: Vec<f64> = pairs.iter().map(|(s, t)| m.sim(s, t)).collect();
    let parallel: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = pairs
            .iter()
            .map(|&(s, t)| scope.spawn(move || m.sim(s, t)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(serial, parallel);
}
