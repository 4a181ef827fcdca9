//! Snowball stemmer for Norwegian (Bokmål).
//!
//! Works on the lowercased word. `R1` starts after the first non-vowel that follows a vowel,
//! and never before the fourth letter. Each step looks for the longest listed suffix lying
//! entirely inside `R1`:
//! 1. inflectional endings (deleted; `erte`/`ert` become `er`; a final `s` is deleted after a
//!    valid s-ending)
//! 2. `dt`/`vt`: drop the `t`
//! 3. derivational endings (`leg`, `lig`, `els`, `lov`, ... deleted)

use super::Stemmer;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y', 'æ', 'å', 'ø'];
const S_ENDINGS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'l', 'm', 'n', 'o', 'p', 'r', 't', 'v', 'y', 'z',
];

const STEP1_DELETE: &[&str] = &[
    "hetenes", "hetene", "hetens", "heten", "heter", "endes", "ande", "ende", "edes", "enes",
    "ede", "ane", "ene", "het", "ens", "ers", "ets", "ast", "en", "ar", "er", "as", "es", "et",
    "a", "e",
];
const STEP1_TO_ER: &[&str] = &["erte", "ert"];
const STEP3_DELETE: &[&str] = &[
    "hetslov", "eleg", "elig", "elov", "slov", "leg", "eig", "lig", "els", "lov", "ig",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SnowballNorwegian;

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

fn r1_start(word: &[char]) -> usize {
    let start = word
        .windows(2)
        .position(|w| is_vowel(w[0]) && !is_vowel(w[1]))
        .map_or(word.len(), |i| i + 2);
    start.max(3)
}

fn ends_in_r1(word: &[char], suffix: &str, r1: usize) -> bool {
    let suffix: Vec<char> = suffix.chars().collect();
    word.len() >= r1 + suffix.len() && word.ends_with(&suffix)
}

/// Longest of `suffixes` ending `word` inside `R1`, as a char count.
fn longest_in_r1(word: &[char], suffixes: &[&str], r1: usize) -> Option<usize> {
    suffixes
        .iter()
        .filter(|s| ends_in_r1(word, s, r1))
        .map(|s| s.chars().count())
        .max()
}

impl SnowballNorwegian {
    fn step1(word: &mut Vec<char>, r1: usize) {
        let delete = longest_in_r1(word, STEP1_DELETE, r1);
        let to_er = longest_in_r1(word, STEP1_TO_ER, r1);
        match (delete, to_er) {
            (_, Some(len)) if delete.map_or(true, |d| len >= d) => {
                word.truncate(word.len() - len);
                word.extend(['e', 'r']);
            }
            (Some(len), _) => word.truncate(word.len() - len),
            _ => {
                let n = word.len();
                if n >= 2 && n > r1 && word[n - 1] == 's' {
                    let prev = word[n - 2];
                    let k_after_consonant = prev == 'k' && n >= 3 && !is_vowel(word[n - 3]);
                    if S_ENDINGS.contains(&prev) || k_after_consonant {
                        word.pop();
                    }
                }
            }
        }
    }

    fn step2(word: &mut Vec<char>, r1: usize) {
        if ends_in_r1(word, "dt", r1) || ends_in_r1(word, "vt", r1) {
            word.pop();
        }
    }

    fn step3(word: &mut Vec<char>, r1: usize) {
        if let Some(len) = longest_in_r1(word, STEP3_DELETE, r1) {
            word.truncate(word.len() - len);
        }
    }
}

impl Stemmer for SnowballNorwegian {
    fn stem(&self, word: &str) -> String {
        let mut w: Vec<char> = word.to_lowercase().chars().collect();
        let r1 = r1_start(&w);
        Self::step1(&mut w, r1);
        Self::step2(&mut w, r1);
        Self::step3(&mut w, r1);
        w.into_iter().collect()
    }

    fn name(&self) -> &'static str {
        "snowball-norwegian"
    }
}
