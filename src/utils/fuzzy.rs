//! String similarity strategies
//!
//! Scores two strings with a ratio in `[0.0, 1.0]`, where `1.0` means the
//! strings are identical. The default strategy is the Ratcliff/Obershelp
//! "gestalt" ratio that difflib's `SequenceMatcher.ratio()` computes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strsim::normalized_levenshtein;

/// A pluggable similarity metric
///
/// Implementations must return `1.0` for identical inputs and should stay
/// inside `[0.0, 1.0]`. Any `Fn(&str, &str) -> f64` is a `Similarity`, which
/// makes it easy to wrap or instrument a metric.
pub trait Similarity {
    /// Score `query` against a stored `candidate`
    fn ratio(&self, query: &str, candidate: &str) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64,
{
    fn ratio(&self, query: &str, candidate: &str) -> f64 {
        self(query, candidate)
    }
}

/// Ratcliff/Obershelp ratio: `2 * M / T`
///
/// `M` is the number of characters in matching blocks and `T` the total
/// length of both strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceRatio;

impl Similarity for SequenceRatio {
    fn ratio(&self, query: &str, candidate: &str) -> f64 {
        sequence_ratio(query, candidate)
    }
}

/// `1 - levenshtein / max_len`, backed by `strsim`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizedLevenshtein;

impl Similarity for NormalizedLevenshtein {
    fn ratio(&self, query: &str, candidate: &str) -> f64 {
        normalized_levenshtein(query, candidate)
    }
}

/// Metric selectable from the config file or the command line
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Gestalt pattern matching (difflib-compatible)
    #[default]
    Sequence,
    /// Normalized edit distance
    Levenshtein,
}

impl Similarity for Metric {
    fn ratio(&self, query: &str, candidate: &str) -> f64 {
        match self {
            Metric::Sequence => SequenceRatio.ratio(query, candidate),
            Metric::Levenshtein => NormalizedLevenshtein.ratio(query, candidate),
        }
    }
}

/// Calculate the gestalt similarity ratio between two strings
///
/// Two empty strings are identical and score `1.0`. Strings sharing no
/// character score `0.0`. Comparison is per `char` and case-sensitive.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Sum of the sizes of all matching blocks
///
/// Finds the longest common block, then recurses into the unmatched regions
/// on either side of it. An explicit stack replaces the recursion.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    // Positions of every character in `b`, ascending
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest block `a[i..i+k] == b[j..j+k]` inside `a[alo..ahi]` and `b[blo..bhi]`
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

    // j2len[j] = length of the match ending at a[i - 1] and b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = next;
    }

    (best_i, best_j, best_size)
}
