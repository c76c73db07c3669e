//! Fuzzy lookup map
//!
//! A string-keyed map that falls back to approximate key matching when a
//! lookup key is not present verbatim. Every stored key is scored against the
//! query with a [`Similarity`] strategy, and the best-scoring entry is
//! accepted if its ratio reaches the map's cutoff.

use crate::utils::fuzzy::{SequenceRatio, Similarity};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Cutoff used when none is given
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Outcome of [`FuzzyMap::search`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult<'a> {
    /// Whether `key` is set and `ratio` reached the cutoff (always true for
    /// exact hits)
    pub matched: bool,
    /// Best-scoring key, `None` only when the map is empty
    pub key: Option<&'a str>,
    /// Value stored under `key`
    pub value: Option<&'a str>,
    /// Ratio of `key`, `1.0` for exact hits
    pub ratio: f64,
}

impl SearchResult<'_> {
    fn none() -> Self {
        Self {
            matched: false,
            key: None,
            value: None,
            ratio: 0.0,
        }
    }

    /// The lookup failure for `query`, or `None` if this result matched
    pub fn miss(&self, query: &str) -> Option<NotFound> {
        match (self.matched, self.value) {
            (true, Some(_)) => None,
            _ => Some(self.not_found(query)),
        }
    }

    fn not_found(&self, query: &str) -> NotFound {
        NotFound {
            query: query.to_string(),
            closest: self.key.map(str::to_string),
            ratio: self.ratio,
        }
    }
}

/// A scored candidate key
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub key: String,
    pub ratio: f64,
}

/// No key, exact or approximate, reached the cutoff
#[derive(Debug, Clone, PartialEq)]
pub struct NotFound {
    /// The key that was looked up
    pub query: String,
    /// Closest key found, `None` for an empty map
    pub closest: Option<String>,
    /// Ratio of `closest`
    pub ratio: f64,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.closest {
            Some(key) => write!(
                f,
                "'{}'. closest match: '{}' with ratio {:.3}",
                self.query, key, self.ratio
            ),
            None => write!(f, "'{}'. no close match", self.query),
        }
    }
}

impl std::error::Error for NotFound {}

/// String map with approximate key lookup
///
/// Entries keep their insertion order, which is also the order keys are
/// scored in. On equal ratios the earliest key wins.
///
/// The cutoff is not range checked. A cutoff above `1.0` can never be reached
/// by an approximate match, and a cutoff at or below `0.0` accepts the best
/// key of any non-empty map. Exact hits are accepted whatever the cutoff.
#[derive(Debug, Clone)]
pub struct FuzzyMap<S = SequenceRatio> {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
    cutoff: f64,
    similarity: S,
}

impl Default for FuzzyMap {
    fn default() -> Self {
        Self::with_cutoff(DEFAULT_CUTOFF)
    }
}

impl FuzzyMap {
    /// Create a map from `entries` with the default similarity metric
    pub fn new<I, K, V>(entries: I, cutoff: f64) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_similarity(entries, cutoff, SequenceRatio)
    }

    /// Create an empty map
    pub fn with_cutoff(cutoff: f64) -> Self {
        Self::new(Vec::<(String, String)>::new(), cutoff)
    }
}

impl<S: Similarity> FuzzyMap<S> {
    /// Create a map from `entries` scored by `similarity`
    ///
    /// A repeated key keeps its first position and its last value.
    pub fn with_similarity<I, K, V>(entries: I, cutoff: f64, similarity: S) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self {
            entries: Vec::new(),
            index: HashMap::new(),
            cutoff,
            similarity,
        };
        map.extend(entries);
        map
    }

    /// Insert an entry, returning the previous value for `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Value for `key` only if it is stored verbatim
    pub fn get_exact(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Whether `key` matches, exactly or approximately
    ///
    /// Stops scoring at the first acceptable key.
    pub fn contains(&self, key: &str) -> bool {
        self.search(key, true).matched
    }

    /// Value of the best match for `key`
    pub fn get(&self, key: &str) -> Result<&str, NotFound> {
        let result = self.search(key, false);
        match (result.matched, result.value) {
            (true, Some(value)) => Ok(value),
            _ => Err(result.not_found(key)),
        }
    }

    /// Find the key that best matches `key`
    ///
    /// An exact hit returns immediately with ratio `1.0` and no scoring.
    /// Otherwise every key is scored in insertion order, unless
    /// `stop_on_first` is set, in which case scoring ends at the first key
    /// whose ratio reaches the cutoff. That key need not be the global best.
    /// The first key scored is always a candidate, even at ratio `0.0`.
    pub fn search(&self, key: &str, stop_on_first: bool) -> SearchResult<'_> {
        if let Some(&slot) = self.index.get(key) {
            let (k, v) = &self.entries[slot];
            return SearchResult {
                matched: true,
                key: Some(k.as_str()),
                value: Some(v.as_str()),
                ratio: 1.0,
            };
        }

        let mut best = SearchResult::none();
        for (candidate, value) in &self.entries {
            let ratio = self.similarity.ratio(key, candidate);

            if best.key.is_none() || ratio > best.ratio {
                best.key = Some(candidate.as_str());
                best.value = Some(value.as_str());
                best.ratio = ratio;
            }

            if stop_on_first && ratio >= self.cutoff {
                break;
            }
        }

        best.matched = best.key.is_some() && best.ratio >= self.cutoff;
        debug!(
            "🔎 '{}' -> {:?} (ratio {:.3}, matched: {})",
            key, best.key, best.ratio, best.matched
        );
        best
    }

    /// Up to `n` closest keys, best first, regardless of the cutoff
    ///
    /// Keys scoring zero are left out. Equal ratios keep insertion order.
    pub fn closest(&self, key: &str, n: usize) -> Vec<Suggestion> {
        if n == 0 {
            return Vec::new();
        }
        if self.index.contains_key(key) {
            return vec![Suggestion {
                key: key.to_string(),
                ratio: 1.0,
            }];
        }

        let mut scored: Vec<Suggestion> = self
            .keys()
            .filter_map(|candidate| {
                let ratio = self.similarity.ratio(key, candidate);
                (ratio > 0.0).then(|| Suggestion {
                    key: candidate.to_string(),
                    ratio,
                })
            })
            .collect();

        // Stable sort keeps insertion order among ties
        scored.sort_by(|a, b| {
            b.ratio
                .partial_cmp(&a.ratio)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(n);
        scored
    }
}

impl<S: Similarity, K: Into<String>, V: Into<String>> Extend<(K, V)> for FuzzyMap<S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FuzzyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        Self::new(entries, DEFAULT_CUTOFF)
    }
}
