//! econ-define Library
//!
//! Fuzzy lookup of economics terms. [`FuzzyMap`] resolves misspelled or
//! loosely phrased terms to the closest dictionary key; the remaining modules
//! load term data, split batch input and render results for the terminal.

pub mod batch;
pub mod config;
pub mod error;
pub mod fuzzy_map;
pub mod render;
pub mod terms;
pub mod utils;

pub use error::{DefineError, DefineResult};
pub use fuzzy_map::{FuzzyMap, NotFound, SearchResult, Suggestion, DEFAULT_CUTOFF};
pub use utils::{Metric, Similarity};
