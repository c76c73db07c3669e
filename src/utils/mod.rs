//! Utility modules

pub mod fuzzy;

pub use fuzzy::{sequence_ratio, Metric, NormalizedLevenshtein, SequenceRatio, Similarity};
