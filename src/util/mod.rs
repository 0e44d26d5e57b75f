//! Utility functions module
//!
//! Contains helpers for whole-word matching over the whitespace-delimited
//! kernel tables.

pub mod words;

// Re-export commonly used functions
pub use words::{contains_word, first_line_with_word};
