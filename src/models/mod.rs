//! Data models module
//!
//! Contains the result of one smoke-test run: the recorded failures,
//! the overall outcome, and the exact console lines derived from them.

pub mod report;

// Re-export commonly used types
pub use report::{CheckFailure, CheckOutcome, CheckReport};
