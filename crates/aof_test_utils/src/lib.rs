//! # AoF Test Utilities
//!
//! Shared testing utilities for all crates:
//! - The sample faction document and fixture builders
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
