//! # APS Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Brute-force references for the generator and top-k selector
//! - In-game reference shells and sample jobs
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod brute_force;
pub mod fixtures;

/// Re-export proptest for convenience.
pub use proptest;
