//! Search module — fuzzy matching and disambiguation.
//!
//! This module provides:
//! - Partial-ratio name scoring (`scorer`)
//! - Threshold filtering and stable ranking (`ranked`)
//! - The none / one / many resolver and the `Chooser` trait (`resolver`)
//! - The end-to-end secret search over many vaults (`pipeline`)

pub mod pipeline;
pub mod ranked;
pub mod resolver;
pub mod scorer;

// Re-export the most commonly used items.
pub use pipeline::{ListingFailurePolicy, SearchOptions, SecretSearch, SkippedVault};
pub use ranked::{RankedCandidates, ScoredCandidate, MATCH_THRESHOLD};
pub use resolver::{resolve, Chooser, Resolution};
pub use scorer::score;
