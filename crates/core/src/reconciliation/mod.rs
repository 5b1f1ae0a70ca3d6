//! Bank reconciliation matching.
//!
//! An advisory engine that proposes correspondences between external bank
//! statement movements and validated ledger entries on treasury accounts.
//! It never mutates the ledger and is fully deterministic.

pub mod matcher;
pub mod types;

#[cfg(test)]
mod matcher_props;

pub use matcher::{AUTOMATIC_THRESHOLD, MAX_CANDIDATES, match_movement, match_movements, statistics};
pub use types::{
    BankMovement, CandidateLine, DEFAULT_BANK_ACCOUNT_PREFIXES, MatchCandidate, MatchOptions,
    MatchScores, MatchStatistics, MatchStatus, MovementMatch,
};
