//! Reconciliation domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use compta_shared::types::{EntryId, LineId};

/// Account-number prefixes of the treasury accounts scanned for candidates
/// (banques, établissements financiers, caisse, régies d'avances).
pub const DEFAULT_BANK_ACCOUNT_PREFIXES: &[&str] = &["52", "53", "55", "57"];

/// One line of an external bank statement.
///
/// Ephemeral input: movements are matched, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankMovement {
    /// Value date of the movement.
    pub date: NaiveDate,
    /// Statement label.
    pub label: String,
    /// Signed amount (positive inflow, negative outflow).
    pub amount: Decimal,
    /// Optional bank reference.
    pub reference: Option<String>,
}

/// A ledger line eligible for matching: a line of a validated entry on a
/// treasury account within the requested window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateLine {
    /// Owning entry id.
    pub entry_id: EntryId,
    /// Line id.
    pub line_id: LineId,
    /// Entry date.
    pub date: NaiveDate,
    /// Entry label (what statement labels are compared against).
    pub label: String,
    /// Treasury account of the line.
    pub account_number: String,
    /// Signed amount of the line (debit - credit).
    pub amount: Decimal,
    /// Supporting document reference of the entry.
    pub document: Option<String>,
}

/// Similarity scores of a candidate, each in 0-100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchScores {
    /// Label similarity (word-set Dice coefficient).
    pub label: Decimal,
    /// Date proximity (linear decay, 10 points per day).
    pub date: Decimal,
    /// Weighted composite (0.7 label + 0.3 date).
    pub composite: Decimal,
}

/// A scored candidate for one movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// The candidate ledger line.
    pub line: CandidateLine,
    /// Its similarity scores.
    pub scores: MatchScores,
}

/// Whether a match proposal can be applied without human review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Best candidate scored at or above the automatic threshold.
    #[serde(rename = "automatique")]
    Automatic,
    /// Requires human confirmation.
    #[serde(rename = "manuel")]
    Manual,
}

/// Match result for one bank movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementMatch {
    /// The movement being reconciled.
    pub movement: BankMovement,
    /// Ranked candidates, best first (at most 3).
    pub candidates: Vec<MatchCandidate>,
    /// Automatic/manual classification.
    pub status: MatchStatus,
}

/// Aggregate statistics over a reconciliation batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchStatistics {
    /// Number of movements processed.
    pub total_movements: usize,
    /// Movements classified automatic.
    pub automatic_count: usize,
    /// Movements requiring manual review.
    pub manual_count: usize,
    /// Share of automatic movements, in percent (2 decimal places).
    pub automation_rate: Decimal,
}

/// Caller-tunable matching parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Maximum absolute amount difference for a candidate to survive.
    pub amount_tolerance: Decimal,
    /// Minimum composite score for a candidate to be kept.
    pub similarity_threshold: Decimal,
}

impl Default for MatchOptions {
    /// One minor currency unit of tolerance, threshold 70.
    fn default() -> Self {
        Self {
            amount_tolerance: Decimal::new(1, 2),
            similarity_threshold: Decimal::from(70),
        }
    }
}
