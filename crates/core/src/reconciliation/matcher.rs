//! The reconciliation matching algorithm.
//!
//! Per movement, against the candidate pool:
//! 1. amount filter within the caller's tolerance (absolute values);
//! 2. label similarity: normalized word-set Dice coefficient, 0-100;
//! 3. date proximity: 100 minus 10 points per day apart, floored at 0;
//! 4. composite = 0.7 * label + 0.3 * date;
//! 5. candidates below the caller's threshold are dropped, survivors ranked
//!    descending, top 3 kept;
//! 6. a movement is automatic iff its best composite reaches 90.
//!
//! All arithmetic is `Decimal`; scores are rounded to 2 decimal places for
//! reporting after the threshold filter is applied.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::types::{
    BankMovement, CandidateLine, MatchCandidate, MatchOptions, MatchScores, MatchStatistics,
    MatchStatus, MovementMatch,
};

/// Composite score at or above which a match needs no human confirmation.
///
/// A fixed design constant (not caller-configurable) so the
/// automatic/manual boundary stays predictable.
pub const AUTOMATIC_THRESHOLD: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Number of candidates retained per movement.
pub const MAX_CANDIDATES: usize = 3;

/// Normalizes a label for comparison: lowercase, punctuation stripped,
/// whitespace collapsed.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    let lowered: String = label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn word_set(label: &str) -> HashSet<String> {
    normalize_label(label)
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

/// Word-set similarity between two labels, 0-100.
///
/// Dice coefficient over normalized word sets: `2|A∩B| / (|A|+|B|) * 100`,
/// clamped to 100; 0 when either set is empty.
#[must_use]
pub fn label_similarity(a: &str, b: &str) -> Decimal {
    let words_a = word_set(a);
    let words_b = word_set(b);

    if words_a.is_empty() || words_b.is_empty() {
        return Decimal::ZERO;
    }

    let common = words_a.intersection(&words_b).count();
    let score = Decimal::from(200 * common) / Decimal::from(words_a.len() + words_b.len());
    score.min(Decimal::ONE_HUNDRED)
}

/// Date proximity score, 0-100: linear decay of 10 points per day apart,
/// zero beyond 10 days.
#[must_use]
pub fn date_proximity(a: chrono::NaiveDate, b: chrono::NaiveDate) -> Decimal {
    let days = (a - b).num_days().abs();
    if days >= 10 {
        Decimal::ZERO
    } else {
        Decimal::from(100 - 10 * days)
    }
}

fn composite(label_score: Decimal, date_score: Decimal) -> Decimal {
    (label_score * Decimal::from(7) + date_score * Decimal::from(3)) / Decimal::from(10)
}

/// Matches one bank movement against the candidate pool.
#[must_use]
pub fn match_movement(
    movement: &BankMovement,
    pool: &[CandidateLine],
    options: &MatchOptions,
) -> MovementMatch {
    let mut candidates: Vec<MatchCandidate> = pool
        .iter()
        .filter(|candidate| {
            (movement.amount.abs() - candidate.amount.abs()).abs() <= options.amount_tolerance
        })
        .filter_map(|candidate| {
            let label_score = label_similarity(&movement.label, &candidate.label);
            let date_score = date_proximity(movement.date, candidate.date);
            let composite_score = composite(label_score, date_score);

            if composite_score < options.similarity_threshold {
                return None;
            }

            Some(MatchCandidate {
                line: candidate.clone(),
                scores: MatchScores {
                    label: label_score.round_dp(2),
                    date: date_score.round_dp(2),
                    composite: composite_score.round_dp(2),
                },
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.scores.composite.cmp(&a.scores.composite));
    candidates.truncate(MAX_CANDIDATES);

    let status = if candidates
        .first()
        .is_some_and(|best| best.scores.composite >= AUTOMATIC_THRESHOLD)
    {
        MatchStatus::Automatic
    } else {
        MatchStatus::Manual
    };

    MovementMatch {
        movement: movement.clone(),
        candidates,
        status,
    }
}

/// Matches a batch of movements. Idempotent: same inputs, same output.
#[must_use]
pub fn match_movements(
    movements: &[BankMovement],
    pool: &[CandidateLine],
    options: &MatchOptions,
) -> Vec<MovementMatch> {
    movements
        .iter()
        .map(|movement| match_movement(movement, pool, options))
        .collect()
}

/// Aggregates batch statistics.
#[must_use]
pub fn statistics(matches: &[MovementMatch]) -> MatchStatistics {
    let total = matches.len();
    let automatic = matches
        .iter()
        .filter(|m| m.status == MatchStatus::Automatic)
        .count();

    let automation_rate = if total == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(automatic * 100) / Decimal::from(total)).round_dp(2)
    };

    MatchStatistics {
        total_movements: total,
        automatic_count: automatic,
        manual_count: total - automatic,
        automation_rate,
    }
}
