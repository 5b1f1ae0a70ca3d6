//! Property tests for the reconciliation matcher.

use chrono::NaiveDate;
use compta_shared::types::{EntryId, LineId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::matcher::{
    AUTOMATIC_THRESHOLD, MAX_CANDIDATES, date_proximity, label_similarity, match_movement,
};
use super::types::{BankMovement, CandidateLine, MatchOptions, MatchStatus};

const WORDS: &[&str] = &[
    "don", "de", "jean", "dupont", "subvention", "municipale", "paiement", "facture",
    "electricite", "achat", "fournitures", "bureau", "virement", "loyer",
];

fn label_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..6).prop_map(|words| words.join(" "))
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=28).prop_map(|day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap())
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-50_000_00i64..50_000_00).prop_map(|n| Decimal::new(n, 2))
}

fn pool_strategy() -> impl Strategy<Value = Vec<CandidateLine>> {
    prop::collection::vec(
        (label_strategy(), date_strategy(), amount_strategy()),
        0..20,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(label, date, amount)| CandidateLine {
                entry_id: EntryId::new(),
                line_id: LineId::new(),
                date,
                label,
                account_number: "521".to_string(),
                amount,
                document: None,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Label similarity is symmetric and bounded to [0, 100].
    #[test]
    fn prop_label_similarity_symmetric_bounded(a in label_strategy(), b in label_strategy()) {
        let ab = label_similarity(&a, &b);
        let ba = label_similarity(&b, &a);
        prop_assert_eq!(ab, ba);
        prop_assert!(ab >= Decimal::ZERO && ab <= Decimal::ONE_HUNDRED);
    }

    /// A non-empty label always matches itself at exactly 100.
    #[test]
    fn prop_label_self_similarity(a in label_strategy()) {
        prop_assume!(!a.trim().is_empty());
        prop_assert_eq!(label_similarity(&a, &a), Decimal::ONE_HUNDRED);
    }

    /// Date proximity is symmetric, bounded, and maximal on the same day.
    #[test]
    fn prop_date_proximity_symmetric(a in date_strategy(), b in date_strategy()) {
        let ab = date_proximity(a, b);
        prop_assert_eq!(ab, date_proximity(b, a));
        prop_assert!(ab >= Decimal::ZERO && ab <= Decimal::ONE_HUNDRED);
        if a == b {
            prop_assert_eq!(ab, Decimal::ONE_HUNDRED);
        }
    }

    /// The matcher's structural guarantees hold for any pool: at most 3
    /// candidates, ranked descending, all within tolerance and above the
    /// threshold; the status agrees with the best composite.
    #[test]
    fn prop_match_invariants(
        label in label_strategy(),
        date in date_strategy(),
        amount in amount_strategy(),
        pool in pool_strategy(),
    ) {
        let movement = BankMovement { date, label, amount, reference: None };
        let options = MatchOptions::default();
        let result = match_movement(&movement, &pool, &options);

        prop_assert!(result.candidates.len() <= MAX_CANDIDATES);

        for pair in result.candidates.windows(2) {
            prop_assert!(pair[0].scores.composite >= pair[1].scores.composite);
        }

        for candidate in &result.candidates {
            prop_assert!(
                (movement.amount.abs() - candidate.line.amount.abs()).abs()
                    <= options.amount_tolerance
            );
            prop_assert!(candidate.scores.composite >= options.similarity_threshold.round_dp(2));
        }

        let automatic = result
            .candidates
            .first()
            .is_some_and(|best| best.scores.composite >= AUTOMATIC_THRESHOLD);
        prop_assert_eq!(
            result.status,
            if automatic { MatchStatus::Automatic } else { MatchStatus::Manual }
        );
    }
}
