//! Property tests for entry validation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::chart::ChartOfAccounts;
use crate::ledger::service::LedgerService;
use crate::ledger::types::{CreateEntryInput, Journal, LineInput};

/// Accounts from the embedded plan used for generated entries.
const ACCOUNTS: &[&str] = &["401", "411", "521", "551", "571", "6051", "661", "706", "7561"];

/// Strategy for a positive amount with 2 decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_00).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for an account number from the embedded plan.
fn account_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(ACCOUNTS).prop_map(ToString::to_string)
}

/// Strategy for a balanced entry: each generated amount is posted once to
/// the debit of one account and once to the credit of another, so the entry
/// balances by construction.
fn balanced_entry_strategy() -> impl Strategy<Value = CreateEntryInput> {
    prop::collection::vec((amount_strategy(), account_strategy(), account_strategy()), 1..8)
        .prop_map(|movements| {
            let mut lines = Vec::with_capacity(movements.len() * 2);
            for (amount, debit_account, credit_account) in movements {
                lines.push(LineInput {
                    account_number: debit_account,
                    label: String::new(),
                    debit: amount,
                    credit: Decimal::ZERO,
                });
                lines.push(LineInput {
                    account_number: credit_account,
                    label: String::new(),
                    debit: Decimal::ZERO,
                    credit: amount,
                });
            }
            CreateEntryInput {
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                label: "Écriture générée".to_string(),
                journal: Journal::Miscellaneous,
                supporting_document: None,
                lines,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any entry built from mirrored debit/credit movements is accepted,
    /// and its totals satisfy the balance invariant exactly.
    #[test]
    fn prop_balanced_entries_accepted(input in balanced_entry_strategy()) {
        let chart = ChartOfAccounts::sycebnl();
        let totals = LedgerService::validate_input(&input, &chart).unwrap();

        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.total_debit, totals.total_credit);
        prop_assert_eq!(totals.difference(), Decimal::ZERO);
    }

    /// Perturbing one credit by any nonzero delta breaks the balance and is
    /// rejected with both totals reported.
    #[test]
    fn prop_perturbed_entries_rejected(
        input in balanced_entry_strategy(),
        delta in (1i64..1_000_00).prop_map(|n| Decimal::new(n, 2)),
    ) {
        let chart = ChartOfAccounts::sycebnl();
        let mut input = input;
        // Lines alternate debit/credit; index 1 is always a credit line.
        input.lines[1].credit += delta;

        match LedgerService::validate_input(&input, &chart) {
            Err(crate::ledger::LedgerError::Unbalanced { debit, credit }) => {
                prop_assert_eq!(credit - debit, delta);
            }
            other => prop_assert!(false, "expected Unbalanced, got {:?}", other),
        }
    }

    /// Totals are order-independent: shuffling lines cannot change sums.
    #[test]
    fn prop_totals_order_independent(input in balanced_entry_strategy()) {
        let forward = LedgerService::totals(&input.lines);
        let mut reversed = input.lines.clone();
        reversed.reverse();
        let backward = LedgerService::totals(&reversed);

        prop_assert_eq!(forward.total_debit, backward.total_debit);
        prop_assert_eq!(forward.total_credit, backward.total_credit);
    }
}
