//! Property tests for balance and general-ledger aggregation.

use chrono::NaiveDate;
use compta_shared::types::EntryId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::chart::ChartOfAccounts;
use crate::ledger::balance::{LedgerRow, PostedLine, aggregate_balance, running_ledger};
use crate::ledger::types::Journal;

const ACCOUNTS: &[&str] = &["401", "411", "521", "551", "571", "6051", "661", "706", "7561"];

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_00).prop_map(|n| Decimal::new(n, 2))
}

/// Balanced line sets: every movement posts the same amount to a debit and
/// a credit account, so the whole set satisfies the accounting identity.
fn balanced_lines_strategy() -> impl Strategy<Value = Vec<PostedLine>> {
    prop::collection::vec(
        (
            amount_strategy(),
            prop::sample::select(ACCOUNTS),
            prop::sample::select(ACCOUNTS),
        ),
        1..30,
    )
    .prop_map(|movements| {
        let mut lines = Vec::with_capacity(movements.len() * 2);
        for (amount, debit_account, credit_account) in movements {
            lines.push(PostedLine {
                account_number: debit_account.to_string(),
                debit: amount,
                credit: Decimal::ZERO,
            });
            lines.push(PostedLine {
                account_number: credit_account.to_string(),
                debit: Decimal::ZERO,
                credit: amount,
            });
        }
        lines
    })
}

fn ledger_rows_strategy() -> impl Strategy<Value = Vec<LedgerRow>> {
    prop::collection::vec(
        ((1u32..=28), (0i64..5_000_00), (0i64..5_000_00)),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(day, debit, credit)| LedgerRow {
                date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                entry_id: EntryId::new(),
                entry_number: None,
                entry_label: String::new(),
                line_label: String::new(),
                journal: Journal::Bank,
                document: None,
                debit: Decimal::new(debit, 2),
                credit: Decimal::new(credit, 2),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The accounting identity: for any internally-consistent ledger, the
    /// unfiltered balance report satisfies sum(debit) == sum(credit).
    #[test]
    fn prop_balance_identity(lines in balanced_lines_strategy()) {
        let chart = ChartOfAccounts::sycebnl();
        let (rows, totals) = aggregate_balance(&lines, &chart, None, None);

        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.total_debit, totals.total_credit);

        let row_debit: Decimal = rows.iter().map(|r| r.total_debit).sum();
        let row_credit: Decimal = rows.iter().map(|r| r.total_credit).sum();
        prop_assert_eq!(row_debit, totals.total_debit);
        prop_assert_eq!(row_credit, totals.total_credit);
    }

    /// Balance rows always come back in ascending account-number order.
    #[test]
    fn prop_balance_rows_sorted(lines in balanced_lines_strategy()) {
        let chart = ChartOfAccounts::sycebnl();
        let (rows, _) = aggregate_balance(&lines, &chart, None, None);
        let numbers: Vec<&str> = rows.iter().map(|r| r.number.as_str()).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        prop_assert_eq!(numbers, sorted);
    }

    /// Every row's net and side agree with its totals.
    #[test]
    fn prop_balance_net_consistent(lines in balanced_lines_strategy()) {
        let chart = ChartOfAccounts::sycebnl();
        let (rows, _) = aggregate_balance(&lines, &chart, None, None);
        for row in rows {
            prop_assert_eq!(row.net, row.total_debit - row.total_credit);
            prop_assert_eq!(row.side, crate::ledger::BalanceSide::from_net(row.net));
        }
    }

    /// The final running balance equals sum(debit) - sum(credit) over the
    /// returned lines, regardless of input order.
    #[test]
    fn prop_running_balance_closes_on_totals(rows in ledger_rows_strategy()) {
        let expected: Decimal = rows.iter().map(|r| r.debit - r.credit).sum();
        let (lines, totals) = running_ledger(rows);

        prop_assert_eq!(totals.closing_balance, expected);
        prop_assert_eq!(totals.closing_balance, totals.total_debit - totals.total_credit);
        if let Some(last) = lines.last() {
            prop_assert_eq!(last.running_balance, totals.closing_balance);
        }
    }

    /// Each running balance is the previous one plus the line's movement.
    #[test]
    fn prop_running_balance_chain(rows in ledger_rows_strategy()) {
        let (lines, _) = running_ledger(rows);
        let mut previous = Decimal::ZERO;
        for line in lines {
            prop_assert_eq!(line.running_balance, previous + line.debit - line.credit);
            previous = line.running_balance;
        }
    }

    /// Ledger lines come back date-ascending.
    #[test]
    fn prop_ledger_sorted_by_date(rows in ledger_rows_strategy()) {
        let (lines, _) = running_ledger(rows);
        for pair in lines.windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
        }
    }
}
