//! Balance and general-ledger aggregation.
//!
//! Pure read-model computations over lines of validated entries. The
//! repository fetches the rows; everything here is deterministic arithmetic,
//! grouped and ordered so the accounting identity (total debit == total
//! credit) can be asserted by the caller and by tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use compta_shared::types::EntryId;

use crate::chart::{Account, AccountClass, ChartOfAccounts};

use super::types::Journal;

/// Side of an account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceSide {
    /// Net balance is positive (debit side).
    #[serde(rename = "debiteur")]
    Debit,
    /// Net balance is negative (credit side).
    #[serde(rename = "crediteur")]
    Credit,
    /// Net balance is zero.
    #[serde(rename = "nul")]
    Nil,
}

impl BalanceSide {
    /// Derives the side from a net balance.
    #[must_use]
    pub fn from_net(net: Decimal) -> Self {
        if net > Decimal::ZERO {
            Self::Debit
        } else if net < Decimal::ZERO {
            Self::Credit
        } else {
            Self::Nil
        }
    }

    /// Returns the French label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debit => "debiteur",
            Self::Credit => "crediteur",
            Self::Nil => "nul",
        }
    }
}

/// One line of a validated entry, as fetched for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedLine {
    /// Account the movement was posted to.
    pub account_number: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// Per-account aggregate over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Account number.
    pub number: String,
    /// Account label from the chart.
    pub label: String,
    /// Account class.
    pub class: AccountClass,
    /// Account depth level.
    pub level: u8,
    /// Total debit over the period.
    pub total_debit: Decimal,
    /// Total credit over the period.
    pub total_credit: Decimal,
    /// Net balance (total debit - total credit).
    pub net: Decimal,
    /// Side of the net balance.
    pub side: BalanceSide,
}

/// Grand totals of a balance report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BalanceTotals {
    /// Sum of all debit totals.
    pub total_debit: Decimal,
    /// Sum of all credit totals.
    pub total_credit: Decimal,
    /// The accounting identity: true iff total debit == total credit.
    pub is_balanced: bool,
}

/// Computes the balance (per-account totals) over posted lines.
///
/// Lines are filtered through the chart first (class filter: exact match;
/// level filter: account level <= requested level), then grouped by account
/// number in ascending order.
///
/// Accounts absent from the chart fall back to number-derived class/level
/// with an empty label rather than being silently dropped.
#[must_use]
pub fn aggregate_balance(
    lines: &[PostedLine],
    chart: &ChartOfAccounts,
    class_filter: Option<AccountClass>,
    level_filter: Option<u8>,
) -> (Vec<AccountBalance>, BalanceTotals) {
    use std::collections::BTreeMap;

    let mut groups: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();

    for line in lines {
        let (class, level) = match chart.lookup(&line.account_number) {
            Some(account) => (account.class, account.level),
            None => (
                AccountClass::from_account_number(&line.account_number)
                    .unwrap_or(AccountClass::SpecialOperations),
                Account::level_for_number(&line.account_number),
            ),
        };

        if class_filter.is_some_and(|filter| filter != class) {
            continue;
        }
        if level_filter.is_some_and(|filter| level > filter) {
            continue;
        }

        let totals = groups.entry(line.account_number.as_str()).or_default();
        totals.0 += line.debit;
        totals.1 += line.credit;
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let rows = groups
        .into_iter()
        .map(|(number, (debit, credit))| {
            total_debit += debit;
            total_credit += credit;
            let net = debit - credit;
            let (label, class, level) = match chart.lookup(number) {
                Some(account) => (account.label.clone(), account.class, account.level),
                None => (
                    String::new(),
                    AccountClass::from_account_number(number)
                        .unwrap_or(AccountClass::SpecialOperations),
                    Account::level_for_number(number),
                ),
            };
            AccountBalance {
                number: number.to_string(),
                label,
                class,
                level,
                total_debit: debit,
                total_credit: credit,
                net,
                side: BalanceSide::from_net(net),
            }
        })
        .collect();

    let totals = BalanceTotals {
        total_debit,
        total_credit,
        is_balanced: total_debit == total_credit,
    };

    (rows, totals)
}

/// One movement of an account's general ledger, before the running balance
/// is attached.
#[derive(Debug, Clone)]
pub struct LedgerRow {
    /// Entry date.
    pub date: NaiveDate,
    /// Owning entry id (tie-break for same-day ordering).
    pub entry_id: EntryId,
    /// Entry number, e.g. `DON-20240115-001`.
    pub entry_number: Option<String>,
    /// Entry label.
    pub entry_label: String,
    /// Line label.
    pub line_label: String,
    /// Journal of the entry.
    pub journal: Journal,
    /// Supporting document reference.
    pub document: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// One movement of an account's general ledger with its cumulative balance.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerLine {
    /// Entry date.
    pub date: NaiveDate,
    /// Owning entry id.
    pub entry_id: EntryId,
    /// Entry number.
    pub entry_number: Option<String>,
    /// Entry label.
    pub entry_label: String,
    /// Line label.
    pub line_label: String,
    /// Journal of the entry.
    pub journal: Journal,
    /// Supporting document reference.
    pub document: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Cumulative balance after this movement.
    pub running_balance: Decimal,
}

/// Totals of a general-ledger report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Sum of debits over the period.
    pub total_debit: Decimal,
    /// Sum of credits over the period.
    pub total_credit: Decimal,
    /// Closing balance (final running balance) for the period.
    pub closing_balance: Decimal,
}

/// Computes an account's general ledger with running balances.
///
/// Rows are ordered chronologically, ties broken by entry id ascending for
/// determinism; same-entry rows keep their input order (stable sort). The
/// running balance is seeded at 0 for the first movement in the range.
#[must_use]
pub fn running_ledger(mut rows: Vec<LedgerRow>) -> (Vec<LedgerLine>, LedgerTotals) {
    rows.sort_by(|a, b| (a.date, a.entry_id).cmp(&(b.date, b.entry_id)));

    let mut running = Decimal::ZERO;
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    let lines = rows
        .into_iter()
        .map(|row| {
            running += row.debit - row.credit;
            total_debit += row.debit;
            total_credit += row.credit;
            LedgerLine {
                date: row.date,
                entry_id: row.entry_id,
                entry_number: row.entry_number,
                entry_label: row.entry_label,
                line_label: row.line_label,
                journal: row.journal,
                document: row.document,
                debit: row.debit,
                credit: row.credit,
                running_balance: running,
            }
        })
        .collect();

    let totals = LedgerTotals {
        total_debit,
        total_credit,
        closing_balance: running,
    };

    (lines, totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn posted(account: &str, debit: Decimal, credit: Decimal) -> PostedLine {
        PostedLine {
            account_number: account.to_string(),
            debit,
            credit,
        }
    }

    fn donation_lines() -> Vec<PostedLine> {
        vec![
            posted("571", dec!(100.00), dec!(0)),
            posted("7561", dec!(0), dec!(100.00)),
        ]
    }

    #[test]
    fn test_balance_of_single_donation() {
        let chart = ChartOfAccounts::sycebnl();
        let (rows, totals) = aggregate_balance(&donation_lines(), &chart, None, None);

        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].number, "571");
        assert_eq!(rows[0].total_debit, dec!(100.00));
        assert_eq!(rows[0].total_credit, Decimal::ZERO);
        assert_eq!(rows[0].net, dec!(100.00));
        assert_eq!(rows[0].side, BalanceSide::Debit);

        assert_eq!(rows[1].number, "7561");
        assert_eq!(rows[1].total_debit, Decimal::ZERO);
        assert_eq!(rows[1].total_credit, dec!(100.00));
        assert_eq!(rows[1].net, dec!(-100.00));
        assert_eq!(rows[1].side, BalanceSide::Credit);

        assert!(totals.is_balanced);
        assert_eq!(totals.total_debit, totals.total_credit);
    }

    #[test]
    fn test_balance_groups_by_account() {
        let chart = ChartOfAccounts::sycebnl();
        let lines = vec![
            posted("571", dec!(100), dec!(0)),
            posted("571", dec!(0), dec!(30)),
            posted("7561", dec!(0), dec!(100)),
            posted("6051", dec!(30), dec!(0)),
        ];
        let (rows, totals) = aggregate_balance(&lines, &chart, None, None);

        assert_eq!(rows.len(), 3);
        let caisse = rows.iter().find(|r| r.number == "571").unwrap();
        assert_eq!(caisse.total_debit, dec!(100));
        assert_eq!(caisse.total_credit, dec!(30));
        assert_eq!(caisse.net, dec!(70));
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_balance_rows_ascending_by_number() {
        let chart = ChartOfAccounts::sycebnl();
        let lines = vec![
            posted("7561", dec!(0), dec!(10)),
            posted("571", dec!(10), dec!(0)),
            posted("6051", dec!(5), dec!(5)),
        ];
        let (rows, _) = aggregate_balance(&lines, &chart, None, None);
        let numbers: Vec<&str> = rows.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["571", "6051", "7561"]);
    }

    #[test]
    fn test_balance_class_filter() {
        let chart = ChartOfAccounts::sycebnl();
        let (rows, totals) =
            aggregate_balance(&donation_lines(), &chart, Some(AccountClass::Treasury), None);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number, "571");
        // A class-restricted balance is not expected to balance globally.
        assert!(!totals.is_balanced);
    }

    #[test]
    fn test_balance_level_filter() {
        let chart = ChartOfAccounts::sycebnl();
        let lines = vec![
            posted("571", dec!(100), dec!(0)),  // level 2
            posted("7561", dec!(0), dec!(100)), // level 3
        ];
        let (rows, _) = aggregate_balance(&lines, &chart, None, Some(2));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number, "571");
    }

    #[test]
    fn test_balance_zero_net_is_nil() {
        let chart = ChartOfAccounts::sycebnl();
        let lines = vec![posted("571", dec!(50), dec!(50))];
        let (rows, _) = aggregate_balance(&lines, &chart, None, None);
        assert_eq!(rows[0].side, BalanceSide::Nil);
        assert_eq!(rows[0].net, Decimal::ZERO);
    }

    #[test]
    fn test_side_labels() {
        assert_eq!(BalanceSide::from_net(dec!(1)).label(), "debiteur");
        assert_eq!(BalanceSide::from_net(dec!(-1)).label(), "crediteur");
        assert_eq!(BalanceSide::from_net(Decimal::ZERO).label(), "nul");
    }

    fn ledger_row(day: u32, id: u128, debit: Decimal, credit: Decimal) -> LedgerRow {
        LedgerRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            entry_id: EntryId::from_uuid(uuid::Uuid::from_u128(id)),
            entry_number: None,
            entry_label: format!("Mouvement {day}"),
            line_label: String::new(),
            journal: Journal::Bank,
            document: None,
            debit,
            credit,
        }
    }

    #[test]
    fn test_running_balance_accumulates() {
        let rows = vec![
            ledger_row(10, 1, dec!(100), dec!(0)),
            ledger_row(12, 2, dec!(50), dec!(0)),
            ledger_row(15, 3, dec!(0), dec!(30)),
        ];
        let (lines, totals) = running_ledger(rows);

        assert_eq!(lines[0].running_balance, dec!(100));
        assert_eq!(lines[1].running_balance, dec!(150));
        assert_eq!(lines[2].running_balance, dec!(120));

        assert_eq!(totals.total_debit, dec!(150));
        assert_eq!(totals.total_credit, dec!(30));
        assert_eq!(totals.closing_balance, dec!(120));
    }

    #[test]
    fn test_running_ledger_sorts_chronologically() {
        let rows = vec![
            ledger_row(20, 3, dec!(0), dec!(10)),
            ledger_row(5, 1, dec!(40), dec!(0)),
            ledger_row(12, 2, dec!(10), dec!(0)),
        ];
        let (lines, totals) = running_ledger(rows);
        let days: Vec<u32> = lines.iter().map(|l| chrono::Datelike::day(&l.date)).collect();
        assert_eq!(days, vec![5, 12, 20]);
        assert_eq!(totals.closing_balance, dec!(40));
    }

    #[test]
    fn test_same_day_ties_broken_by_entry_id() {
        let rows = vec![
            ledger_row(10, 7, dec!(0), dec!(5)),
            ledger_row(10, 2, dec!(5), dec!(0)),
        ];
        let (lines, _) = running_ledger(rows);
        assert_eq!(lines[0].entry_id, EntryId::from_uuid(uuid::Uuid::from_u128(2)));
        assert_eq!(lines[1].entry_id, EntryId::from_uuid(uuid::Uuid::from_u128(7)));
    }

    #[test]
    fn test_empty_ledger() {
        let (lines, totals) = running_ledger(Vec::new());
        assert!(lines.is_empty());
        assert_eq!(totals.closing_balance, Decimal::ZERO);
    }
}
