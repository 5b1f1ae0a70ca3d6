//! Ledger service for entry validation.
//!
//! Pure business rules with no database dependencies. The chart of accounts
//! is passed in by the caller; the service never consults global state.
//!
//! Balance checking runs twice in an entry's life: once at creation and
//! again at validation, because drafts may be edited in between. The core
//! never trusts a caller-supplied "this is balanced" claim.

use rust_decimal::Decimal;

use compta_shared::types::EntryId;

use crate::chart::ChartOfAccounts;

use super::error::LedgerError;
use super::types::{CreateEntryInput, EntryStatus, EntryTotals, LineInput};

/// Ledger service for entry validation.
pub struct LedgerService;

impl LedgerService {
    /// Validates an entry input before persistence.
    ///
    /// Checks, in order:
    /// 1. required fields (label, lines)
    /// 2. minimum line count (at least 2)
    /// 3. per-line: account number present, amounts non-negative, account
    ///    resolves in the chart
    /// 4. exact decimal balance (total debit == total credit)
    ///
    /// # Errors
    ///
    /// Returns the first `LedgerError` encountered.
    pub fn validate_input(
        input: &CreateEntryInput,
        chart: &ChartOfAccounts,
    ) -> Result<EntryTotals, LedgerError> {
        if input.label.trim().is_empty() {
            return Err(LedgerError::MissingRequiredField("libelle"));
        }
        if input.lines.is_empty() {
            return Err(LedgerError::MissingRequiredField("lignes"));
        }
        if input.lines.len() < 2 {
            return Err(LedgerError::InsufficientLines);
        }

        for line in &input.lines {
            if line.account_number.trim().is_empty() {
                return Err(LedgerError::MissingRequiredField("numero_compte"));
            }
            if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
                return Err(LedgerError::NegativeAmount);
            }
            if chart.lookup(&line.account_number).is_none() {
                return Err(LedgerError::UnknownAccount(line.account_number.clone()));
            }
        }

        let totals = Self::totals(&input.lines);
        if !totals.is_balanced {
            return Err(LedgerError::Unbalanced {
                debit: totals.total_debit,
                credit: totals.total_credit,
            });
        }

        Ok(totals)
    }

    /// Computes totals over entry lines.
    #[must_use]
    pub fn totals(lines: &[LineInput]) -> EntryTotals {
        Self::totals_from_amounts(lines.iter().map(|l| (l.debit, l.credit)))
    }

    /// Computes totals from raw (debit, credit) pairs.
    ///
    /// Used by the validation operation to re-check the balance from the
    /// entry's stored lines.
    pub fn totals_from_amounts(amounts: impl Iterator<Item = (Decimal, Decimal)>) -> EntryTotals {
        let (debit, credit) = amounts.fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(debit, credit), (d, c)| (debit + d, credit + c),
        );
        EntryTotals::new(debit, credit)
    }

    /// Checks that an entry may be validated.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyValidated` for a validated entry - validation is a
    /// one-way gate.
    pub fn validate_can_validate(status: EntryStatus, entry_id: EntryId) -> Result<(), LedgerError> {
        match status {
            EntryStatus::Draft => Ok(()),
            EntryStatus::Validated => Err(LedgerError::AlreadyValidated(entry_id)),
        }
    }

    /// Checks that an entry may be modified.
    ///
    /// # Errors
    ///
    /// Returns `CannotModifyValidated` for a validated entry.
    pub fn validate_can_modify(status: EntryStatus) -> Result<(), LedgerError> {
        if status.is_immutable() {
            return Err(LedgerError::CannotModifyValidated);
        }
        Ok(())
    }

    /// Checks that an entry may be deleted.
    ///
    /// # Errors
    ///
    /// Returns `CanOnlyDeleteDraft` unless the entry is a draft.
    pub fn validate_can_delete(status: EntryStatus) -> Result<(), LedgerError> {
        if status != EntryStatus::Draft {
            return Err(LedgerError::CanOnlyDeleteDraft);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::Journal;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn chart() -> ChartOfAccounts {
        ChartOfAccounts::sycebnl()
    }

    fn line(account: &str, debit: Decimal, credit: Decimal) -> LineInput {
        LineInput {
            account_number: account.to_string(),
            label: String::new(),
            debit,
            credit,
        }
    }

    fn input(lines: Vec<LineInput>) -> CreateEntryInput {
        CreateEntryInput {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            label: "Don de Jean Dupont".to_string(),
            journal: Journal::Donations,
            supporting_document: Some("DON-2024-001".to_string()),
            lines,
        }
    }

    #[test]
    fn test_balanced_donation_entry() {
        let entry = input(vec![
            line("571", dec!(100.00), dec!(0)),
            line("7561", dec!(0), dec!(100.00)),
        ]);

        let totals = LedgerService::validate_input(&entry, &chart()).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.total_debit, dec!(100.00));
        assert_eq!(totals.total_credit, dec!(100.00));
    }

    #[test]
    fn test_unbalanced_entry_reports_both_totals() {
        let entry = input(vec![
            line("571", dec!(100.00), dec!(0)),
            line("7561", dec!(0), dec!(90.00)),
        ]);

        match LedgerService::validate_input(&entry, &chart()) {
            Err(LedgerError::Unbalanced { debit, credit }) => {
                assert_eq!(debit, dec!(100.00));
                assert_eq!(credit, dec!(90.00));
            }
            other => panic!("expected Unbalanced, got {other:?}"),
        }
    }

    #[test]
    fn test_single_line_rejected() {
        let entry = input(vec![line("571", dec!(100), dec!(0))]);
        assert!(matches!(
            LedgerService::validate_input(&entry, &chart()),
            Err(LedgerError::InsufficientLines)
        ));
    }

    #[test]
    fn test_no_lines_is_missing_field() {
        let entry = input(vec![]);
        assert!(matches!(
            LedgerService::validate_input(&entry, &chart()),
            Err(LedgerError::MissingRequiredField("lignes"))
        ));
    }

    #[test]
    fn test_empty_label_is_missing_field() {
        let mut entry = input(vec![
            line("571", dec!(100), dec!(0)),
            line("7561", dec!(0), dec!(100)),
        ]);
        entry.label = "   ".to_string();
        assert!(matches!(
            LedgerService::validate_input(&entry, &chart()),
            Err(LedgerError::MissingRequiredField("libelle"))
        ));
    }

    #[test]
    fn test_unknown_account_rejected_with_number() {
        let entry = input(vec![
            line("571", dec!(100), dec!(0)),
            line("9999", dec!(0), dec!(100)),
        ]);
        match LedgerService::validate_input(&entry, &chart()) {
            Err(LedgerError::UnknownAccount(number)) => assert_eq!(number, "9999"),
            other => panic!("expected UnknownAccount, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_amount_rejected() {
        let entry = input(vec![
            line("571", dec!(-100), dec!(0)),
            line("7561", dec!(0), dec!(-100)),
        ]);
        assert!(matches!(
            LedgerService::validate_input(&entry, &chart()),
            Err(LedgerError::NegativeAmount)
        ));
    }

    #[test]
    fn test_one_minor_unit_off_is_unbalanced() {
        let entry = input(vec![
            line("571", dec!(100.00), dec!(0)),
            line("7561", dec!(0), dec!(99.99)),
        ]);
        assert!(matches!(
            LedgerService::validate_input(&entry, &chart()),
            Err(LedgerError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_mixed_line_accepted_when_entry_balances() {
        // Per-line debit/credit exclusivity is deliberately not enforced.
        let entry = input(vec![
            line("571", dec!(100.00), dec!(20.00)),
            line("7561", dec!(0), dec!(80.00)),
        ]);
        let totals = LedgerService::validate_input(&entry, &chart()).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.total_debit, dec!(100.00));
    }

    #[test]
    fn test_can_validate_draft_only() {
        let id = EntryId::from_uuid(uuid::Uuid::nil());
        assert!(LedgerService::validate_can_validate(EntryStatus::Draft, id).is_ok());
        assert!(matches!(
            LedgerService::validate_can_validate(EntryStatus::Validated, id),
            Err(LedgerError::AlreadyValidated(_))
        ));
    }

    #[test]
    fn test_can_modify_draft_only() {
        assert!(LedgerService::validate_can_modify(EntryStatus::Draft).is_ok());
        assert!(matches!(
            LedgerService::validate_can_modify(EntryStatus::Validated),
            Err(LedgerError::CannotModifyValidated)
        ));
    }

    #[test]
    fn test_can_delete_draft_only() {
        assert!(LedgerService::validate_can_delete(EntryStatus::Draft).is_ok());
        assert!(matches!(
            LedgerService::validate_can_delete(EntryStatus::Validated),
            Err(LedgerError::CanOnlyDeleteDraft)
        ));
    }
}
