//! Ledger domain types for entry creation and validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Entry lifecycle status.
///
/// An entry is created in `Draft` and becomes `Validated` through an
/// explicit validation operation. The transition is one-way: validated
/// entries never revert and are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is in the brouillard and can still be modified or deleted.
    Draft,
    /// Entry has been validated and is immutable.
    Validated,
}

impl EntryStatus {
    /// Returns true if the entry can be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry is immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Validated)
    }
}

/// Accounting journal, identified by its code on the wire.
///
/// Journals categorize entries for filtering and reporting; they are not a
/// foreign key to a richer journal entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Journal {
    /// ACH - Achats (purchases).
    #[serde(rename = "ACH")]
    Purchases,
    /// VTE - Ventes (sales).
    #[serde(rename = "VTE")]
    Sales,
    /// BQ - Banque (bank).
    #[serde(rename = "BQ")]
    Bank,
    /// CAI - Caisse (cash).
    #[serde(rename = "CAI")]
    Cash,
    /// OD - Opérations diverses (miscellaneous).
    #[serde(rename = "OD")]
    Miscellaneous,
    /// DON - Dons (donations).
    #[serde(rename = "DON")]
    Donations,
    /// SUB - Subventions (grants).
    #[serde(rename = "SUB")]
    Grants,
}

impl Journal {
    /// All journals.
    pub const ALL: [Self; 7] = [
        Self::Purchases,
        Self::Sales,
        Self::Bank,
        Self::Cash,
        Self::Miscellaneous,
        Self::Donations,
        Self::Grants,
    ];

    /// Returns the journal code used on the wire and in entry numbers.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Purchases => "ACH",
            Self::Sales => "VTE",
            Self::Bank => "BQ",
            Self::Cash => "CAI",
            Self::Miscellaneous => "OD",
            Self::Donations => "DON",
            Self::Grants => "SUB",
        }
    }

    /// Parses a journal code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "ACH" => Some(Self::Purchases),
            "VTE" => Some(Self::Sales),
            "BQ" => Some(Self::Bank),
            "CAI" => Some(Self::Cash),
            "OD" => Some(Self::Miscellaneous),
            "DON" => Some(Self::Donations),
            "SUB" => Some(Self::Grants),
            _ => None,
        }
    }

    /// Returns the journal label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Purchases => "Achats",
            Self::Sales => "Ventes",
            Self::Bank => "Banque",
            Self::Cash => "Caisse",
            Self::Miscellaneous => "Opérations diverses",
            Self::Donations => "Dons",
            Self::Grants => "Subventions",
        }
    }
}

impl Default for Journal {
    /// Entries created without an explicit journal land in OD.
    fn default() -> Self {
        Self::Miscellaneous
    }
}

/// Input for a single line of a new entry.
///
/// Exactly one of debit/credit is conventionally nonzero, but only the
/// entry-level balance invariant is enforced (a deliberate product
/// decision; corrective entries may carry mixed lines).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineInput {
    /// Account number, resolved against the chart of accounts.
    pub account_number: String,
    /// Line label.
    pub label: String,
    /// Debit amount (non-negative).
    pub debit: Decimal,
    /// Credit amount (non-negative).
    pub credit: Decimal,
}

/// Input for creating a new entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntryInput {
    /// Operation date.
    pub date: NaiveDate,
    /// Entry label.
    pub label: String,
    /// Journal the entry is booked in.
    pub journal: Journal,
    /// Optional supporting document reference.
    pub supporting_document: Option<String>,
    /// Entry lines (at least 2).
    pub lines: Vec<LineInput>,
}

/// Entry totals for validation and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
    /// Whether the entry is balanced (exact decimal equality).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_editable() {
        assert!(EntryStatus::Draft.is_editable());
        assert!(!EntryStatus::Validated.is_editable());
    }

    #[test]
    fn test_status_immutable() {
        assert!(!EntryStatus::Draft.is_immutable());
        assert!(EntryStatus::Validated.is_immutable());
    }

    #[rstest]
    #[case(Journal::Purchases, "ACH")]
    #[case(Journal::Sales, "VTE")]
    #[case(Journal::Bank, "BQ")]
    #[case(Journal::Cash, "CAI")]
    #[case(Journal::Miscellaneous, "OD")]
    #[case(Journal::Donations, "DON")]
    #[case(Journal::Grants, "SUB")]
    fn test_journal_code_roundtrip(#[case] journal: Journal, #[case] code: &str) {
        assert_eq!(journal.code(), code);
        assert_eq!(Journal::from_code(code), Some(journal));
    }

    #[test]
    fn test_journal_from_code_is_case_insensitive() {
        assert_eq!(Journal::from_code("don"), Some(Journal::Donations));
        assert_eq!(Journal::from_code(" od "), Some(Journal::Miscellaneous));
        assert_eq!(Journal::from_code("XYZ"), None);
    }

    #[test]
    fn test_default_journal_is_od() {
        assert_eq!(Journal::default(), Journal::Miscellaneous);
    }

    #[test]
    fn test_totals_balanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_unbalanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(90.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(10.00));
    }

    #[test]
    fn test_totals_exact_equality_no_tolerance() {
        // 100.00 vs 100.01 differs by one minor unit and must NOT balance.
        let totals = EntryTotals::new(dec!(100.00), dec!(100.01));
        assert!(!totals.is_balanced);
    }
}
