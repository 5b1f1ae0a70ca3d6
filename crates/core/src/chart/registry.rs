//! The chart of accounts registry.
//!
//! Loaded once at startup (from the database, or from the embedded SYCEBNL
//! plan) and passed by reference into every ledger operation. The registry
//! is immutable after load; corrective re-imports build a fresh value.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::account::{Account, AccountClass};
use super::plan;

/// Kind of chart consistency finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartIssueKind {
    /// The account references a parent number that does not exist.
    #[serde(rename = "parent_manquant")]
    MissingParent,
    /// The account class does not match the number's leading digit.
    #[serde(rename = "incoherence_classe")]
    ClassMismatch,
}

/// An advisory consistency finding.
///
/// Consistency checking never blocks normal operation; findings are
/// surfaced as a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartIssue {
    /// The kind of violation.
    #[serde(rename = "type")]
    pub kind: ChartIssueKind,
    /// The offending account number.
    pub account: String,
    /// Human-readable description.
    pub message: String,
}

/// Registry of valid account numbers and their classification.
#[derive(Debug, Clone, Default)]
pub struct ChartOfAccounts {
    accounts: BTreeMap<String, Account>,
    children: HashMap<String, Vec<String>>,
}

impl ChartOfAccounts {
    /// Builds a registry from a flat account list.
    ///
    /// The parent/child index is built once here; account numbers are kept
    /// in ascending (lexicographic) order, which for digit strings is the
    /// conventional chart ordering ("10" < "101" < "11" < "2").
    #[must_use]
    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        let mut by_number = BTreeMap::new();
        let mut children: HashMap<String, Vec<String>> = HashMap::new();

        for account in accounts {
            if let Some(parent) = &account.parent {
                children
                    .entry(parent.clone())
                    .or_default()
                    .push(account.number.clone());
            }
            by_number.insert(account.number.clone(), account);
        }

        for numbers in children.values_mut() {
            numbers.sort();
        }

        Self {
            accounts: by_number,
            children,
        }
    }

    /// Builds the registry from the embedded SYCEBNL reference plan.
    #[must_use]
    pub fn sycebnl() -> Self {
        Self::from_accounts(plan::reference_accounts())
    }

    /// Number of accounts in the chart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Looks up an account by number.
    #[must_use]
    pub fn lookup(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    /// Returns the parent account of `number`, if any.
    #[must_use]
    pub fn parent_of(&self, number: &str) -> Option<&Account> {
        let account = self.lookup(number)?;
        account.parent.as_deref().and_then(|p| self.lookup(p))
    }

    /// Returns the direct children of `number`, ascending by account number.
    #[must_use]
    pub fn children_of(&self, number: &str) -> Vec<&Account> {
        self.children
            .get(number)
            .map(|numbers| numbers.iter().filter_map(|n| self.lookup(n)).collect())
            .unwrap_or_default()
    }

    /// Iterates all accounts in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Returns all accounts of a class, ascending by number.
    #[must_use]
    pub fn accounts_in_class(&self, class: AccountClass) -> Vec<&Account> {
        self.iter().filter(|a| a.class == class).collect()
    }

    /// Searches the chart.
    ///
    /// An all-digit term matches account numbers by prefix; any other term
    /// matches labels case-insensitively by substring. Results come back in
    /// ascending number order, capped at `limit`.
    #[must_use]
    pub fn search(&self, term: &str, limit: usize) -> Vec<&Account> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }

        if term.chars().all(|c| c.is_ascii_digit()) {
            self.accounts
                .range(term.to_string()..)
                .take_while(|(number, _)| number.starts_with(term))
                .map(|(_, account)| account)
                .take(limit)
                .collect()
        } else {
            let needle = term.to_lowercase();
            self.iter()
                .filter(|a| a.label.to_lowercase().contains(&needle))
                .take(limit)
                .collect()
        }
    }

    /// Checks every account for structural consistency.
    ///
    /// Two checks per account: the parent reference resolves, and the class
    /// matches the number's leading digit. Returns one issue per violation;
    /// never fails.
    #[must_use]
    pub fn validate_consistency(&self) -> Vec<ChartIssue> {
        let mut issues = Vec::new();

        for account in self.iter() {
            if let Some(parent) = &account.parent {
                if !self.accounts.contains_key(parent) {
                    issues.push(ChartIssue {
                        kind: ChartIssueKind::MissingParent,
                        account: account.number.clone(),
                        message: format!(
                            "Le compte {} référence un parent inexistant ({parent})",
                            account.number
                        ),
                    });
                }
            }

            if let Some(leading) = AccountClass::from_account_number(&account.number) {
                if leading != account.class {
                    issues.push(ChartIssue {
                        kind: ChartIssueKind::ClassMismatch,
                        account: account.number.clone(),
                        message: format!(
                            "Le compte {} est en classe {} mais commence par {}",
                            account.number,
                            account.class.digit(),
                            leading.digit()
                        ),
                    });
                }
            }
        }

        issues
    }
}
