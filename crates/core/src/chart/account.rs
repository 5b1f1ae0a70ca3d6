//! Account domain types for the SYCEBNL chart.

use serde::{Deserialize, Serialize};

/// SYCEBNL account class (the leading digit of the account number).
///
/// The nine classes partition the chart: balance-sheet classes (1-5),
/// management classes (6-8) and commitment/analytical accounts (9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountClass {
    /// Class 1 - Durable resource accounts (endowments, funds, borrowings).
    DurableResources,
    /// Class 2 - Fixed asset accounts.
    FixedAssets,
    /// Class 3 - Inventory accounts.
    Inventory,
    /// Class 4 - Third-party accounts (suppliers, members, donors, state).
    ThirdParties,
    /// Class 5 - Treasury accounts (banks, cash, imprest funds).
    Treasury,
    /// Class 6 - Expense accounts.
    Expenses,
    /// Class 7 - Revenue accounts.
    Revenues,
    /// Class 8 - Other expenses and revenues (non-recurring operations).
    SpecialOperations,
    /// Class 9 - In-kind voluntary contributions.
    InKindContributions,
}

impl AccountClass {
    /// All classes in ascending digit order.
    pub const ALL: [Self; 9] = [
        Self::DurableResources,
        Self::FixedAssets,
        Self::Inventory,
        Self::ThirdParties,
        Self::Treasury,
        Self::Expenses,
        Self::Revenues,
        Self::SpecialOperations,
        Self::InKindContributions,
    ];

    /// Returns the class for a digit 1-9.
    #[must_use]
    pub const fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Self::DurableResources),
            2 => Some(Self::FixedAssets),
            3 => Some(Self::Inventory),
            4 => Some(Self::ThirdParties),
            5 => Some(Self::Treasury),
            6 => Some(Self::Expenses),
            7 => Some(Self::Revenues),
            8 => Some(Self::SpecialOperations),
            9 => Some(Self::InKindContributions),
            _ => None,
        }
    }

    /// Returns the class derived from an account number's leading digit.
    #[must_use]
    pub fn from_account_number(number: &str) -> Option<Self> {
        let first = number.chars().next()?;
        let digit = first.to_digit(10)?;
        Self::from_digit(u8::try_from(digit).ok()?)
    }

    /// Returns the class digit (1-9).
    #[must_use]
    pub const fn digit(self) -> u8 {
        match self {
            Self::DurableResources => 1,
            Self::FixedAssets => 2,
            Self::Inventory => 3,
            Self::ThirdParties => 4,
            Self::Treasury => 5,
            Self::Expenses => 6,
            Self::Revenues => 7,
            Self::SpecialOperations => 8,
            Self::InKindContributions => 9,
        }
    }

    /// Returns the official SYCEBNL class label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DurableResources => "Comptes de ressources durables",
            Self::FixedAssets => "Comptes d'actif immobilisé",
            Self::Inventory => "Comptes de stocks",
            Self::ThirdParties => "Comptes de tiers",
            Self::Treasury => "Comptes de trésorerie",
            Self::Expenses => "Comptes de charges des activités ordinaires",
            Self::Revenues => "Comptes de produits des activités ordinaires",
            Self::SpecialOperations => "Comptes des autres charges et des autres produits",
            Self::InKindContributions => "Contributions volontaires en nature",
        }
    }
}

/// A node of the chart of accounts.
///
/// Accounts form a tree: the parent is referenced by number (by value, not
/// by pointer) and resolved through the registry index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account number (digits, unique, 1-4+ characters).
    pub number: String,
    /// Account label.
    pub label: String,
    /// Account class, normally the leading digit of `number`.
    pub class: AccountClass,
    /// Depth level: 0 = class root, 1 = principal, 2 = divisional, 3 = sub-account.
    pub level: u8,
    /// Parent account number, if any.
    pub parent: Option<String>,
}

impl Account {
    /// Depth level derived from the number length, capped at 3.
    #[must_use]
    pub fn level_for_number(number: &str) -> u8 {
        let len = number.chars().count().saturating_sub(1);
        u8::try_from(len.min(3)).unwrap_or(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_digit_roundtrip() {
        for class in AccountClass::ALL {
            assert_eq!(AccountClass::from_digit(class.digit()), Some(class));
        }
    }

    #[test]
    fn test_class_from_invalid_digit() {
        assert_eq!(AccountClass::from_digit(0), None);
        assert_eq!(AccountClass::from_digit(10), None);
    }

    #[test]
    fn test_class_from_account_number() {
        assert_eq!(
            AccountClass::from_account_number("571"),
            Some(AccountClass::Treasury)
        );
        assert_eq!(
            AccountClass::from_account_number("7561"),
            Some(AccountClass::Revenues)
        );
        assert_eq!(AccountClass::from_account_number(""), None);
        assert_eq!(AccountClass::from_account_number("X12"), None);
        assert_eq!(AccountClass::from_account_number("0"), None);
    }

    #[test]
    fn test_level_for_number() {
        assert_eq!(Account::level_for_number("1"), 0);
        assert_eq!(Account::level_for_number("10"), 1);
        assert_eq!(Account::level_for_number("101"), 2);
        assert_eq!(Account::level_for_number("1011"), 3);
        assert_eq!(Account::level_for_number("10111"), 3);
    }
}
