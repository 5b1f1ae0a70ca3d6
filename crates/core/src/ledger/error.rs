//! Ledger error types for validation and state errors.
//!
//! All business-rule violations are surfaced as structured values from this
//! taxonomy; the ledger core never throws opaque failures across the
//! component boundary.

use rust_decimal::Decimal;
use thiserror::Error;

use compta_shared::types::EntryId;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// A required field is missing or empty.
    #[error("Champ obligatoire manquant: {0}")]
    MissingRequiredField(&'static str),

    /// An entry must have at least 2 lines.
    #[error("Une écriture doit avoir au moins 2 lignes")]
    InsufficientLines,

    /// Line amounts cannot be negative.
    #[error("Les montants débit et crédit doivent être positifs ou nuls")]
    NegativeAmount,

    /// A line references an account missing from the chart.
    #[error("Compte inexistant dans le plan SYCEBNL: {0}")]
    UnknownAccount(String),

    /// The entry is not balanced (total debit != total credit).
    #[error("Écriture non équilibrée. Débit: {debit}, Crédit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    // ========== State Errors ==========
    /// The entry has already been validated.
    #[error("L'écriture {0} est déjà validée")]
    AlreadyValidated(EntryId),

    /// Validated entries are immutable.
    #[error("Impossible de modifier une écriture validée")]
    CannotModifyValidated,

    /// Only draft entries can be deleted.
    #[error("Seules les écritures en brouillard peuvent être supprimées")]
    CanOnlyDeleteDraft,

    // ========== Lookup Errors ==========
    /// The entry does not exist.
    #[error("Écriture non trouvée: {0}")]
    EntryNotFound(EntryId),

    /// The account does not exist in the chart.
    #[error("Compte non trouvé: {0}")]
    AccountNotFound(String),

    // ========== Infrastructure Errors ==========
    /// Database error.
    #[error("Erreur base de données: {0}")]
    Database(String),

    /// Internal error.
    #[error("Erreur interne: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField(_) => "MISSING_REQUIRED_FIELD",
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::AlreadyValidated(_) => "ALREADY_VALIDATED",
            Self::CannotModifyValidated => "CANNOT_MODIFY_VALIDATED",
            Self::CanOnlyDeleteDraft => "CAN_ONLY_DELETE_DRAFT",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::MissingRequiredField(_)
            | Self::InsufficientLines
            | Self::NegativeAmount
            | Self::UnknownAccount(_)
            | Self::Unbalanced { .. } => 400,

            // 404 Not Found
            Self::EntryNotFound(_) | Self::AccountNotFound(_) => 404,

            // 409 Conflict - state errors
            Self::AlreadyValidated(_)
            | Self::CannotModifyValidated
            | Self::CanOnlyDeleteDraft => 409,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }
}
