//! Chart of accounts repository.
//!
//! The chart is bulk-loaded once at initialization and read-only
//! thereafter; `replace_plan` is the corrective re-import path.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set, TransactionTrait,
};

use compta_core::chart::{Account, AccountClass, ChartOfAccounts};

use crate::entities::chart_accounts;

/// Error types for chart operations.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// Database error.
    #[error("Erreur base de données: {0}")]
    Database(#[from] DbErr),
}

/// Repository for the persisted chart of accounts.
#[derive(Debug, Clone)]
pub struct ChartRepository {
    db: DatabaseConnection,
}

impl ChartRepository {
    /// Creates a new chart repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Number of accounts currently stored.
    pub async fn count(&self) -> Result<u64, ChartError> {
        Ok(chart_accounts::Entity::find().count(&self.db).await?)
    }

    /// Loads the stored chart into the in-memory registry.
    ///
    /// The registry is what every ledger operation receives; this is the
    /// only place rows become domain accounts.
    pub async fn load_chart(&self) -> Result<ChartOfAccounts, ChartError> {
        let rows = chart_accounts::Entity::find()
            .order_by_asc(chart_accounts::Column::Number)
            .all(&self.db)
            .await?;

        let accounts = rows.into_iter().map(account_from_row).collect();
        Ok(ChartOfAccounts::from_accounts(accounts))
    }

    /// Replaces the whole stored plan in a single transaction.
    ///
    /// Delete + bulk insert; the deferred FK from entry lines means a
    /// re-import that keeps all in-use numbers succeeds atomically, while
    /// one that drops an in-use account fails and rolls back.
    pub async fn replace_plan(&self, accounts: &[Account]) -> Result<usize, ChartError> {
        let txn = self.db.begin().await?;

        chart_accounts::Entity::delete_many().exec(&txn).await?;

        if !accounts.is_empty() {
            let now: DateTimeWithTimeZone = Utc::now().into();
            let rows = accounts.iter().map(|account| chart_accounts::ActiveModel {
                number: Set(account.number.clone()),
                label: Set(account.label.clone()),
                class: Set(i16::from(account.class.digit())),
                level: Set(i16::from(account.level)),
                parent_number: Set(account.parent.clone()),
                imported_at: Set(now),
            });
            chart_accounts::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        tracing::info!(accounts = accounts.len(), "Chart of accounts replaced");
        Ok(accounts.len())
    }
}

/// Maps a stored row to a domain account.
///
/// Class and level fall back to number-derived values if a row predates the
/// current constraints; `validate_consistency` reports such drift.
fn account_from_row(row: chart_accounts::Model) -> Account {
    let class = u8::try_from(row.class)
        .ok()
        .and_then(AccountClass::from_digit)
        .or_else(|| AccountClass::from_account_number(&row.number))
        .unwrap_or(AccountClass::SpecialOperations);

    let level = u8::try_from(row.level)
        .ok()
        .filter(|level| *level <= 3)
        .unwrap_or_else(|| Account::level_for_number(&row.number));

    Account {
        number: row.number,
        label: row.label,
        class,
        level,
        parent: row.parent_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(number: &str, class: i16, level: i16, parent: Option<&str>) -> chart_accounts::Model {
        chart_accounts::Model {
            number: number.to_string(),
            label: format!("Compte {number}"),
            class,
            level,
            parent_number: parent.map(ToString::to_string),
            imported_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_account_from_row() {
        let account = account_from_row(row("571", 5, 2, Some("57")));
        assert_eq!(account.number, "571");
        assert_eq!(account.class, AccountClass::Treasury);
        assert_eq!(account.level, 2);
        assert_eq!(account.parent.as_deref(), Some("57"));
    }

    #[test]
    fn test_account_from_row_bad_class_falls_back_to_number() {
        let account = account_from_row(row("571", 0, 2, None));
        assert_eq!(account.class, AccountClass::Treasury);
    }

    #[test]
    fn test_account_from_row_bad_level_derived_from_number() {
        let account = account_from_row(row("7561", 7, 9, None));
        assert_eq!(account.level, 3);
    }
}
