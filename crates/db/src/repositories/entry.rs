//! Entry repository for ledger entry database operations.
//!
//! Transactional discipline lives here:
//! - `create_entry` writes the header and all lines in one transaction, so a
//!   partially-written entry is never observable;
//! - `validate_entry` re-checks the balance from the stored lines and flips
//!   the status with a conditional update (`WHERE status = 'draft'`), so one
//!   of two concurrent validations wins and the other gets
//!   `AlreadyValidated`.

use chrono::NaiveDate;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use compta_core::chart::ChartOfAccounts;
use compta_core::ledger::{CreateEntryInput, EntryStatus, Journal, LedgerError, LedgerService};
use compta_shared::types::{EntryId, PageRequest};

use crate::entities::{entries, entry_lines, sea_orm_active_enums};

/// Error types for entry operations.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// A business-rule violation from the ledger core.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Erreur base de données: {0}")]
    Database(#[from] DbErr),
}

impl EntryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(err) => err.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Ledger(err) => err.http_status_code(),
            Self::Database(_) => 500,
        }
    }
}

/// An entry header with its lines.
#[derive(Debug, Clone)]
pub struct EntryWithLines {
    /// The entry header.
    pub entry: entries::Model,
    /// The lines, in position order.
    pub lines: Vec<entry_lines::Model>,
}

/// Filter options for listing entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<NaiveDate>,
    /// Filter by journal.
    pub journal: Option<Journal>,
    /// Filter by status.
    pub status: Option<EntryStatus>,
    /// Filter by account number (entries with at least one line on it).
    pub account_number: Option<String>,
}

/// Repository for ledger entries.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    /// Creates a new entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an entry with its lines, atomically, in `draft` status.
    ///
    /// The input runs through the full core validation (line count, account
    /// existence against the injected chart, non-negative amounts, exact
    /// balance) before anything is written.
    ///
    /// # Errors
    ///
    /// Returns a `LedgerError` for any business-rule violation, or a
    /// database error.
    pub async fn create_entry(
        &self,
        input: &CreateEntryInput,
        chart: &ChartOfAccounts,
    ) -> Result<EntryWithLines, EntryError> {
        let totals = LedgerService::validate_input(input, chart)?;

        let txn = self.db.begin().await?;

        let entry_number = next_entry_number(&txn, input.journal, input.date).await?;
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let entry_id = Uuid::new_v4();

        let entry = entries::ActiveModel {
            id: Set(entry_id),
            entry_number: Set(entry_number),
            entry_date: Set(input.date),
            label: Set(input.label.clone()),
            journal: Set(input.journal.code().to_string()),
            supporting_document: Set(input.supporting_document.clone()),
            total_amount: Set(totals.total_debit),
            status: Set(sea_orm_active_enums::EntryStatus::Draft),
            created_at: Set(now),
            updated_at: Set(now),
            validated_at: Set(None),
        };
        let entry = entry.insert(&txn).await?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for (position, line) in input.lines.iter().enumerate() {
            let model = entry_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                entry_id: Set(entry_id),
                account_number: Set(line.account_number.clone()),
                label: Set(line.label.clone()),
                debit: Set(line.debit),
                credit: Set(line.credit),
                position: Set(i16::try_from(position).unwrap_or(i16::MAX)),
            };
            lines.push(model.insert(&txn).await?);
        }

        txn.commit().await?;

        Ok(EntryWithLines { entry, lines })
    }

    /// Validates a draft entry: the one-way draft -> validated transition.
    ///
    /// Inside a single transaction: re-reads the entry, re-checks the exact
    /// balance from its stored lines (drafts may have been edited since
    /// creation), then performs the status flip conditionally on the row
    /// still being a draft. A concurrent validation that lost the race sees
    /// zero affected rows and gets `AlreadyValidated`.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `AlreadyValidated` or `Unbalanced`, or a
    /// database error.
    pub async fn validate_entry(&self, entry_id: Uuid) -> Result<entries::Model, EntryError> {
        let txn = self.db.begin().await?;

        let entry = entries::Entity::find_by_id(entry_id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::EntryNotFound(EntryId::from_uuid(entry_id)))?;

        LedgerService::validate_can_validate(
            entry.status.clone().into(),
            EntryId::from_uuid(entry_id),
        )?;

        let lines = entry_lines::Entity::find()
            .filter(entry_lines::Column::EntryId.eq(entry_id))
            .all(&txn)
            .await?;

        let totals = LedgerService::totals_from_amounts(lines.iter().map(|l| (l.debit, l.credit)));
        if !totals.is_balanced {
            return Err(LedgerError::Unbalanced {
                debit: totals.total_debit,
                credit: totals.total_credit,
            }
            .into());
        }

        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let result = entries::Entity::update_many()
            .col_expr(
                entries::Column::Status,
                Expr::value(sea_orm_active_enums::EntryStatus::Validated),
            )
            .col_expr(entries::Column::ValidatedAt, Expr::value(Some(now)))
            .col_expr(entries::Column::UpdatedAt, Expr::value(now))
            .col_expr(entries::Column::TotalAmount, Expr::value(totals.total_debit))
            .filter(entries::Column::Id.eq(entry_id))
            .filter(entries::Column::Status.eq(sea_orm_active_enums::EntryStatus::Draft))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(LedgerError::AlreadyValidated(EntryId::from_uuid(entry_id)).into());
        }

        let validated = entries::Entity::find_by_id(entry_id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::EntryNotFound(EntryId::from_uuid(entry_id)))?;

        txn.commit().await?;

        tracing::debug!(entry_id = %entry_id, "Entry validated");
        Ok(validated)
    }

    /// Gets an entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if the entry does not exist.
    pub async fn get_entry(&self, entry_id: Uuid) -> Result<EntryWithLines, EntryError> {
        let entry = entries::Entity::find_by_id(entry_id)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::EntryNotFound(EntryId::from_uuid(entry_id)))?;

        let lines = entry_lines::Entity::find()
            .filter(entry_lines::Column::EntryId.eq(entry_id))
            .order_by_asc(entry_lines::Column::Position)
            .all(&self.db)
            .await?;

        Ok(EntryWithLines { entry, lines })
    }

    /// Lists entries with optional filters, newest first.
    ///
    /// Returns the page of headers and the total row count.
    pub async fn list_entries(
        &self,
        filter: &EntryFilter,
        page: &PageRequest,
    ) -> Result<(Vec<entries::Model>, u64), EntryError> {
        let mut query = entries::Entity::find();

        if let Some(date_from) = filter.date_from {
            query = query.filter(entries::Column::EntryDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(entries::Column::EntryDate.lte(date_to));
        }
        if let Some(journal) = filter.journal {
            query = query.filter(entries::Column::Journal.eq(journal.code()));
        }
        if let Some(status) = filter.status {
            let status: sea_orm_active_enums::EntryStatus = status.into();
            query = query.filter(entries::Column::Status.eq(status));
        }
        if let Some(account_number) = &filter.account_number {
            let entry_ids: Vec<Uuid> = entry_lines::Entity::find()
                .select_only()
                .column(entry_lines::Column::EntryId)
                .filter(entry_lines::Column::AccountNumber.eq(account_number))
                .into_tuple()
                .all(&self.db)
                .await?;
            query = query.filter(entries::Column::Id.is_in(entry_ids));
        }

        let total = query.clone().count(&self.db).await?;

        let models = query
            .order_by_desc(entries::Column::EntryDate)
            .order_by_desc(entries::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((models, total))
    }

    /// Deletes a draft entry (lines cascade).
    ///
    /// Validated entries are never deleted through this core; the audit
    /// trail is append-only.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` or `CanOnlyDeleteDraft`.
    pub async fn delete_entry(&self, entry_id: Uuid) -> Result<(), EntryError> {
        let entry = entries::Entity::find_by_id(entry_id)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::EntryNotFound(EntryId::from_uuid(entry_id)))?;

        LedgerService::validate_can_delete(entry.status.into())?;

        entries::Entity::delete_by_id(entry_id).exec(&self.db).await?;

        Ok(())
    }
}

/// Allocates the next entry number for (journal, date):
/// `JOURNAL-YYYYMMDD-NNN`, NNN being the per-journal per-day sequence.
async fn next_entry_number(
    txn: &DatabaseTransaction,
    journal: Journal,
    date: NaiveDate,
) -> Result<String, DbErr> {
    let count = entries::Entity::find()
        .filter(entries::Column::Journal.eq(journal.code()))
        .filter(entries::Column::EntryDate.eq(date))
        .count(txn)
        .await?;

    Ok(format_entry_number(journal, date, count + 1))
}

/// Formats an entry number.
#[must_use]
pub fn format_entry_number(journal: Journal, date: NaiveDate, sequence: u64) -> String {
    format!("{}-{}-{:03}", journal.code(), date.format("%Y%m%d"), sequence)
}
