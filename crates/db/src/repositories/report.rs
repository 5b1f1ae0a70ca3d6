//! Report repository for balance and general-ledger queries.
//!
//! Reads observe VALIDATED entries only, under committed-read isolation: a
//! concurrently-validating entry is either fully visible or not visible at
//! all. The grouping and running-balance arithmetic is delegated to the
//! pure functions in `compta_core::ledger::balance`.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use uuid::Uuid;

use compta_core::chart::{Account, AccountClass, ChartOfAccounts};
use compta_core::ledger::{
    AccountBalance, BalanceTotals, Journal, LedgerLine, LedgerRow, LedgerTotals, PostedLine,
    aggregate_balance, running_ledger,
};
use compta_shared::types::EntryId;

use crate::entities::{entries, entry_lines, sea_orm_active_enums::EntryStatus};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Account not found in the chart.
    #[error("Compte non trouvé: {0}")]
    AccountNotFound(String),

    /// Database error.
    #[error("Erreur base de données: {0}")]
    Database(#[from] DbErr),
}

/// A balance report: per-account rows plus the accounting-identity totals.
#[derive(Debug, Clone)]
pub struct BalanceReport {
    /// Per-account aggregates, ascending by account number.
    pub rows: Vec<AccountBalance>,
    /// Grand totals; `is_balanced` holds for any unfiltered report.
    pub totals: BalanceTotals,
}

/// A general-ledger report for one account.
#[derive(Debug, Clone)]
pub struct LedgerReport {
    /// The account, from the chart.
    pub account: Account,
    /// Chronological movements with running balances.
    pub lines: Vec<LedgerLine>,
    /// Period totals and closing balance.
    pub totals: LedgerTotals,
}

/// Repository for financial report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes the balance over validated entries in the date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn balance(
        &self,
        date_start: Option<NaiveDate>,
        date_end: Option<NaiveDate>,
        class: Option<AccountClass>,
        level: Option<u8>,
        chart: &ChartOfAccounts,
    ) -> Result<BalanceReport, ReportError> {
        let entry_ids = self.validated_entry_ids(date_start, date_end).await?;

        let posted = if entry_ids.is_empty() {
            Vec::new()
        } else {
            entry_lines::Entity::find()
                .filter(entry_lines::Column::EntryId.is_in(entry_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|line| PostedLine {
                    account_number: line.account_number,
                    debit: line.debit,
                    credit: line.credit,
                })
                .collect()
        };

        let (rows, totals) = aggregate_balance(&posted, chart, class, level);
        Ok(BalanceReport { rows, totals })
    }

    /// Computes an account's general ledger over validated entries in the
    /// date range.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account is not in the chart.
    pub async fn account_ledger(
        &self,
        account_number: &str,
        date_start: Option<NaiveDate>,
        date_end: Option<NaiveDate>,
        chart: &ChartOfAccounts,
    ) -> Result<LedgerReport, ReportError> {
        let account = chart
            .lookup(account_number)
            .ok_or_else(|| ReportError::AccountNotFound(account_number.to_string()))?
            .clone();

        let headers = self.validated_entries(date_start, date_end).await?;
        if headers.is_empty() {
            let (lines, totals) = running_ledger(Vec::new());
            return Ok(LedgerReport { account, lines, totals });
        }

        let by_id: HashMap<Uuid, &entries::Model> =
            headers.iter().map(|entry| (entry.id, entry)).collect();

        let line_models = entry_lines::Entity::find()
            .filter(entry_lines::Column::AccountNumber.eq(account_number))
            .filter(entry_lines::Column::EntryId.is_in(by_id.keys().copied().collect::<Vec<_>>()))
            .all(&self.db)
            .await?;

        let rows = line_models
            .into_iter()
            .filter_map(|line| {
                by_id.get(&line.entry_id).map(|entry| LedgerRow {
                    date: entry.entry_date,
                    entry_id: EntryId::from_uuid(entry.id),
                    entry_number: Some(entry.entry_number.clone()),
                    entry_label: entry.label.clone(),
                    line_label: line.label,
                    journal: Journal::from_code(&entry.journal).unwrap_or_default(),
                    document: entry.supporting_document.clone(),
                    debit: line.debit,
                    credit: line.credit,
                })
            })
            .collect();

        let (lines, totals) = running_ledger(rows);
        Ok(LedgerReport { account, lines, totals })
    }

    /// Ids of validated entries within the range.
    async fn validated_entry_ids(
        &self,
        date_start: Option<NaiveDate>,
        date_end: Option<NaiveDate>,
    ) -> Result<Vec<Uuid>, DbErr> {
        let mut query = entries::Entity::find()
            .select_only()
            .column(entries::Column::Id)
            .filter(entries::Column::Status.eq(EntryStatus::Validated));

        if let Some(start) = date_start {
            query = query.filter(entries::Column::EntryDate.gte(start));
        }
        if let Some(end) = date_end {
            query = query.filter(entries::Column::EntryDate.lte(end));
        }

        query.into_tuple().all(&self.db).await
    }

    /// Validated entry headers within the range.
    async fn validated_entries(
        &self,
        date_start: Option<NaiveDate>,
        date_end: Option<NaiveDate>,
    ) -> Result<Vec<entries::Model>, DbErr> {
        let mut query = entries::Entity::find()
            .filter(entries::Column::Status.eq(EntryStatus::Validated));

        if let Some(start) = date_start {
            query = query.filter(entries::Column::EntryDate.gte(start));
        }
        if let Some(end) = date_end {
            query = query.filter(entries::Column::EntryDate.lte(end));
        }

        query.all(&self.db).await
    }
}
