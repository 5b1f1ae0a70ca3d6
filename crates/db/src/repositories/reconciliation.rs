//! Reconciliation repository: builds the candidate pool for the matcher.
//!
//! Read-only. The pool is every line of a validated entry posted to a
//! treasury account (configurable prefixes) within the requested window;
//! the actual scoring is pure and lives in `compta_core::reconciliation`.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use compta_core::reconciliation::CandidateLine;
use compta_shared::types::{EntryId, LineId};

use crate::entities::{entries, entry_lines, sea_orm_active_enums::EntryStatus};

/// Error types for reconciliation operations.
#[derive(Debug, thiserror::Error)]
pub enum ReconciliationError {
    /// Database error.
    #[error("Erreur base de données: {0}")]
    Database(#[from] DbErr),
}

/// Repository fetching reconciliation candidates.
#[derive(Debug, Clone)]
pub struct ReconciliationRepository {
    db: DatabaseConnection,
}

impl ReconciliationRepository {
    /// Creates a new reconciliation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches the candidate pool: lines of validated entries on accounts
    /// matching any of `prefixes`, within the date window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn candidate_lines(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
        prefixes: &[String],
    ) -> Result<Vec<CandidateLine>, ReconciliationError> {
        let headers = entries::Entity::find()
            .filter(entries::Column::Status.eq(EntryStatus::Validated))
            .filter(entries::Column::EntryDate.gte(date_start))
            .filter(entries::Column::EntryDate.lte(date_end))
            .all(&self.db)
            .await?;

        if headers.is_empty() || prefixes.is_empty() {
            return Ok(Vec::new());
        }

        let by_id: HashMap<Uuid, &entries::Model> =
            headers.iter().map(|entry| (entry.id, entry)).collect();

        let mut prefix_condition = Condition::any();
        for prefix in prefixes {
            prefix_condition =
                prefix_condition.add(entry_lines::Column::AccountNumber.starts_with(prefix.as_str()));
        }

        let lines = entry_lines::Entity::find()
            .filter(entry_lines::Column::EntryId.is_in(by_id.keys().copied().collect::<Vec<_>>()))
            .filter(prefix_condition)
            .all(&self.db)
            .await?;

        let candidates = lines
            .into_iter()
            .filter_map(|line| {
                by_id.get(&line.entry_id).map(|entry| CandidateLine {
                    entry_id: EntryId::from_uuid(entry.id),
                    line_id: LineId::from_uuid(line.id),
                    date: entry.entry_date,
                    label: entry.label.clone(),
                    account_number: line.account_number,
                    amount: line.debit - line.credit,
                    document: entry.supporting_document.clone(),
                })
            })
            .collect();

        Ok(candidates)
    }
}
