//! `SeaORM` Entity for the `entries` table (écritures comptables).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::EntryStatus;

/// Header of a double-entry accounting record.
///
/// Validated entries and their lines are append-only: the ledger core never
/// updates or deletes them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    /// Surrogate key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Sequential entry number, `JOURNAL-YYYYMMDD-NNN`.
    pub entry_number: String,
    /// Operation date.
    pub entry_date: Date,
    /// Entry label.
    pub label: String,
    /// Journal code (ACH, VTE, BQ, CAI, OD, DON, SUB).
    pub journal: String,
    /// Optional supporting document reference.
    pub supporting_document: Option<String>,
    /// Sum of line debits (== sum of credits once balanced).
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last modification timestamp.
    pub updated_at: DateTimeWithTimeZone,
    /// Set once, when the entry transitions to validated.
    pub validated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::entry_lines::Entity")]
    EntryLines,
}

impl Related<super::entry_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntryLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
