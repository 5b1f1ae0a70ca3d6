//! `SeaORM` Entity for the `chart_of_accounts` table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One account of the SYCEBNL chart. Flat, self-referencing through
/// `parent_number` (by value; the registry resolves the tree in memory).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "chart_of_accounts")]
pub struct Model {
    /// Account number (digits).
    #[sea_orm(primary_key, auto_increment = false)]
    pub number: String,
    /// Account label.
    pub label: String,
    /// Class digit 1-9.
    pub class: i16,
    /// Depth level 0-3.
    pub level: i16,
    /// Parent account number, if any.
    pub parent_number: Option<String>,
    /// When this row was (re-)imported.
    pub imported_at: DateTimeWithTimeZone,
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
