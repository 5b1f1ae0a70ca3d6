//! `SeaORM` Entity for the `entry_lines` table (lignes d'écriture).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One debit-or-credit movement against a single account.
///
/// Lines are owned by their entry (composition): they are inserted with it,
/// deleted with it (drafts only), and never exist on their own.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "entry_lines")]
pub struct Model {
    /// Surrogate key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning entry.
    pub entry_id: Uuid,
    /// Account the movement is posted to.
    pub account_number: String,
    /// Line label.
    pub label: String,
    /// Debit amount (non-negative).
    pub debit: Decimal,
    /// Credit amount (non-negative).
    pub credit: Decimal,
    /// Order of the line within its entry.
    pub position: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::entries::Entity",
        from = "Column::EntryId",
        to = "super::entries::Column::Id"
    )]
    Entries,
    #[sea_orm(
        belongs_to = "super::chart_accounts::Entity",
        from = "Column::AccountNumber",
        to = "super::chart_accounts::Column::Number"
    )]
    ChartAccounts,
}

impl Related<super::entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl Related<super::chart_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChartAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
