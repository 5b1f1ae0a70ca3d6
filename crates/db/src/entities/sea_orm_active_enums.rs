//! Database enum mappings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use compta_core::ledger::EntryStatus as DomainEntryStatus;

/// Entry lifecycle status (`entry_status` Postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_status")]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is in the brouillard.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Entry has been validated and is immutable.
    #[sea_orm(string_value = "validated")]
    Validated,
}

impl From<EntryStatus> for DomainEntryStatus {
    fn from(status: EntryStatus) -> Self {
        match status {
            EntryStatus::Draft => Self::Draft,
            EntryStatus::Validated => Self::Validated,
        }
    }
}

impl From<DomainEntryStatus> for EntryStatus {
    fn from(status: DomainEntryStatus) -> Self {
        match status {
            DomainEntryStatus::Draft => Self::Draft,
            DomainEntryStatus::Validated => Self::Validated,
        }
    }
}
