//! `SeaORM` entity definitions.

pub mod chart_accounts;
pub mod entries;
pub mod entry_lines;
pub mod sea_orm_active_enums;
