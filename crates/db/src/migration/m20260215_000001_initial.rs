//! Initial database migration.
//!
//! Creates the ledger schema: the entry status enum, the chart of accounts,
//! entry headers and entry lines, with the indexes the reporting queries
//! rely on (entry date, account number).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(CHART_OF_ACCOUNTS_SQL).await?;
        db.execute_unprepared(ENTRIES_SQL).await?;
        db.execute_unprepared(ENTRY_LINES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Entry lifecycle: draft -> validated, one-way
CREATE TYPE entry_status AS ENUM (
    'draft',
    'validated'
);
";

const CHART_OF_ACCOUNTS_SQL: &str = r#"
-- SYCEBNL chart of accounts: flat, self-referencing by number.
-- Bulk-loaded at initialization; read-only apart from corrective re-import.
CREATE TABLE chart_of_accounts (
    number          TEXT PRIMARY KEY,
    label           TEXT NOT NULL,
    class           SMALLINT NOT NULL CHECK (class BETWEEN 1 AND 9),
    level           SMALLINT NOT NULL CHECK (level BETWEEN 0 AND 3),
    parent_number   TEXT,
    imported_at     TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_chart_of_accounts_class ON chart_of_accounts (class);
CREATE INDEX idx_chart_of_accounts_parent ON chart_of_accounts (parent_number);
"#;

const ENTRIES_SQL: &str = r#"
-- Entry headers. Validated entries are append-only: no update, no delete.
CREATE TABLE entries (
    id                    UUID PRIMARY KEY,
    entry_number          TEXT NOT NULL UNIQUE,
    entry_date            DATE NOT NULL,
    label                 TEXT NOT NULL,
    journal               TEXT NOT NULL,
    supporting_document   TEXT,
    total_amount          NUMERIC(15, 2) NOT NULL,
    status                entry_status NOT NULL DEFAULT 'draft',
    created_at            TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at            TIMESTAMPTZ NOT NULL DEFAULT now(),
    validated_at          TIMESTAMPTZ
);

CREATE INDEX idx_entries_date ON entries (entry_date);
CREATE INDEX idx_entries_status ON entries (status);
CREATE INDEX idx_entries_journal ON entries (journal);
"#;

const ENTRY_LINES_SQL: &str = r#"
-- Entry lines: owned by their entry, foreign key into the chart.
-- The chart FK is deferred so a corrective re-import can replace the plan
-- within one transaction.
CREATE TABLE entry_lines (
    id              UUID PRIMARY KEY,
    entry_id        UUID NOT NULL REFERENCES entries (id) ON DELETE CASCADE,
    account_number  TEXT NOT NULL REFERENCES chart_of_accounts (number)
                        DEFERRABLE INITIALLY DEFERRED,
    label           TEXT NOT NULL DEFAULT '',
    debit           NUMERIC(15, 2) NOT NULL DEFAULT 0 CHECK (debit >= 0),
    credit          NUMERIC(15, 2) NOT NULL DEFAULT 0 CHECK (credit >= 0),
    position        SMALLINT NOT NULL DEFAULT 0
);

CREATE INDEX idx_entry_lines_entry ON entry_lines (entry_id);
CREATE INDEX idx_entry_lines_account ON entry_lines (account_number);
"#;

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS entry_lines;
DROP TABLE IF EXISTS entries;
DROP TABLE IF EXISTS chart_of_accounts;
DROP TYPE IF EXISTS entry_status;
";
