//! Écritures (ledger entry) routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use compta_core::ledger::{CreateEntryInput, EntryStatus, Journal, LineInput};
use compta_db::entities::{entries, entry_lines, sea_orm_active_enums};
use compta_db::repositories::entry::{EntryError, EntryFilter, EntryRepository, EntryWithLines};
use compta_shared::types::{PageRequest, PageResponse};

/// Creates the entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ecritures", get(list_entries).post(create_entry))
        .route("/ecritures/{entry_id}", get(get_entry).delete(delete_entry))
        .route("/ecritures/{entry_id}/valider", post(validate_entry))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for a single entry line.
#[derive(Debug, Deserialize)]
pub struct CreateLineRequest {
    /// Account number from the SYCEBNL chart.
    pub numero_compte: String,
    /// Line label.
    pub libelle: Option<String>,
    /// Debit amount.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default)]
    pub credit: Decimal,
}

/// Request body for creating an entry.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    /// Operation date (YYYY-MM-DD).
    pub date_ecriture: NaiveDate,
    /// Entry label.
    pub libelle: String,
    /// Journal code; defaults to OD.
    pub journal: Option<String>,
    /// Optional supporting document reference.
    pub piece_justificative: Option<String>,
    /// Entry lines (at least 2).
    #[serde(default)]
    pub lignes: Vec<CreateLineRequest>,
}

/// Query parameters for listing entries.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// Filter by date range start (YYYY-MM-DD).
    pub date_debut: Option<NaiveDate>,
    /// Filter by date range end (YYYY-MM-DD).
    pub date_fin: Option<NaiveDate>,
    /// Filter by journal code.
    pub journal: Option<String>,
    /// Filter by status (brouillard/valide).
    pub statut: Option<String>,
    /// Filter by account number.
    pub compte: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default: 50).
    pub limit: Option<u32>,
}

/// Response for an entry line.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    /// Line ID.
    pub id: Uuid,
    /// Account number.
    pub numero_compte: String,
    /// Line label.
    pub libelle: String,
    /// Debit amount.
    pub debit: String,
    /// Credit amount.
    pub credit: String,
}

/// Response for an entry header.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Sequential entry number.
    pub numero_ecriture: String,
    /// Operation date.
    pub date_ecriture: String,
    /// Entry label.
    pub libelle: String,
    /// Journal code.
    pub journal: String,
    /// Supporting document reference.
    pub piece_justificative: Option<String>,
    /// Total amount (sum of debits).
    pub montant_total: String,
    /// Status: brouillard or valide.
    pub statut: &'static str,
    /// Creation timestamp.
    pub date_creation: String,
    /// Validation timestamp, once validated.
    pub date_validation: Option<String>,
    /// Entry lines (empty in list responses).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lignes: Option<Vec<LineResponse>>,
}

/// French wire value of a stored status.
const fn statut_str(status: &sea_orm_active_enums::EntryStatus) -> &'static str {
    match status {
        sea_orm_active_enums::EntryStatus::Draft => "brouillard",
        sea_orm_active_enums::EntryStatus::Validated => "valide",
    }
}

/// Parses a status filter value (accepts the French wire values and the
/// storage names).
fn parse_statut(value: &str) -> Option<EntryStatus> {
    match value.to_lowercase().as_str() {
        "brouillard" | "draft" => Some(EntryStatus::Draft),
        "valide" | "validated" => Some(EntryStatus::Validated),
        _ => None,
    }
}

fn entry_response(entry: &entries::Model, lines: Option<&[entry_lines::Model]>) -> EntryResponse {
    EntryResponse {
        id: entry.id,
        numero_ecriture: entry.entry_number.clone(),
        date_ecriture: entry.entry_date.to_string(),
        libelle: entry.label.clone(),
        journal: entry.journal.clone(),
        piece_justificative: entry.supporting_document.clone(),
        montant_total: entry.total_amount.to_string(),
        statut: statut_str(&entry.status),
        date_creation: entry.created_at.to_rfc3339(),
        date_validation: entry.validated_at.map(|at| at.to_rfc3339()),
        lignes: lines.map(|lines| {
            lines
                .iter()
                .map(|line| LineResponse {
                    id: line.id,
                    numero_compte: line.account_number.clone(),
                    libelle: line.label.clone(),
                    debit: line.debit.to_string(),
                    credit: line.credit.to_string(),
                })
                .collect()
        }),
    }
}

/// Maps a repository error onto `{error, message}` with the domain status
/// code. Database errors are logged and answered with a generic message.
fn error_response(err: &EntryError) -> axum::response::Response {
    if let EntryError::Database(db_err) = err {
        error!(error = %db_err, "Database error");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "DATABASE_ERROR",
                "message": "Erreur interne"
            })),
        )
            .into_response();
    }

    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

fn validation_error(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "VALIDATION_ERROR",
            "message": message,
        })),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// Creates an entry in draft status.
async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<CreateEntryRequest>,
) -> impl IntoResponse {
    let journal = match payload.journal.as_deref() {
        None | Some("") => Journal::default(),
        Some(code) => match Journal::from_code(code) {
            Some(journal) => journal,
            None => return validation_error(&format!("Journal inconnu: {code}")),
        },
    };

    let input = CreateEntryInput {
        date: payload.date_ecriture,
        label: payload.libelle,
        journal,
        supporting_document: payload.piece_justificative,
        lines: payload
            .lignes
            .into_iter()
            .map(|line| LineInput {
                account_number: line.numero_compte,
                label: line.libelle.unwrap_or_default(),
                debit: line.debit,
                credit: line.credit,
            })
            .collect(),
    };

    let repo = EntryRepository::new((*state.db).clone());
    match repo.create_entry(&input, &state.chart).await {
        Ok(EntryWithLines { entry, lines }) => {
            info!(
                entry_id = %entry.id,
                entry_number = %entry.entry_number,
                journal = %entry.journal,
                total = %entry.total_amount,
                "Entry created"
            );
            (
                StatusCode::CREATED,
                Json(entry_response(&entry, Some(&lines))),
            )
                .into_response()
        }
        Err(err) => error_response(&err),
    }
}

/// Lists entries, newest first.
async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> impl IntoResponse {
    let journal = match query.journal.as_deref() {
        None | Some("") => None,
        Some(code) => match Journal::from_code(code) {
            Some(journal) => Some(journal),
            None => return validation_error(&format!("Journal inconnu: {code}")),
        },
    };

    let status = match query.statut.as_deref() {
        None | Some("") => None,
        Some(value) => match parse_statut(value) {
            Some(status) => Some(status),
            None => return validation_error(&format!("Statut inconnu: {value}")),
        },
    };

    let filter = EntryFilter {
        date_from: query.date_debut,
        date_to: query.date_fin,
        journal,
        status,
        account_number: query.compte.clone(),
    };
    let page = PageRequest {
        page: query.page.unwrap_or(1).max(1),
        per_page: query.limit.unwrap_or(50).clamp(1, 100),
    };

    let repo = EntryRepository::new((*state.db).clone());
    match repo.list_entries(&filter, &page).await {
        Ok((models, total)) => {
            let data: Vec<EntryResponse> = models
                .iter()
                .map(|entry| entry_response(entry, None))
                .collect();
            Json(PageResponse::new(data, page.page, page.per_page, total)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

/// Gets an entry with its lines.
async fn get_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());
    match repo.get_entry(entry_id).await {
        Ok(EntryWithLines { entry, lines }) => {
            Json(entry_response(&entry, Some(&lines))).into_response()
        }
        Err(err) => error_response(&err),
    }
}

/// Validates an entry: the one-way brouillard -> validé transition.
async fn validate_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());
    match repo.validate_entry(entry_id).await {
        Ok(entry) => {
            info!(entry_id = %entry.id, entry_number = %entry.entry_number, "Entry validated");
            Json(entry_response(&entry, None)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

/// Deletes a draft entry.
async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());
    match repo.delete_entry(entry_id).await {
        Ok(()) => {
            info!(entry_id = %entry_id, "Draft entry deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("brouillard", Some(EntryStatus::Draft))]
    #[case("draft", Some(EntryStatus::Draft))]
    #[case("valide", Some(EntryStatus::Validated))]
    #[case("VALIDATED", Some(EntryStatus::Validated))]
    #[case("annule", None)]
    fn test_parse_statut(#[case] value: &str, #[case] expected: Option<EntryStatus>) {
        assert_eq!(parse_statut(value), expected);
    }

    #[test]
    fn test_statut_wire_values() {
        assert_eq!(statut_str(&sea_orm_active_enums::EntryStatus::Draft), "brouillard");
        assert_eq!(statut_str(&sea_orm_active_enums::EntryStatus::Validated), "valide");
    }
}
