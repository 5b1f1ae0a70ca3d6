//! Balance and grand-livre (general ledger) routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::AppState;
use compta_core::chart::AccountClass;
use compta_db::repositories::report::{ReportError, ReportRepository};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/balance", get(get_balance))
        .route("/grand-livre/{numero}", get(get_account_ledger))
}

/// Query parameters for the balance report.
#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    /// Period start (YYYY-MM-DD).
    pub date_debut: Option<NaiveDate>,
    /// Period end (YYYY-MM-DD).
    pub date_fin: Option<NaiveDate>,
    /// Restrict to one class (1-9).
    pub classe: Option<u8>,
    /// Restrict to accounts of level <= niveau.
    pub niveau: Option<u8>,
}

/// Query parameters for the general ledger.
#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    /// Period start (YYYY-MM-DD).
    pub date_debut: Option<NaiveDate>,
    /// Period end (YYYY-MM-DD).
    pub date_fin: Option<NaiveDate>,
}

fn report_error_response(err: &ReportError) -> axum::response::Response {
    match err {
        ReportError::AccountNotFound(number) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "ACCOUNT_NOT_FOUND",
                "message": format!("Le compte {number} n'existe pas"),
            })),
        )
            .into_response(),
        ReportError::Database(db_err) => {
            error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "DATABASE_ERROR",
                    "message": "Erreur interne",
                })),
            )
                .into_response()
        }
    }
}

/// Generates the balance over validated entries.
async fn get_balance(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> impl IntoResponse {
    let class = match query.classe {
        None => None,
        Some(digit) => match AccountClass::from_digit(digit) {
            Some(class) => Some(class),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "VALIDATION_ERROR",
                        "message": "La classe doit être entre 1 et 9",
                    })),
                )
                    .into_response();
            }
        },
    };

    let repo = ReportRepository::new((*state.db).clone());
    match repo
        .balance(query.date_debut, query.date_fin, class, query.niveau, &state.chart)
        .await
    {
        Ok(report) => {
            let lignes: Vec<_> = report
                .rows
                .iter()
                .map(|row| {
                    json!({
                        "numero_compte": row.number,
                        "libelle_compte": row.label,
                        "classe": row.class.digit(),
                        "niveau": row.level,
                        "debit": row.total_debit.to_string(),
                        "credit": row.total_credit.to_string(),
                        "solde": row.net.to_string(),
                        "sens_solde": row.side.label(),
                    })
                })
                .collect();

            Json(json!({
                "lignes": lignes,
                "totaux": {
                    "total_debit": report.totals.total_debit.to_string(),
                    "total_credit": report.totals.total_credit.to_string(),
                    "equilibre": report.totals.is_balanced,
                },
                "parametres": {
                    "date_debut": query.date_debut,
                    "date_fin": query.date_fin,
                    "classe": query.classe,
                    "niveau": query.niveau,
                    "nombre_comptes": report.rows.len(),
                },
            }))
            .into_response()
        }
        Err(err) => report_error_response(&err),
    }
}

/// Generates the general ledger of one account.
async fn get_account_ledger(
    State(state): State<AppState>,
    Path(numero): Path<String>,
    Query(query): Query<LedgerQuery>,
) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());
    match repo
        .account_ledger(&numero, query.date_debut, query.date_fin, &state.chart)
        .await
    {
        Ok(report) => {
            let mouvements: Vec<_> = report
                .lines
                .iter()
                .map(|line| {
                    json!({
                        "date": line.date,
                        "numero_ecriture": line.entry_number,
                        "libelle_ecriture": line.entry_label,
                        "libelle_ligne": line.line_label,
                        "journal": line.journal.code(),
                        "piece_justificative": line.document,
                        "debit": line.debit.to_string(),
                        "credit": line.credit.to_string(),
                        "solde_cumule": line.running_balance.to_string(),
                    })
                })
                .collect();

            Json(json!({
                "compte": {
                    "numero": report.account.number,
                    "libelle": report.account.label,
                    "classe": report.account.class.digit(),
                },
                "mouvements": mouvements,
                "totaux": {
                    "total_debit": report.totals.total_debit.to_string(),
                    "total_credit": report.totals.total_credit.to_string(),
                    "solde_final": report.totals.closing_balance.to_string(),
                    "nombre_mouvements": report.lines.len(),
                },
            }))
            .into_response()
        }
        Err(err) => report_error_response(&err),
    }
}
