//! Rapprochement bancaire (bank reconciliation) routes.
//!
//! Purely advisory: the endpoint proposes correspondences and never writes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use compta_core::reconciliation::{
    BankMovement, DEFAULT_BANK_ACCOUNT_PREFIXES, MatchOptions, MatchStatus, match_movements,
    statistics,
};
use compta_db::repositories::reconciliation::ReconciliationRepository;

/// Creates the reconciliation routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/rapprochement/correspondances", post(find_matches))
}

/// One bank statement movement in the request.
#[derive(Debug, Deserialize)]
pub struct MovementRequest {
    /// Value date (YYYY-MM-DD).
    pub date: NaiveDate,
    /// Statement label.
    pub libelle: String,
    /// Signed amount.
    pub montant: Decimal,
    /// Optional bank reference.
    pub reference: Option<String>,
}

/// Request body for the correspondence search.
#[derive(Debug, Deserialize)]
pub struct FindMatchesRequest {
    /// Window start (YYYY-MM-DD).
    pub date_debut: NaiveDate,
    /// Window end (YYYY-MM-DD).
    pub date_fin: NaiveDate,
    /// Amount tolerance; defaults to one minor unit.
    pub tolerance_montant: Option<Decimal>,
    /// Minimum composite score to keep a candidate; defaults to 70.
    pub seuil_similarite: Option<Decimal>,
    /// Treasury account prefixes to scan; defaults to 52/53/55/57.
    pub comptes: Option<Vec<String>>,
    /// The bank movements to reconcile.
    pub mouvements_bancaires: Vec<MovementRequest>,
}

/// Searches correspondences between bank movements and validated entries.
async fn find_matches(
    State(state): State<AppState>,
    Json(payload): Json<FindMatchesRequest>,
) -> impl IntoResponse {
    if payload.date_fin < payload.date_debut {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "VALIDATION_ERROR",
                "message": "date_fin doit être postérieure à date_debut",
            })),
        )
            .into_response();
    }

    let defaults = MatchOptions::default();
    let options = MatchOptions {
        amount_tolerance: payload.tolerance_montant.unwrap_or(defaults.amount_tolerance),
        similarity_threshold: payload
            .seuil_similarite
            .unwrap_or(defaults.similarity_threshold),
    };

    let prefixes: Vec<String> = payload.comptes.unwrap_or_else(|| {
        DEFAULT_BANK_ACCOUNT_PREFIXES
            .iter()
            .map(ToString::to_string)
            .collect()
    });

    let movements: Vec<BankMovement> = payload
        .mouvements_bancaires
        .into_iter()
        .map(|movement| BankMovement {
            date: movement.date,
            label: movement.libelle,
            amount: movement.montant,
            reference: movement.reference,
        })
        .collect();

    let repo = ReconciliationRepository::new((*state.db).clone());
    let pool = match repo
        .candidate_lines(payload.date_debut, payload.date_fin, &prefixes)
        .await
    {
        Ok(pool) => pool,
        Err(err) => {
            error!(error = %err, "Database error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "DATABASE_ERROR",
                    "message": "Erreur interne",
                })),
            )
                .into_response();
        }
    };

    let matches = match_movements(&movements, &pool, &options);
    let stats = statistics(&matches);

    info!(
        movements = stats.total_movements,
        automatic = stats.automatic_count,
        manual = stats.manual_count,
        "Reconciliation proposals computed"
    );

    let correspondances: Vec<_> = matches
        .iter()
        .map(|result| {
            let candidates: Vec<_> = result
                .candidates
                .iter()
                .map(|candidate| {
                    json!({
                        "ecriture_id": candidate.line.entry_id,
                        "ligne_id": candidate.line.line_id,
                        "date": candidate.line.date,
                        "libelle": candidate.line.label,
                        "numero_compte": candidate.line.account_number,
                        "montant": candidate.line.amount.to_string(),
                        "piece_justificative": candidate.line.document,
                        "scores": {
                            "libelle": candidate.scores.label.to_string(),
                            "date": candidate.scores.date.to_string(),
                            "global": candidate.scores.composite.to_string(),
                        },
                    })
                })
                .collect();

            json!({
                "mouvement_bancaire": {
                    "date": result.movement.date,
                    "libelle": result.movement.label,
                    "montant": result.movement.amount.to_string(),
                    "reference": result.movement.reference,
                },
                "correspondances_trouvees": candidates,
                "statut": match result.status {
                    MatchStatus::Automatic => "automatique",
                    MatchStatus::Manual => "manuel",
                },
            })
        })
        .collect();

    Json(json!({
        "correspondances": correspondances,
        "statistiques": {
            "total_mouvements": stats.total_movements,
            "correspondances_automatiques": stats.automatic_count,
            "correspondances_manuelles": stats.manual_count,
            "taux_automatisation": stats.automation_rate.to_string(),
        },
    }))
    .into_response()
}
