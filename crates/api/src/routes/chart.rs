//! Plan comptable (chart of accounts) routes.
//!
//! All reads are served from the in-memory chart in `AppState`; the chart
//! never changes while the server runs (corrective re-imports go through
//! the seeder and a restart).

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;
use compta_core::chart::{Account, AccountClass};

/// Creates the plan comptable routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/plan-comptable", get(list_accounts))
        .route("/plan-comptable/classes", get(list_classes))
        .route("/plan-comptable/comptes/{numero}", get(get_account))
        .route("/plan-comptable/validate", get(validate_chart))
}

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Filter by class digit (1-9).
    pub classe: Option<u8>,
    /// Filter by level (0-3).
    pub niveau: Option<u8>,
    /// Search by number prefix (digits) or label substring.
    pub search: Option<String>,
    /// Maximum number of results (default: 100).
    pub limit: Option<usize>,
}

/// Response for one account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account number.
    pub numero_compte: String,
    /// Account label.
    pub libelle_compte: String,
    /// Class digit.
    pub classe: u8,
    /// Depth level.
    pub niveau: u8,
    /// Parent account number.
    pub parent: Option<String>,
}

impl AccountResponse {
    fn from_account(account: &Account) -> Self {
        Self {
            numero_compte: account.number.clone(),
            libelle_compte: account.label.clone(),
            classe: account.class.digit(),
            niveau: account.level,
            parent: account.parent.clone(),
        }
    }
}

fn invalid_class_response() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "VALIDATION_ERROR",
            "message": "La classe doit être entre 1 et 9"
        })),
    )
        .into_response()
}

/// Lists chart accounts with optional filters.
async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(100);

    let class = match query.classe {
        Some(digit) => match AccountClass::from_digit(digit) {
            Some(class) => Some(class),
            None => return invalid_class_response(),
        },
        None => None,
    };

    let matches: Vec<&Account> = match query.search.as_deref() {
        Some(term) if !term.trim().is_empty() => state.chart.search(term, usize::MAX),
        _ => state.chart.iter().collect(),
    };

    let accounts: Vec<AccountResponse> = matches
        .into_iter()
        .filter(|account| class.is_none_or(|c| account.class == c))
        .filter(|account| query.niveau.is_none_or(|level| account.level == level))
        .take(limit)
        .map(AccountResponse::from_account)
        .collect();

    let mut body = json!({
        "data": accounts,
        "total": accounts.len(),
    });
    if let Some(class) = class {
        body["classe_info"] = json!({
            "numero": class.digit(),
            "libelle": class.label(),
        });
    }

    (StatusCode::OK, Json(body)).into_response()
}

/// Lists the nine SYCEBNL classes with account counts.
async fn list_classes(State(state): State<AppState>) -> impl IntoResponse {
    let classes: Vec<_> = AccountClass::ALL
        .iter()
        .map(|class| {
            let count = state.chart.accounts_in_class(*class).len();
            json!({
                "numero": class.digit(),
                "libelle": class.label(),
                "nombre_comptes": count,
                "actif": count > 0,
            })
        })
        .collect();

    Json(json!({ "data": classes }))
}

/// Gets one account with its parent and children.
async fn get_account(
    State(state): State<AppState>,
    Path(numero): Path<String>,
) -> impl IntoResponse {
    let Some(account) = state.chart.lookup(&numero) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "ACCOUNT_NOT_FOUND",
                "message": format!("Le compte {numero} n'existe pas dans le plan SYCEBNL")
            })),
        )
            .into_response();
    };

    let parent = state.chart.parent_of(&numero).map(AccountResponse::from_account);
    let children: Vec<AccountResponse> = state
        .chart
        .children_of(&numero)
        .into_iter()
        .map(AccountResponse::from_account)
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "compte": AccountResponse::from_account(account),
            "parent": parent,
            "enfants": children,
            "classe_info": {
                "numero": account.class.digit(),
                "libelle": account.class.label(),
            },
        })),
    )
        .into_response()
}

/// Runs the advisory consistency check over the loaded chart.
///
/// Findings are a report, never an error: the endpoint answers 200 even
/// when violations exist.
async fn validate_chart(State(state): State<AppState>) -> impl IntoResponse {
    let issues = state.chart.validate_consistency();

    Json(json!({
        "valide": issues.is_empty(),
        "nombre_problemes": issues.len(),
        "problemes": issues,
    }))
}
