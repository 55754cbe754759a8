//! HTTP endpoint handlers for the report API.
//!
//! Every report route is served by the generic [`list_records`], which
//! fetches the whole backing collection through the report's repository and
//! returns it as a JSON array. The two health checks never touch report data.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/deals` | All deals |
//! | `GET` | `/leads` | All leads |
//! | `GET` | `/resume-lead` | Lead counts per status |
//! | `GET` | `/resume-deals/total_deals` | Deal totals per stage |
//! | `GET` | `/resume-deals/resume_close_deals` | Closed deals per month and stage |
//! | `GET` | `/health` | Liveness check |
//! | `GET` | `/health/ready` | Readiness check (pings the store) |

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use crm_types::ALL_DESCRIPTORS;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::{AppState, Report};

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// List every record of report `E`.
///
/// An empty collection is a successful, empty array.
///
/// # Errors
///
/// Returns [`ApiError::Store`] when the store is unreachable or a document
/// cannot be decoded under the strict policy.
pub async fn list_records<E: Report>(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<E>>, ApiError> {
    let records = E::repository(&state.repos).fetch_all().await?;
    Ok(Json(records))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Body of the readiness check.
#[derive(Debug, Serialize)]
pub struct ReadinessStatus {
    /// `ok` or `unavailable`.
    pub status: &'static str,
    /// `connected` or `disconnected`.
    pub database: &'static str,
    /// Back end serving the reports.
    pub store: &'static str,
    /// Collections exposed by the API.
    pub collections: Vec<&'static str>,
}

/// Liveness check. Answers as long as the process is serving.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness check. Pings the store.
pub async fn ready(State(state): State<Arc<AppState>>) -> (StatusCode, Json<ReadinessStatus>) {
    let collections = ALL_DESCRIPTORS.iter().map(|d| d.collection).collect();
    let store = state.store.name();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadinessStatus {
                status: "ok",
                database: "connected",
                store,
                collections,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, store, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessStatus {
                    status: "unavailable",
                    database: "disconnected",
                    store,
                    collections,
                }),
            )
        }
    }
}
