//! Axum router construction for the report API.
//!
//! Assembles the report and health routes into a single [`Router`] with
//! CORS and request tracing enabled.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use crm_types::{Deal, Lead, ResumeCloseDeals, ResumeLead, TotalDeals};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, list_records};
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /deals`
/// - `GET /leads`
/// - `GET /resume-lead`
/// - `GET /resume-deals/total_deals`
/// - `GET /resume-deals/resume_close_deals`
/// - `GET /health` and `GET /health/ready`
///
/// CORS allows any origin so browser dashboards can read the reports.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let resume_deals = Router::new()
        .route("/total_deals", get(list_records::<TotalDeals>))
        .route("/resume_close_deals", get(list_records::<ResumeCloseDeals>));

    Router::new()
        // Health
        .route("/health", get(handlers::live))
        .route("/health/ready", get(handlers::ready))
        // Reports
        .route("/deals", get(list_records::<Deal>))
        .route("/leads", get(list_records::<Lead>))
        .route("/resume-lead", get(list_records::<ResumeLead>))
        .nest("/resume-deals", resume_deals)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
