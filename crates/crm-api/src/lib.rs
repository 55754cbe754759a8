//! Read-only HTTP API over the CRM report collections.
//!
//! Five `GET` routes each return one collection as a JSON array:
//!
//! - `/deals` and `/leads` -- raw CRM records
//! - `/resume-lead` -- lead counts per status
//! - `/resume-deals/total_deals` -- deal totals per stage
//! - `/resume-deals/resume_close_deals` -- closed deals per month and stage
//!
//! The API never writes. Any store failure is reported as an opaque 500;
//! the cause goes to the log.
//!
//! # Architecture
//!
//! Routing is generic: each report type implements [`Report`], which picks
//! its repository out of the shared [`AppState`], and a single handler
//! serves them all. Adding a report means declaring an entity in
//! `crm-types`, a repository field, and a route.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{serve, shutdown_signal, start_server, ServerConfig, ServerError};
pub use state::{AppState, Report, Repositories};
