//! Entry point for the CRM reports API.
//!
//! Wires the pieces together once at startup and then serves until the
//! process is told to stop.
//!
//! ```text
//! .env files -> tracing -> AppConfig -> MongoStore -> AppState -> Axum
//! ```
//!
//! The store is not required to be reachable at startup. Report requests
//! fail with 500 and `/health/ready` answers 503 until it is.

mod config;
mod error;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use crm_api::{AppState, start_server};
use crm_db::{DocumentStore, MongoStore};
use crm_types::ALL_DESCRIPTORS;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::StartupError;
use crate::logging::LogFormat;

/// Environment used to pick the `.env.{name}` file when `ENVIRONMENT` is unset.
const DEFAULT_ENVIRONMENT: &str = "development";

/// Application entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let environment =
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_owned());
    let env_files = logging::load_env_files(&environment);

    logging::init(LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref()));

    info!(%environment, ?env_files, "crm-server starting");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "crm-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    info!(
        host = %config.http.host,
        port = config.http.port,
        decode_policy = %config.decode_policy,
        "configuration loaded"
    );

    let mongo = MongoStore::connect(&config.mongo).await?;
    match mongo.ping().await {
        Ok(()) => info!(database = mongo.database_name(), "MongoDB reachable"),
        Err(e) => warn!(
            database = mongo.database_name(),
            error = %e,
            "MongoDB not reachable yet, reports will fail until it is"
        ),
    }

    for descriptor in ALL_DESCRIPTORS {
        info!(
            entity = descriptor.name,
            collection = descriptor.collection,
            fields = descriptor.fields.len(),
            "report registered"
        );
    }

    let state = Arc::new(AppState::new(
        DocumentStore::from(mongo.clone()),
        config.decode_policy,
    ));

    let served = start_server(&config.http, state).await;
    mongo.close().await;
    served?;

    info!("crm-server stopped");
    Ok(())
}
