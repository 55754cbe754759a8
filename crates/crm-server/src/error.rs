//! Error types for the server binary.
//!
//! Configuration problems and startup failures end the process with a
//! non-zero exit code. Nothing here is seen by HTTP clients.

/// A configuration variable was present but unusable.
#[derive(Debug, thiserror::Error)]
#[error("invalid {var}: {reason}")]
pub struct ConfigError {
    /// Name of the offending environment variable.
    pub var: &'static str,
    /// What was wrong with its value.
    pub reason: String,
}

impl ConfigError {
    /// Build an error for `var`.
    pub fn new(var: &'static str, reason: impl Into<String>) -> Self {
        Self {
            var,
            reason: reason.into(),
        }
    }
}

/// Errors that abort startup or end the serve loop.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The store client could not be built.
    #[error("store error: {0}")]
    Store(#[from] crm_db::DbError),

    /// The HTTP server failed to bind or serve.
    #[error(transparent)]
    Server(#[from] crm_api::ServerError),
}
