//! `MongoDB` connection handling.
//!
//! One [`MongoStore`] is created at startup and cloned into every
//! repository. The driver keeps its own connection pool behind the
//! [`Client`] handle, so clones share connections and no request ever opens
//! its own.

use std::time::Duration;

use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::error::DbError;
use crate::store::bounded;

/// Connection string used when none is configured.
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/hubspot_data";

/// Database used when neither the configuration nor the URI names one.
pub const DEFAULT_DATABASE: &str = "hubspot_data";

/// Default server selection and connect timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Application name reported to the server in the connection handshake.
const APP_NAME: &str = "crm-reports";

/// Configuration for the `MongoDB` connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    /// `MongoDB` connection string.
    ///
    /// Format: `mongodb://host:port/database`
    pub uri: String,
    /// Database name overriding the one in the URI path.
    pub database: Option<String>,
    /// Server selection, connect and per-query timeout.
    pub timeout: Duration,
}

impl MongoConfig {
    /// Create a new configuration from a connection string.
    pub fn new(uri: &str) -> Self {
        Self {
            uri: uri.to_owned(),
            database: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the database name.
    #[must_use]
    pub fn with_database(mut self, database: &str) -> Self {
        self.database = Some(database.to_owned());
        self
    }

    /// Set the server selection, connect and per-query timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MONGO_URI)
    }
}

/// Handle to the report database.
///
/// Wraps a [`Client`] and the selected [`Database`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
    timeout: Duration,
}

impl MongoStore {
    /// Build a client for the configured deployment.
    ///
    /// The driver connects lazily, so this succeeds even when the server
    /// is down; call [`MongoStore::ping`] to check reachability.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the connection string cannot be
    /// parsed or the client cannot be built from it.
    pub async fn connect(config: &MongoConfig) -> Result<Self, DbError> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| DbError::Config(format!("invalid MongoDB URI: {e}")))?;

        options.app_name = Some(APP_NAME.to_owned());
        options.server_selection_timeout = Some(config.timeout);
        options.connect_timeout = Some(config.timeout);

        let database_name = config
            .database
            .clone()
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_owned());

        let client = Client::with_options(options)
            .map_err(|e| DbError::Config(format!("cannot build MongoDB client: {e}")))?;
        let database = client.database(&database_name);

        tracing::info!(
            database = %database_name,
            timeout_ms = u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX),
            "MongoDB client configured"
        );

        Ok(Self {
            client,
            database,
            timeout: config.timeout,
        })
    }

    /// Name of the selected database.
    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Longest a single query may take.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run an unfiltered `find` on `collection` and collect every document
    /// in server order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StoreUnavailable`] if the server cannot be
    /// selected, the query or cursor iteration fails, or the whole read
    /// takes longer than the configured timeout.
    pub async fn find_all(&self, collection: &str) -> Result<Vec<Document>, DbError> {
        bounded(self.timeout, collection, async {
            let cursor = self
                .database
                .collection::<Document>(collection)
                .find(doc! {})
                .max_time(self.timeout)
                .await?;
            let documents: Vec<Document> = cursor.try_collect().await?;
            Ok(documents)
        })
        .await
    }

    /// Round-trip a `ping` command to the server.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StoreUnavailable`] if the server does not answer
    /// within the configured timeout.
    pub async fn ping(&self) -> Result<(), DbError> {
        bounded(self.timeout, "ping", async {
            self.database.run_command(doc! { "ping": 1 }).await?;
            Ok(())
        })
        .await
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB client closed");
    }
}
