//! In-process document store for tests.
//!
//! [`MemoryStore`] holds collections as vectors of raw BSON documents and
//! answers `find_all` in insertion order, the same contract the `MongoDB`
//! store offers. The repository and router tests run against it so they
//! do not need a database. It can be flipped into an unavailable state or
//! given artificial latency to exercise the API's failure paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use mongodb::bson::Document;

use crate::error::DbError;
use crate::store::bounded;

/// Per-query timeout of a new store.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Collections held in memory, shared between clones.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
    unavailable: Arc<AtomicBool>,
    latency_ms: Arc<AtomicU64>,
    timeout: Duration,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            collections: Arc::default(),
            unavailable: Arc::default(),
            latency_ms: Arc::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-query timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Append one document to `collection`.
    pub fn insert(&self, collection: &str, document: Document) {
        self.insert_many(collection, [document]);
    }

    /// Append documents to `collection`, preserving their order.
    pub fn insert_many(&self, collection: &str, documents: impl IntoIterator<Item = Document>) {
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        collections
            .entry(collection.to_owned())
            .or_default()
            .extend(documents);
    }

    /// Remove every document from `collection`.
    pub fn clear(&self, collection: &str) {
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        collections.remove(collection);
    }

    /// Number of documents currently in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        collections.get(collection).map_or(0, Vec::len)
    }

    /// Simulate the store going away (`true`) or coming back (`false`).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delay every query by `latency`. Zero turns the delay off.
    pub fn set_latency(&self, latency: Duration) {
        let ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latency_ms.store(ms, Ordering::SeqCst);
    }

    /// Return a copy of every document in `collection`.
    ///
    /// A collection that was never written to is empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StoreUnavailable`] while the store is marked
    /// unavailable or when the configured latency exceeds the timeout.
    pub async fn find_all(&self, collection: &str) -> Result<Vec<Document>, DbError> {
        bounded(self.timeout, collection, async {
            self.wait_latency().await;
            self.check_available()?;
            let collections = self
                .collections
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            Ok(collections.get(collection).cloned().unwrap_or_default())
        })
        .await
    }

    /// Succeeds unless the store is marked unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StoreUnavailable`] while the store is marked
    /// unavailable or when the configured latency exceeds the timeout.
    pub async fn ping(&self) -> Result<(), DbError> {
        bounded(self.timeout, "ping", async {
            self.wait_latency().await;
            self.check_available()
        })
        .await
    }

    async fn wait_latency(&self) {
        let ms = self.latency_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    fn check_available(&self) -> Result<(), DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::StoreUnavailable(String::from(
                "memory store marked unavailable",
            )));
        }
        Ok(())
    }
}
