//! Store back end selection.
//!
//! [`DocumentStore`] is an enum over the two back ends. Repositories hold
//! one and do not know which back end is behind it.

use std::future::Future;
use std::time::Duration;

use mongodb::bson::Document;

use crate::error::DbError;
use crate::memory::MemoryStore;
use crate::mongo::MongoStore;

/// A source of raw documents, addressed by collection name.
#[derive(Debug, Clone)]
pub enum DocumentStore {
    /// A `MongoDB` deployment.
    Mongo(MongoStore),
    /// In-process collections.
    Memory(MemoryStore),
}

impl DocumentStore {
    /// Fetch every document in `collection`, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StoreUnavailable`] if the back end cannot answer.
    pub async fn find_all(&self, collection: &str) -> Result<Vec<Document>, DbError> {
        match self {
            Self::Mongo(store) => store.find_all(collection).await,
            Self::Memory(store) => store.find_all(collection).await,
        }
    }

    /// Check that the back end is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StoreUnavailable`] if it is not.
    pub async fn ping(&self) -> Result<(), DbError> {
        match self {
            Self::Mongo(store) => store.ping().await,
            Self::Memory(store) => store.ping().await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mongo(_) => "mongodb",
            Self::Memory(_) => "memory",
        }
    }
}

/// Run `operation` against `target`, failing with
/// [`DbError::StoreUnavailable`] if it has not finished within `limit`.
pub(crate) async fn bounded<T>(
    limit: Duration,
    target: &str,
    operation: impl Future<Output = Result<T, DbError>>,
) -> Result<T, DbError> {
    tokio::time::timeout(limit, operation)
        .await
        .unwrap_or_else(|_| {
            Err(DbError::StoreUnavailable(format!(
                "`{target}` did not answer within {} ms",
                limit.as_millis()
            )))
        })
}

impl From<MongoStore> for DocumentStore {
    fn from(store: MongoStore) -> Self {
        Self::Mongo(store)
    }
}

impl From<MemoryStore> for DocumentStore {
    fn from(store: MemoryStore) -> Self {
        Self::Memory(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mongodb::bson::doc;

    use super::*;

    #[tokio::test]
    async fn memory_dispatch() {
        let memory = MemoryStore::new();
        memory.insert("total_deals", doc! { "id": "closedwon" });
        let store = DocumentStore::from(memory.clone());

        assert_eq!(store.name(), "memory");
        assert_eq!(store.find_all("total_deals").await.unwrap().len(), 1);
        assert!(store.ping().await.is_ok());

        memory.set_unavailable(true);
        assert!(store.ping().await.unwrap_err().is_unavailable());
    }

    #[tokio::test]
    async fn bounded_passes_fast_results_through() {
        let result = bounded(Duration::from_secs(1), "deals", async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn bounded_expiry_is_unavailable() {
        let err = bounded(Duration::from_millis(10), "deals", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();

        assert!(err.is_unavailable());
        assert!(err.to_string().contains("`deals` did not answer within 10 ms"), "{err}");
    }
}
