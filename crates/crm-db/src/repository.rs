//! Generic read-only repository.
//!
//! A [`ReadRepository`] is parameterized by an [`Entity`] and offers a
//! single operation: fetch every record from the entity's backing
//! collection. Exposing a new report needs a new entity declaration, not a
//! new repository.

use core::marker::PhantomData;

use crm_types::Entity;

use crate::decode::{DecodePolicy, decode_all};
use crate::error::DbError;
use crate::store::DocumentStore;

/// Read-only access to the collection backing `E`.
pub struct ReadRepository<E> {
    store: DocumentStore,
    policy: DecodePolicy,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> ReadRepository<E> {
    /// Create a repository reading from `store`.
    pub const fn new(store: DocumentStore, policy: DecodePolicy) -> Self {
        Self {
            store,
            policy,
            _entity: PhantomData,
        }
    }

    /// Name of the backing collection.
    pub const fn collection(&self) -> &'static str {
        E::DESCRIPTOR.collection
    }

    /// Decode policy applied to malformed documents.
    pub const fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Fetch every record in the backing collection.
    ///
    /// Records come back in store order, which callers must not rely on.
    /// An empty collection yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StoreUnavailable`] if the store cannot answer, or
    /// [`DbError::Decode`] under [`DecodePolicy::Strict`] when a document
    /// does not fit the entity's descriptor.
    pub async fn fetch_all(&self) -> Result<Vec<E>, DbError> {
        let collection = self.collection();
        let documents = self.store.find_all(collection).await?;
        let fetched = documents.len();

        let records = decode_all::<E>(documents, self.policy)?;

        tracing::debug!(
            collection,
            store = self.store.name(),
            fetched,
            returned = records.len(),
            "Fetched collection"
        );

        Ok(records)
    }
}

impl<E> Clone for ReadRepository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            policy: self.policy,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> core::fmt::Debug for ReadRepository<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReadRepository")
            .field("entity", &E::DESCRIPTOR.name)
            .field("collection", &E::DESCRIPTOR.collection)
            .field("store", &self.store.name())
            .field("policy", &self.policy)
            .finish()
    }
}
