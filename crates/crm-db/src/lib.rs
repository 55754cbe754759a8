//! Data layer for the CRM reports API.
//!
//! Every report lives in its own `MongoDB` collection, populated by the
//! upstream sync pipeline. This crate only reads: it fetches whole
//! collections and maps each raw document onto the record type declared in
//! `crm-types`.
//!
//! # Architecture
//!
//! ```text
//! ReadRepository<E>::fetch_all()
//!     |
//!     +-- DocumentStore::find_all(E::DESCRIPTOR.collection)
//!     |       |-- MongoStore   (production)
//!     |       +-- MemoryStore  (tests)
//!     |
//!     +-- decode_all::<E>(documents, DecodePolicy)
//! ```
//!
//! # Modules
//!
//! - [`mongo`] -- `MongoDB` client configuration and queries
//! - [`memory`] -- In-process collections with the same contract
//! - [`store`] -- Enum dispatch over the two back ends
//! - [`decode`] -- Descriptor-driven document shaping and [`DecodePolicy`]
//! - [`repository`] -- The generic [`ReadRepository`]
//! - [`error`] -- Shared error types

pub mod decode;
pub mod error;
pub mod memory;
pub mod mongo;
pub mod repository;
pub mod store;

// Re-export primary types for convenience.
pub use decode::DecodePolicy;
pub use error::DbError;
pub use memory::MemoryStore;
pub use mongo::{DEFAULT_DATABASE, DEFAULT_MONGO_URI, MongoConfig, MongoStore};
pub use mongodb::bson;
pub use repository::ReadRepository;
pub use store::DocumentStore;
