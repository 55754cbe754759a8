//! Shared application state for the report API.
//!
//! [`AppState`] owns one [`ReadRepository`] per report and the store handle
//! they share. It is built once at startup, wrapped in [`Arc`], and injected
//! into handlers through Axum's `State` extractor. Nothing in it is mutated
//! after construction, so requests never contend on a lock.
//!
//! [`Arc`]: std::sync::Arc

use crm_db::{DecodePolicy, DocumentStore, MemoryStore, ReadRepository};
use crm_types::{Deal, Lead, ResumeCloseDeals, ResumeLead, TotalDeals};

/// One repository per exposed report.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// `deals` collection.
    pub deals: ReadRepository<Deal>,
    /// `leads` collection.
    pub leads: ReadRepository<Lead>,
    /// `total_deals` rollup.
    pub total_deals: ReadRepository<TotalDeals>,
    /// `resume_close_deals` rollup.
    pub resume_close_deals: ReadRepository<ResumeCloseDeals>,
    /// `resume_lead_status` rollup.
    pub resume_lead: ReadRepository<ResumeLead>,
}

impl Repositories {
    /// Build every repository over the same store.
    pub fn new(store: &DocumentStore, policy: DecodePolicy) -> Self {
        Self {
            deals: ReadRepository::new(store.clone(), policy),
            leads: ReadRepository::new(store.clone(), policy),
            total_deals: ReadRepository::new(store.clone(), policy),
            resume_close_deals: ReadRepository::new(store.clone(), policy),
            resume_lead: ReadRepository::new(store.clone(), policy),
        }
    }
}

/// Shared state for the Axum application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Store handle, used directly only by the readiness check.
    pub store: DocumentStore,
    /// Report repositories.
    pub repos: Repositories,
}

impl AppState {
    /// Create the state for `store`, decoding with `policy`.
    pub fn new(store: DocumentStore, policy: DecodePolicy) -> Self {
        let repos = Repositories::new(&store, policy);
        Self { store, repos }
    }

    /// Create a state backed by in-process collections with the default
    /// decode policy. Used by the router tests; the server always reads
    /// from `MongoDB`.
    pub fn in_memory(memory: MemoryStore) -> Self {
        Self::new(DocumentStore::from(memory), DecodePolicy::default())
    }
}

/// Report types that have a repository in [`Repositories`].
///
/// Lets a single generic handler serve every report route.
pub trait Report: crm_types::Entity {
    /// Select this report's repository.
    fn repository(repos: &Repositories) -> &ReadRepository<Self>;
}

impl Report for Deal {
    fn repository(repos: &Repositories) -> &ReadRepository<Self> {
        &repos.deals
    }
}

impl Report for Lead {
    fn repository(repos: &Repositories) -> &ReadRepository<Self> {
        &repos.leads
    }
}

impl Report for TotalDeals {
    fn repository(repos: &Repositories) -> &ReadRepository<Self> {
        &repos.total_deals
    }
}

impl Report for ResumeCloseDeals {
    fn repository(repos: &Repositories) -> &ReadRepository<Self> {
        &repos.resume_close_deals
    }
}

impl Report for ResumeLead {
    fn repository(repos: &Repositories) -> &ReadRepository<Self> {
        &repos.resume_lead
    }
}
