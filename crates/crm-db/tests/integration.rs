//! Integration tests for the `crm-db` data layer.
//!
//! Tests that need a live `MongoDB` are marked `#[ignore]` so they are
//! skipped during normal `cargo test` runs. Run them with:
//!
//! ```bash
//! docker run -d --rm -p 27017:27017 mongo:7
//! cargo test -p crm-db -- --ignored
//! ```
//!
//! Each live test uses its own throwaway database and drops it afterwards.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::indexing_slicing
)]

use std::time::Duration;

use crm_db::bson::{Document, doc};
use crm_db::{DbError, DecodePolicy, DocumentStore, MongoConfig, MongoStore, ReadRepository};
use crm_types::{Deal, Lead, ResumeCloseDeals, ResumeLead, TotalDeals};
use mongodb::Client;
use serde_json::{Number, json};

/// `MongoDB` deployment for the local Docker instance.
const MONGO_URL: &str = "mongodb://localhost:27017";

// =============================================================================
// Helpers
// =============================================================================

/// A throwaway database seeded through the raw driver.
struct Scratch {
    client: Client,
    name: String,
}

impl Scratch {
    async fn new(tag: &str) -> Self {
        let client = Client::with_uri_str(MONGO_URL)
            .await
            .expect("Failed to build MongoDB client -- is Docker running?");
        let name = format!("crm_db_test_{tag}_{}", std::process::id());
        client
            .database(&name)
            .drop()
            .await
            .expect("Failed to reset scratch database");
        Self { client, name }
    }

    async fn seed(&self, collection: &str, documents: Vec<Document>) {
        self.client
            .database(&self.name)
            .collection::<Document>(collection)
            .insert_many(documents)
            .await
            .expect("Failed to seed collection");
    }

    async fn store(&self) -> DocumentStore {
        let config = MongoConfig::new(MONGO_URL).with_database(&self.name);
        DocumentStore::from(MongoStore::connect(&config).await.expect("Failed to connect"))
    }

    async fn cleanup(self) {
        self.client
            .database(&self.name)
            .drop()
            .await
            .expect("Failed to drop scratch database");
    }
}

// =============================================================================
// Unreachable store (no server needed)
// =============================================================================

#[tokio::test]
async fn unreachable_server_is_store_unavailable() {
    let config = MongoConfig::new("mongodb://127.0.0.1:1/crm_unreachable")
        .with_timeout(Duration::from_millis(200));
    let store = MongoStore::connect(&config).await.unwrap();

    let err = store.ping().await.unwrap_err();
    assert!(err.is_unavailable(), "unexpected error: {err}");

    let deals = ReadRepository::<Deal>::new(DocumentStore::from(store), DecodePolicy::Strict);
    let err = deals.fetch_all().await.unwrap_err();
    assert!(matches!(err, DbError::StoreUnavailable(_)));
}

// =============================================================================
// Live MongoDB
// =============================================================================

#[tokio::test]
#[ignore = "requires live MongoDB instance (docker run -p 27017:27017 mongo:7)"]
async fn mongo_ping() {
    let scratch = Scratch::new("ping").await;
    scratch.store().await.ping().await.expect("ping failed");
    scratch.cleanup().await;
}

#[tokio::test]
#[ignore = "requires live MongoDB instance (docker run -p 27017:27017 mongo:7)"]
async fn mongo_empty_collections() {
    let scratch = Scratch::new("empty").await;
    let store = scratch.store().await;

    let deals = ReadRepository::<Deal>::new(store.clone(), DecodePolicy::Strict);
    let leads = ReadRepository::<Lead>::new(store.clone(), DecodePolicy::Strict);
    let totals = ReadRepository::<TotalDeals>::new(store.clone(), DecodePolicy::Strict);
    let closes = ReadRepository::<ResumeCloseDeals>::new(store.clone(), DecodePolicy::Strict);
    let statuses = ReadRepository::<ResumeLead>::new(store, DecodePolicy::Strict);

    assert!(deals.fetch_all().await.unwrap().is_empty());
    assert!(leads.fetch_all().await.unwrap().is_empty());
    assert!(totals.fetch_all().await.unwrap().is_empty());
    assert!(closes.fetch_all().await.unwrap().is_empty());
    assert!(statuses.fetch_all().await.unwrap().is_empty());

    scratch.cleanup().await;
}

#[tokio::test]
#[ignore = "requires live MongoDB instance (docker run -p 27017:27017 mongo:7)"]
async fn mongo_deal_roundtrip_without_description() {
    let scratch = Scratch::new("deals").await;
    scratch
        .seed(
            "deals",
            vec![doc! { "title": "Acme", "amount": 500, "status": "open", "__v": 0 }],
        )
        .await;

    let deals = ReadRepository::<Deal>::new(scratch.store().await, DecodePolicy::Strict);
    let fetched = deals.fetch_all().await.unwrap();

    assert_eq!(fetched.len(), 1);
    assert_eq!(
        serde_json::to_value(&fetched).unwrap(),
        json!([{"title": "Acme", "amount": 500, "status": "open"}])
    );

    scratch.cleanup().await;
}

#[tokio::test]
#[ignore = "requires live MongoDB instance (docker run -p 27017:27017 mongo:7)"]
async fn mongo_resume_close_deals_two_months() {
    let scratch = Scratch::new("close").await;
    scratch
        .seed(
            "resume_close_deals",
            vec![
                doc! { "month": 1, "deal_stage": "closedwon", "year": 2024, "amount": 1000.0, "count": 2 },
                doc! { "month": 2, "deal_stage": "closedlost", "year": 2024, "amount": 250.0, "count": 1 },
            ],
        )
        .await;

    let closes =
        ReadRepository::<ResumeCloseDeals>::new(scratch.store().await, DecodePolicy::Strict);
    let mut fetched = closes.fetch_all().await.unwrap();
    fetched.sort_by_key(|c| c.month.as_i64());

    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0].month, Number::from(1));
    assert_eq!(fetched[0].deal_stage, "closedwon");
    assert_eq!(fetched[1].month, Number::from(2));
    assert_eq!(fetched[1].count, Number::from(1));

    scratch.cleanup().await;
}

#[tokio::test]
#[ignore = "requires live MongoDB instance (docker run -p 27017:27017 mongo:7)"]
async fn mongo_decode_policies() {
    let scratch = Scratch::new("policy").await;
    scratch
        .seed(
            "leads",
            vec![
                doc! { "email": "ana@example.com", "lead_status": "NEW", "lead_status_id": 1 },
                doc! { "first_name": "no email" },
            ],
        )
        .await;
    let store = scratch.store().await;

    let strict = ReadRepository::<Lead>::new(store.clone(), DecodePolicy::Strict);
    assert!(strict.fetch_all().await.unwrap_err().is_decode());

    let skip = ReadRepository::<Lead>::new(store, DecodePolicy::Skip);
    let leads = skip.fetch_all().await.unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].email, "ana@example.com");

    scratch.cleanup().await;
}
