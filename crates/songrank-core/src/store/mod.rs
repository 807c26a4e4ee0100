//! Storage abstraction for SongRank.
//!
//! The [`RecommendationStore`] trait defines every storage operation the
//! [`ScoringEngine`](crate::engine::ScoringEngine) needs, so the engine can
//! run against SQLite in production and against [`memory::InMemoryStore`]
//! in tests.
//!
//! Implementations must be `Send + Sync` to work with async runtimes, and
//! must make [`update_score`](RecommendationStore::update_score) and
//! [`remove`](RecommendationStore::remove) atomic per record. The engine
//! performs read-then-write sequences but does not serialize concurrent
//! callers itself.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewRecommendation, Recommendation};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this name already exists (storage-level uniqueness).
    #[error("name already taken: {0}")]
    NameTaken(String),

    /// The targeted record does not exist.
    #[error("recommendation {0} not found")]
    NotFound(i64),

    /// Any other backend failure (I/O, SQL, pool exhaustion).
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Score predicate used to build the random-selection pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreFilter {
    /// `score > n`
    Above(i64),
    /// `score <= n`
    AtMost(i64),
}

impl ScoreFilter {
    pub fn matches(&self, score: i64) -> bool {
        match *self {
            ScoreFilter::Above(n) => score > n,
            ScoreFilter::AtMost(n) => score <= n,
        }
    }
}

/// Sort direction for [`RecommendationStore::get_amount_by_score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOrder {
    Ascending,
    Descending,
}

/// Abstract storage backend for recommendations.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`find_by_name`](RecommendationStore::find_by_name) | Exact, case-sensitive name lookup |
/// | [`find`](RecommendationStore::find) | Lookup by id |
/// | [`find_all`](RecommendationStore::find_all) | All records in insertion order |
/// | [`find_by_score`](RecommendationStore::find_by_score) | Records matching a [`ScoreFilter`] |
/// | [`create`](RecommendationStore::create) | Insert with score 0 |
/// | [`update_score`](RecommendationStore::update_score) | Atomically add a delta to the score |
/// | [`remove`](RecommendationStore::remove) | Delete one record |
/// | [`get_amount_by_score`](RecommendationStore::get_amount_by_score) | Score-ordered, limited listing |
/// | [`remove_all`](RecommendationStore::remove_all) | Clear the store (test mode only) |
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Recommendation>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<Recommendation>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Recommendation>, StoreError>;

    async fn find_by_score(&self, filter: ScoreFilter) -> Result<Vec<Recommendation>, StoreError>;

    /// Insert a new record with score 0 and a store-assigned id.
    ///
    /// Returns [`StoreError::NameTaken`] if the name is already in use.
    async fn create(&self, input: &NewRecommendation) -> Result<Recommendation, StoreError>;

    /// Add `delta` to the record's score and return the updated record.
    ///
    /// Returns [`StoreError::NotFound`] if the record no longer exists.
    async fn update_score(&self, id: i64, delta: i64) -> Result<Recommendation, StoreError>;

    /// Delete a record. Removing an id that is already gone is not an error.
    async fn remove(&self, id: i64) -> Result<(), StoreError>;

    /// Return up to `amount` records ordered by score. Ties are broken by
    /// ascending id.
    async fn get_amount_by_score(
        &self,
        amount: usize,
        order: ScoreOrder,
    ) -> Result<Vec<Recommendation>, StoreError>;

    async fn remove_all(&self) -> Result<(), StoreError>;
}
