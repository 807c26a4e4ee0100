//! In-memory [`RecommendationStore`] implementation for tests and
//! embedded use.
//!
//! Records live in a `Vec` behind `std::sync::RwLock`, which keeps them in
//! insertion order. Every mutation runs under a single write guard, so
//! score updates cannot lose increments under concurrent callers.

use std::cmp::Ordering;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::models::{NewRecommendation, Recommendation};

use super::{RecommendationStore, ScoreFilter, ScoreOrder, StoreError};

struct Inner {
    records: Vec<Recommendation>,
    next_id: i64,
}

/// In-memory store for tests and embedded environments.
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Insert a record with an explicit score, bypassing the vote path.
    ///
    /// Used to seed scenarios (e.g. ten records with scores 0..9).
    pub fn insert_with_score(
        &self,
        input: &NewRecommendation,
        score: i64,
    ) -> Result<Recommendation, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        if inner.records.iter().any(|r| r.name == input.name) {
            return Err(StoreError::NameTaken(input.name.clone()));
        }
        let rec = Recommendation {
            id: inner.next_id,
            name: input.name.clone(),
            youtube_link: input.youtube_link.clone(),
            score,
        };
        inner.next_id += 1;
        inner.records.push(rec.clone());
        Ok(rec)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Backend(anyhow::anyhow!("in-memory store lock poisoned"))
}

#[async_trait]
impl RecommendationStore for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Recommendation>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.records.iter().find(|r| r.name == name).cloned())
    }

    async fn find(&self, id: i64) -> Result<Option<Recommendation>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Recommendation>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.records.clone())
    }

    async fn find_by_score(&self, filter: ScoreFilter) -> Result<Vec<Recommendation>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .records
            .iter()
            .filter(|r| filter.matches(r.score))
            .cloned()
            .collect())
    }

    async fn create(&self, input: &NewRecommendation) -> Result<Recommendation, StoreError> {
        self.insert_with_score(input, 0)
    }

    async fn update_score(&self, id: i64, delta: i64) -> Result<Recommendation, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let rec = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        rec.score += delta;
        Ok(rec.clone())
    }

    async fn remove(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.records.retain(|r| r.id != id);
        Ok(())
    }

    async fn get_amount_by_score(
        &self,
        amount: usize,
        order: ScoreOrder,
    ) -> Result<Vec<Recommendation>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        let mut records = inner.records.clone();
        records.sort_by(|a, b| {
            let by_score = match order {
                ScoreOrder::Descending => b.score.cmp(&a.score),
                ScoreOrder::Ascending => a.score.cmp(&b.score),
            };
            match by_score {
                Ordering::Equal => a.id.cmp(&b.id),
                other => other,
            }
        });
        records.truncate(amount);
        Ok(records)
    }

    async fn remove_all(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.records.clear();
        Ok(())
    }
}
