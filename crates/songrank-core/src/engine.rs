//! Recommendation scoring and selection.
//!
//! [`ScoringEngine`] owns every decision in SongRank: how votes move a
//! score, when a recommendation is dropped, what counts as "top", and how
//! the weighted random pick chooses between the high-score and low-score
//! pools. It keeps no state of its own between calls; each operation
//! re-reads the store before it writes.
//!
//! # Selection rules
//!
//! | Rule | Value |
//! |------|-------|
//! | Removal | after a downvote, when `score < -5` |
//! | High-score pool | `score > 10` |
//! | Low-score pool | `score <= 10` |
//! | Chance of drawing from the high-score pool | `0.7` |

use std::sync::Arc;

use crate::error::{EngineError, DUPLICATE_NAME_MESSAGE};
use crate::models::{NewRecommendation, Recommendation};
use crate::random::{RandomSource, ThreadRandom};
use crate::store::{RecommendationStore, ScoreFilter, ScoreOrder};

/// A downvote that leaves the score strictly below this value removes the record.
pub const REMOVAL_THRESHOLD: i64 = -5;

/// Scores strictly above this value belong to the high-score pool.
pub const HIGH_SCORE_CUTOFF: i64 = 10;

/// Probability of drawing from the high-score pool.
pub const HIGH_POOL_PROBABILITY: f64 = 0.7;

/// Stateless scoring engine over an injected store and random source.
#[derive(Clone)]
pub struct ScoringEngine {
    store: Arc<dyn RecommendationStore>,
    random: Arc<dyn RandomSource>,
}

impl ScoringEngine {
    pub fn new(store: Arc<dyn RecommendationStore>, random: Arc<dyn RandomSource>) -> Self {
        Self { store, random }
    }

    /// Engine drawing from the thread-local RNG.
    pub fn with_thread_random(store: Arc<dyn RecommendationStore>) -> Self {
        Self::new(store, Arc::new(ThreadRandom))
    }

    pub fn store(&self) -> &Arc<dyn RecommendationStore> {
        &self.store
    }

    /// Create a recommendation with score 0.
    ///
    /// Fails with [`EngineError::Conflict`] if the name is already taken;
    /// nothing is written in that case.
    pub async fn insert(&self, input: NewRecommendation) -> Result<Recommendation, EngineError> {
        if input.name.trim().is_empty() {
            return Err(EngineError::Validation("name must not be empty".to_string()));
        }
        if input.youtube_link.trim().is_empty() {
            return Err(EngineError::Validation(
                "youtubeLink must not be empty".to_string(),
            ));
        }

        if self.store.find_by_name(&input.name).await?.is_some() {
            return Err(EngineError::Conflict(DUPLICATE_NAME_MESSAGE.to_string()));
        }

        Ok(self.store.create(&input).await?)
    }

    pub async fn upvote(&self, id: i64) -> Result<Recommendation, EngineError> {
        self.get_by_id(id).await?;
        Ok(self.store.update_score(id, 1).await?)
    }

    /// Decrement the score, removing the record once the persisted score
    /// drops below [`REMOVAL_THRESHOLD`].
    ///
    /// Returns the decremented record either way.
    pub async fn downvote(&self, id: i64) -> Result<Recommendation, EngineError> {
        self.get_by_id(id).await?;
        let updated = self.store.update_score(id, -1).await?;

        if updated.score < REMOVAL_THRESHOLD {
            self.store.remove(id).await?;
        }

        Ok(updated)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Recommendation, EngineError> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| EngineError::missing(id))
    }

    /// All recommendations in insertion order.
    pub async fn get(&self) -> Result<Vec<Recommendation>, EngineError> {
        Ok(self.store.find_all().await?)
    }

    /// Up to `amount` recommendations, highest score first.
    pub async fn get_top(&self, amount: usize) -> Result<Vec<Recommendation>, EngineError> {
        Ok(self
            .store
            .get_amount_by_score(amount, ScoreOrder::Descending)
            .await?)
    }

    /// Weighted random pick.
    ///
    /// A draw below [`HIGH_POOL_PROBABILITY`] selects from the high-score
    /// pool, anything else from the low-score pool. If the chosen pool is
    /// empty the other pool is used; if both are empty the store has no
    /// records and the pick fails with [`EngineError::NotFound`].
    pub async fn get_random(&self) -> Result<Recommendation, EngineError> {
        let high = ScoreFilter::Above(HIGH_SCORE_CUTOFF);
        let low = ScoreFilter::AtMost(HIGH_SCORE_CUTOFF);

        let (preferred, fallback) = if self.random.probability() < HIGH_POOL_PROBABILITY {
            (high, low)
        } else {
            (low, high)
        };

        let mut pool = self.store.find_by_score(preferred).await?;
        if pool.is_empty() {
            pool = self.store.find_by_score(fallback).await?;
        }
        if pool.is_empty() {
            return Err(EngineError::NotFound(
                "no recommendations available".to_string(),
            ));
        }

        let index = self.random.index(pool.len()).min(pool.len() - 1);
        Ok(pool.swap_remove(index))
    }

    /// Remove every recommendation. Only exposed by the server in test mode.
    pub async fn reset(&self) -> Result<(), EngineError> {
        Ok(self.store.remove_all().await?)
    }
}
