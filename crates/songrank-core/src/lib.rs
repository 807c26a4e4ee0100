//! # SongRank Core
//!
//! Storage-agnostic logic for SongRank: the recommendation model, the
//! store abstraction, the injectable random source, and the scoring engine
//! that decides how votes move scores and which recommendations survive.
//!
//! This crate contains no tokio, sqlx, or HTTP dependencies. The SQLite
//! adapter and the HTTP transport live in the `songrank` crate.

pub mod engine;
pub mod error;
pub mod models;
pub mod random;
pub mod store;

pub use engine::ScoringEngine;
pub use error::EngineError;
pub use models::{NewRecommendation, Recommendation};
