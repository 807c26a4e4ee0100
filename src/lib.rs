//! # SongRank
//!
//! Submit, browse, and vote on music recommendations.
//!
//! Votes move each recommendation's score; a recommendation that is
//! downvoted below −5 is dropped. Listings can be ordered by score, and a
//! weighted random pick favors well-liked entries (score above 10) seven
//! times out of ten while still surfacing the rest.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐
//! │   CLI    │   │   HTTP   │
//! │(songrank)│   │  (axum)  │
//! └────┬─────┘   └────┬─────┘
//!      └──────┬───────┘
//!             ▼
//!      ┌──────────────┐     ┌──────────────┐
//!      │ScoringEngine │────▶│ SQLite store │
//!      │   (core)     │     │ or in-memory │
//!      └──────────────┘     └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! songrank init
//! songrank add "Falamansa - Xote dos Milagres" https://www.youtube.com/watch?v=chwyjJbcs1Y
//! songrank top 10
//! songrank serve
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`sqlite_store`] | SQLite [`RecommendationStore`](songrank_core::store::RecommendationStore) |
//! | [`server`] | HTTP API |
//! | [`commands`] | CLI command implementations |

pub mod commands;
pub mod config;
pub mod db;
pub mod migrate;
pub mod server;
pub mod sqlite_store;
