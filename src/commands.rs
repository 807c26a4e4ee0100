//! CLI command implementations.
//!
//! Each command opens the configured database (creating the schema if it
//! is missing), runs one engine operation,
//! and prints the outcome to stdout. Engine failures are returned as errors
//! so `main` can report them and exit non-zero.

use anyhow::Result;
use std::sync::Arc;

use songrank_core::models::{NewRecommendation, Recommendation};
use songrank_core::ScoringEngine;

use crate::config::Config;
use crate::db;
use crate::migrate;
use crate::sqlite_store::SqliteStore;

async fn open_engine(config: &Config) -> Result<ScoringEngine> {
    let pool = db::connect(config).await?;
    migrate::apply(&pool).await?;
    Ok(ScoringEngine::with_thread_random(Arc::new(SqliteStore::new(pool))))
}

fn print_recommendation(rec: &Recommendation) {
    println!("#{}  [{:>4}]  {}", rec.id, rec.score, rec.name);
    println!("    {}", rec.youtube_link);
}

fn print_list(recs: &[Recommendation]) {
    if recs.is_empty() {
        println!("No recommendations.");
        return;
    }
    for rec in recs {
        print_recommendation(rec);
    }
}

pub async fn run_add(config: &Config, name: &str, youtube_link: &str) -> Result<()> {
    let engine = open_engine(config).await?;
    let rec = engine
        .insert(NewRecommendation::new(name, youtube_link))
        .await?;
    println!("Created recommendation #{}", rec.id);
    Ok(())
}

pub async fn run_list(config: &Config) -> Result<()> {
    let engine = open_engine(config).await?;
    print_list(&engine.get().await?);
    Ok(())
}

pub async fn run_get(config: &Config, id: i64) -> Result<()> {
    let engine = open_engine(config).await?;
    print_recommendation(&engine.get_by_id(id).await?);
    Ok(())
}

pub async fn run_top(config: &Config, amount: usize) -> Result<()> {
    let engine = open_engine(config).await?;
    print_list(&engine.get_top(amount).await?);
    Ok(())
}

pub async fn run_random(config: &Config) -> Result<()> {
    let engine = open_engine(config).await?;
    print_recommendation(&engine.get_random().await?);
    Ok(())
}

pub async fn run_upvote(config: &Config, id: i64) -> Result<()> {
    let engine = open_engine(config).await?;
    let rec = engine.upvote(id).await?;
    println!("#{} score: {}", rec.id, rec.score);
    Ok(())
}

pub async fn run_downvote(config: &Config, id: i64) -> Result<()> {
    let engine = open_engine(config).await?;
    let rec = engine.downvote(id).await?;
    if engine.store().find(id).await?.is_none() {
        println!("#{} score: {} (removed)", rec.id, rec.score);
    } else {
        println!("#{} score: {}", rec.id, rec.score);
    }
    Ok(())
}
