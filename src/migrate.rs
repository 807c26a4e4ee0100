use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;

/// Open the configured database and create the schema.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    apply(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Create the `recommendations` table and its indexes. Idempotent.
pub async fn apply(pool: &SqlitePool) -> Result<()> {
    // UNIQUE(name) backs up the engine's duplicate-name check.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recommendations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            youtube_link TEXT NOT NULL,
            score INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_recommendations_score ON recommendations(score DESC)")
        .execute(pool)
        .await?;

    Ok(())
}
