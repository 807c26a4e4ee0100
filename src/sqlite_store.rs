//! SQLite-backed [`RecommendationStore`] implementation.
//!
//! Score changes run as a single `UPDATE … SET score = score + ?` statement
//! with `RETURNING`, so concurrent votes on the same row cannot overwrite
//! each other. Name uniqueness is enforced by the table's `UNIQUE(name)`
//! constraint and surfaced as [`StoreError::NameTaken`].

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use songrank_core::models::{NewRecommendation, Recommendation};
use songrank_core::store::{RecommendationStore, ScoreFilter, ScoreOrder, StoreError};

const COLUMNS: &str = "id, name, youtube_link, score";

/// SQLite implementation of the [`RecommendationStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_recommendation(row: &SqliteRow) -> Recommendation {
    Recommendation {
        id: row.get("id"),
        name: row.get("name"),
        youtube_link: row.get("youtube_link"),
        score: row.get("score"),
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.into())
}

#[async_trait]
impl RecommendationStore for SqliteStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Recommendation>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM recommendations WHERE name = ?",
            COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.as_ref().map(row_to_recommendation))
    }

    async fn find(&self, id: i64) -> Result<Option<Recommendation>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM recommendations WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.as_ref().map(row_to_recommendation))
    }

    async fn find_all(&self) -> Result<Vec<Recommendation>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM recommendations ORDER BY id ASC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.iter().map(row_to_recommendation).collect())
    }

    async fn find_by_score(&self, filter: ScoreFilter) -> Result<Vec<Recommendation>, StoreError> {
        let (op, threshold) = match filter {
            ScoreFilter::Above(n) => (">", n),
            ScoreFilter::AtMost(n) => ("<=", n),
        };

        let rows = sqlx::query(&format!(
            "SELECT {} FROM recommendations WHERE score {} ? ORDER BY id ASC",
            COLUMNS, op
        ))
        .bind(threshold)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.iter().map(row_to_recommendation).collect())
    }

    async fn create(&self, input: &NewRecommendation) -> Result<Recommendation, StoreError> {
        let result = sqlx::query(&format!(
            "INSERT INTO recommendations (name, youtube_link, score) VALUES (?, ?, 0) RETURNING {}",
            COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.youtube_link)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row_to_recommendation(&row)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::NameTaken(input.name.clone()))
            }
            Err(e) => Err(backend(e)),
        }
    }

    async fn update_score(&self, id: i64, delta: i64) -> Result<Recommendation, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE recommendations SET score = score + ? WHERE id = ? RETURNING {}",
            COLUMNS
        ))
        .bind(delta)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.as_ref()
            .map(row_to_recommendation)
            .ok_or(StoreError::NotFound(id))
    }

    async fn remove(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM recommendations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn get_amount_by_score(
        &self,
        amount: usize,
        order: ScoreOrder,
    ) -> Result<Vec<Recommendation>, StoreError> {
        let direction = match order {
            ScoreOrder::Ascending => "ASC",
            ScoreOrder::Descending => "DESC",
        };
        let limit = i64::try_from(amount).unwrap_or(i64::MAX);

        let rows = sqlx::query(&format!(
            "SELECT {} FROM recommendations ORDER BY score {}, id ASC LIMIT ?",
            COLUMNS, direction
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.iter().map(row_to_recommendation).collect())
    }

    async fn remove_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM recommendations")
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
