use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::warn;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{SwipeAction, SwipeHistory, SwipeHistoryRecord};
use crate::store::{HISTORY_FETCH_LIMIT, SwipeHistoryStore};

const MAX_CONNECTIONS: u32 = 5;

/// Opens (creating if needed) the database and applies migrations.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_migrations(db: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .map_err(sqlx::Error::from)?;
    Ok(())
}

#[derive(Clone)]
pub struct SqliteSwipeHistoryStore {
    db: SqlitePool,
}

impl SqliteSwipeHistoryStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

#[async_trait]
impl SwipeHistoryStore for SqliteSwipeHistoryStore {
    async fn record(
        &self,
        session_id: &str,
        course_id: &str,
        action: SwipeAction,
    ) -> Result<Uuid, AppError> {
        let record = SwipeHistoryRecord::new(session_id, course_id, action);

        sqlx::query(
            r#"
            INSERT INTO swipe_history (id, session_id, course_id, action, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.session_id)
        .bind(&record.course_id)
        .bind(record.action.as_str())
        .bind(record.timestamp.to_rfc3339())
        .execute(&self.db)
        .await?;

        Ok(record.id)
    }

    async fn history_for(&self, session_id: &str) -> Result<SwipeHistory, AppError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT course_id, action
            FROM swipe_history
            WHERE session_id = ?1
            ORDER BY rowid
            LIMIT ?2
            "#,
        )
        .bind(session_id)
        .bind(HISTORY_FETCH_LIMIT as i64)
        .fetch_all(&self.db)
        .await?;

        let entries = rows.into_iter().filter_map(|(course_id, action)| {
            match action.parse::<SwipeAction>() {
                Ok(action) => Some((course_id, action)),
                Err(_) => {
                    warn!("skipping swipe record with unknown action {:?}", action);
                    None
                }
            }
        });

        Ok(SwipeHistory::from_entries(entries))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqliteSwipeHistoryStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create database");
        run_migrations(&pool).await.expect("Failed to run migrations");
        SqliteSwipeHistoryStore::new(pool)
    }

    #[tokio::test]
    async fn records_and_partitions_by_action() {
        let store = memory_store().await;
        store.record("s1", "1", SwipeAction::Save).await.unwrap();
        store.record("s1", "2", SwipeAction::Ignore).await.unwrap();
        store.record("s1", "3", SwipeAction::Save).await.unwrap();
        store.record("s2", "4", SwipeAction::Save).await.unwrap();

        let history = store.history_for("s1").await.unwrap();
        assert_eq!(history.saved, vec!["1", "3"]);
        assert_eq!(history.ignored, vec!["2"]);
    }

    #[tokio::test]
    async fn same_course_can_be_saved_and_ignored() {
        let store = memory_store().await;
        store.record("s", "9", SwipeAction::Save).await.unwrap();
        store.record("s", "9", SwipeAction::Ignore).await.unwrap();

        let history = store.history_for("s").await.unwrap();
        assert_eq!(history.saved, vec!["9"]);
        assert_eq!(history.ignored, vec!["9"]);
    }

    #[tokio::test]
    async fn unknown_session_is_empty() {
        let store = memory_store().await;
        let history = store.history_for("nobody").await.unwrap();
        assert_eq!(history, SwipeHistory::default());
    }

    #[tokio::test]
    async fn stores_record_columns() {
        let store = memory_store().await;
        let id = store.record("s", "5", SwipeAction::Ignore).await.unwrap();

        let (stored_id, session_id, course_id, action, timestamp): (String, String, String, String, String) =
            sqlx::query_as("SELECT id, session_id, course_id, action, timestamp FROM swipe_history")
                .fetch_one(store.pool())
                .await
                .unwrap();
        assert_eq!(stored_id, id.to_string());
        assert_eq!(session_id, "s");
        assert_eq!(course_id, "5");
        assert_eq!(action, "ignore");
        assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());
    }

    #[tokio::test]
    async fn write_after_close_is_persistence_error() {
        let store = memory_store().await;
        store.pool().close().await;

        let err = store.record("s", "1", SwipeAction::Save).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert!(store.ping().await.is_err());
    }
}
