use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{SwipeAction, SwipeHistory, SwipeHistoryRecord};
use crate::store::{HISTORY_FETCH_LIMIT, SwipeHistoryStore};

#[derive(Default)]
pub struct InMemorySwipeHistoryStore {
    records: RwLock<Vec<SwipeHistoryRecord>>,
}

impl InMemorySwipeHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<SwipeHistoryRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl SwipeHistoryStore for InMemorySwipeHistoryStore {
    async fn record(
        &self,
        session_id: &str,
        course_id: &str,
        action: SwipeAction,
    ) -> Result<Uuid, AppError> {
        let record = SwipeHistoryRecord::new(session_id, course_id, action);
        let id = record.id;
        self.records.write().await.push(record);
        Ok(id)
    }

    async fn history_for(&self, session_id: &str) -> Result<SwipeHistory, AppError> {
        let records = self.records.read().await;
        Ok(SwipeHistory::from_entries(
            records
                .iter()
                .filter(|r| r.session_id == session_id)
                .take(HISTORY_FETCH_LIMIT)
                .map(|r| (r.course_id.clone(), r.action)),
        ))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
