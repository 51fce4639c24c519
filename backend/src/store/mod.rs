pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{SwipeAction, SwipeHistory};

pub use memory::InMemorySwipeHistoryStore;
pub use sqlite::SqliteSwipeHistoryStore;

/// Upper bound on records read back for one session.
pub const HISTORY_FETCH_LIMIT: usize = 1000;

/// Append-only log of swipe actions.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait SwipeHistoryStore: Send + Sync {
    async fn record(
        &self,
        session_id: &str,
        course_id: &str,
        action: SwipeAction,
    ) -> Result<Uuid, AppError>;

    /// Never fails for an unknown session; it just has no entries.
    async fn history_for(&self, session_id: &str) -> Result<SwipeHistory, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
