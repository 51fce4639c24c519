use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Shared bucket for callers that do not send a session id.
pub const ANONYMOUS_SESSION: &str = "anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Save,
    Ignore,
}

impl SwipeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeAction::Save => "save",
            SwipeAction::Ignore => "ignore",
        }
    }
}

impl fmt::Display for SwipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwipeAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "save" => Ok(SwipeAction::Save),
            "ignore" => Ok(SwipeAction::Ignore),
            other => Err(AppError::Validation(format!(
                "action must be one of save, ignore (got {:?})",
                other
            ))),
        }
    }
}

/// One entry of the append-only swipe log.
#[derive(Debug, Clone)]
pub struct SwipeHistoryRecord {
    pub id: Uuid,
    pub session_id: String,
    pub course_id: String,
    pub action: SwipeAction,
    pub timestamp: DateTime<Utc>,
}

impl SwipeHistoryRecord {
    pub fn new(session_id: &str, course_id: &str, action: SwipeAction) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: session_id.to_string(),
            course_id: course_id.to_string(),
            action,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwipeRequest {
    pub course_id: String,
    pub action: SwipeAction,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl SwipeRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.course_id.is_empty() {
            return Err(AppError::Validation("course_id must not be empty".to_string()));
        }
        Ok(())
    }

    /// Missing, null and empty session ids all fall into the anonymous bucket.
    pub fn session_id(&self) -> &str {
        match self.session_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => ANONYMOUS_SESSION,
        }
    }
}

/// Course ids of one session, split by action, in retrieval order.
/// Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwipeHistory {
    pub saved: Vec<String>,
    pub ignored: Vec<String>,
}

impl SwipeHistory {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, SwipeAction)>,
    {
        let mut history = SwipeHistory::default();
        for (course_id, action) in entries {
            match action {
                SwipeAction::Save => history.saved.push(course_id),
                SwipeAction::Ignore => history.ignored.push(course_id),
            }
        }
        history
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub saved_courses: Vec<String>,
    pub ignored_courses: Vec<String>,
}

impl From<SwipeHistory> for HistoryResponse {
    fn from(history: SwipeHistory) -> Self {
        Self {
            saved_courses: history.saved,
            ignored_courses: history.ignored,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeAck {
    pub status: String,
    pub message: String,
}

impl SwipeAck {
    pub fn recorded() -> Self {
        Self {
            status: "success".to_string(),
            message: "Swipe action recorded".to_string(),
        }
    }
}
