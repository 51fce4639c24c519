use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course row normalized from the sheet source.
///
/// `id` is the 1-based position of the source row, recomputed on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub course_name: String,
    pub description: String,
    pub link: String,
    pub datetime: Option<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursesResponse {
    pub courses: Vec<Course>,
}
