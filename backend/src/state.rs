use std::sync::Arc;

use crate::sheets::CourseSource;
use crate::store::SwipeHistoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SwipeHistoryStore>,
    pub courses: Arc<dyn CourseSource>,
}

impl AppState {
    pub fn new(store: Arc<dyn SwipeHistoryStore>, courses: Arc<dyn CourseSource>) -> Self {
        Self { store, courses }
    }
}
