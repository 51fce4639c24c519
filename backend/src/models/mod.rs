pub mod course;
pub mod swipe;

pub use course::{Course, CoursesResponse};
pub use swipe::{
    HistoryResponse, SwipeAck, SwipeAction, SwipeHistory, SwipeHistoryRecord, SwipeRequest,
    ANONYMOUS_SESSION,
};
