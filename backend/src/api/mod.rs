use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/health", get(health))
        .route("/api/courses", get(list_courses))
        .route("/api/swipe-history", post(record_swipe).get(anonymous_history))
        .route("/api/swipe-history/{session_id}", get(session_history))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "CourseSwipe API is running!".to_string(),
    })
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state
        .store
        .ping()
        .await
        .inspect_err(|e| error!("GET /api/health failed: {}", e))?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<CoursesResponse>, AppError> {
    let courses = state
        .courses
        .fetch_courses()
        .await
        .inspect_err(|e| error!("GET /api/courses failed: {}", e))?;
    Ok(Json(CoursesResponse { courses }))
}

async fn record_swipe(
    State(state): State<AppState>,
    payload: Result<Json<SwipeRequest>, JsonRejection>,
) -> Result<Json<SwipeAck>, AppError> {
    let req = payload
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
        .and_then(|Json(req)| req.validate().map(|()| req))
        .inspect_err(|e| warn!("POST /api/swipe-history rejected: {}", e))?;

    let session_id = req.session_id();
    let id = state
        .store
        .record(session_id, &req.course_id, req.action)
        .await
        .inspect_err(|e| error!("POST /api/swipe-history failed: {}", e))?;

    info!(
        "recorded {} of course {} for session {} ({})",
        req.action, req.course_id, session_id, id
    );
    Ok(Json(SwipeAck::recorded()))
}

async fn session_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    history(&state, &session_id).await
}

async fn anonymous_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, AppError> {
    history(&state, ANONYMOUS_SESSION).await
}

async fn history(state: &AppState, session_id: &str) -> Result<Json<HistoryResponse>, AppError> {
    let history = state
        .store
        .history_for(session_id)
        .await
        .inspect_err(|e| error!("GET /api/swipe-history/{} failed: {}", session_id, e))?;
    Ok(Json(history.into()))
}
