use axum::{
  extract::{Path, State},
  http::StatusCode,
  Json,
};
use serde::Deserialize;

use super::ApiError;
use crate::domain::HistoryRecord;
use crate::quiz::SummaryStatistics;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecordAnswerRequest {
  pub emotion_label: String,
  pub is_correct: bool,
  #[serde(default)]
  pub elapsed_ms: i64,
}

/// Queue a history write; answers 202 before the row lands
pub async fn record_answer(
  State(state): State<AppState>,
  Json(request): Json<RecordAnswerRequest>,
) -> Result<StatusCode, ApiError> {
  if request.emotion_label.trim().is_empty() {
    return Err(ApiError::new(StatusCode::BAD_REQUEST, "emotion_label must not be empty"));
  }

  let _ = state
    .session
    .record_answer(&request.emotion_label, request.is_correct, request.elapsed_ms);
  Ok(StatusCode::ACCEPTED)
}

pub async fn list_history(State(state): State<AppState>) -> Result<Json<Vec<HistoryRecord>>, ApiError> {
  Ok(Json(state.history().list_all()?))
}

pub async fn history_for_emotion(
  State(state): State<AppState>,
  Path(label): Path<String>,
) -> Result<Json<Vec<HistoryRecord>>, ApiError> {
  Ok(Json(state.history().history_for_emotion(&label)?))
}

pub async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
  state.history().clear_all()?;
  Ok(StatusCode::NO_CONTENT)
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<SummaryStatistics>, ApiError> {
  Ok(Json(state.session.summary_statistics()?))
}
