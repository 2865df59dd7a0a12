pub mod history;
pub mod quiz;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::domain::Emotion;
use crate::error::{HistoryError, QuizError};
use crate::state::AppState;

pub use history::{clear_history, history_for_emotion, list_history, record_answer, stats};
pub use quiz::{list_emotions, next_question, submit_answer};

/// All API routes
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api/emotions", get(list_emotions))
    .route("/api/question", get(next_question))
    .route("/api/answer", post(submit_answer))
    .route(
      "/api/history",
      get(list_history).post(record_answer).delete(clear_history),
    )
    .route("/api/history/{label}", get(history_for_emotion))
    .route("/api/stats", get(stats))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Emotion as the client sees it
#[derive(Debug, Serialize)]
pub struct EmotionView {
  pub id: Emotion,
  pub display_name: &'static str,
}

impl From<Emotion> for EmotionView {
  fn from(emotion: Emotion) -> Self {
    Self {
      id: emotion,
      display_name: emotion.display_name(),
    }
  }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
  error: String,
}

/// Error response with a JSON body
pub struct ApiError {
  status: StatusCode,
  message: String,
}

impl ApiError {
  pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status,
      message: message.into(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(ErrorBody { error: self.message })).into_response()
  }
}

impl From<QuizError> for ApiError {
  fn from(err: QuizError) -> Self {
    let status = match &err {
      QuizError::Unrecoverable(_) => StatusCode::SERVICE_UNAVAILABLE,
      QuizError::NoActiveQuestion => StatusCode::CONFLICT,
      QuizError::InvalidChoice(_) | QuizError::Catalog(_) => StatusCode::BAD_REQUEST,
      QuizError::History(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    if status.is_server_error() {
      tracing::error!("{}", err);
    }
    Self::new(status, err.to_string())
  }
}

impl From<HistoryError> for ApiError {
  fn from(err: HistoryError) -> Self {
    tracing::error!("{}", err);
    Self::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
  }
}
