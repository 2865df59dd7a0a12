use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{ApiError, EmotionView};
use crate::catalog;
use crate::domain::Question;
use crate::error::QuizError;
use crate::quiz::AnswerOutcome;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QuestionView {
  pub correct_emotion: EmotionView,
  pub image: String,
  pub options: Vec<EmotionView>,
}

impl From<Question> for QuestionView {
  fn from(question: Question) -> Self {
    Self {
      correct_emotion: question.correct_emotion.into(),
      image: question.image.into(),
      options: question.options.into_iter().map(EmotionView::from).collect(),
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
  /// Emotion identifier, any case
  pub choice: String,
}

pub async fn list_emotions() -> Json<Vec<EmotionView>> {
  Json(catalog::list_all().iter().copied().map(EmotionView::from).collect())
}

pub async fn next_question(State(state): State<AppState>) -> Result<Json<QuestionView>, ApiError> {
  let question = state.session.next_question().await?;
  Ok(Json(question.into()))
}

pub async fn submit_answer(
  State(state): State<AppState>,
  Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerOutcome>, ApiError> {
  let selected = catalog::lookup_by_id(&request.choice).map_err(QuizError::from)?;
  let outcome = state.session.submit_answer(selected).await?;
  Ok(Json(outcome))
}
