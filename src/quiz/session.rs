//! One player's quiz loop: question, answer, record, repeat.

use serde::Serialize;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::{QuestionFactory, SummaryStatistics};
use crate::db::{HistoryStore, LogOnError};
use crate::domain::{Emotion, Question};
use crate::error::{HistoryError, QuizError};

/// The question currently waiting for an answer
struct ActiveRound {
  question: Question,
  started_at: Instant,
}

/// Result of answering the current question
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
  pub is_correct: bool,
  pub selected: Emotion,
  pub correct_emotion: Emotion,
  pub elapsed_ms: i64,
}

pub struct QuizSession {
  factory: QuestionFactory,
  history: HistoryStore,
  /// Held across image generation so a session never has two in flight
  round: Mutex<Option<ActiveRound>>,
}

impl QuizSession {
  pub fn new(factory: QuestionFactory, history: HistoryStore) -> Self {
    Self {
      factory,
      history,
      round: Mutex::new(None),
    }
  }

  pub fn history(&self) -> &HistoryStore {
    &self.history
  }

  /// Replace the current round with a fresh question and start its timer
  pub async fn next_question(&self) -> Result<Question, QuizError> {
    let mut round = self.round.lock().await;
    round.take();

    let question = self.factory.next_question().await?;
    tracing::debug!(
      correct = %question.correct_emotion,
      image = %question.image,
      "New question ready"
    );

    *round = Some(ActiveRound {
      question: question.clone(),
      started_at: Instant::now(),
    });
    Ok(question)
  }

  /// The question waiting for an answer, if any
  pub async fn current_question(&self) -> Option<Question> {
    self.round.lock().await.as_ref().map(|r| r.question.clone())
  }

  /// Score the player's choice and record it in the background.
  ///
  /// A choice outside the offered options leaves the round open.
  pub async fn submit_answer(&self, selected: Emotion) -> Result<AnswerOutcome, QuizError> {
    let mut guard = self.round.lock().await;
    let active = guard.as_ref().ok_or(QuizError::NoActiveQuestion)?;
    if !active.question.has_option(selected) {
      return Err(QuizError::InvalidChoice(selected.as_str().to_string()));
    }

    let Some(ActiveRound {
      question,
      started_at,
    }) = guard.take()
    else {
      return Err(QuizError::NoActiveQuestion);
    };
    drop(guard);

    let elapsed_ms = i64::try_from(started_at.elapsed().as_millis()).unwrap_or(i64::MAX);
    let is_correct = question.is_correct_answer(selected);

    let _ = self.record_answer(
      question.correct_emotion.display_name(),
      is_correct,
      elapsed_ms,
    );

    Ok(AnswerOutcome {
      is_correct,
      selected,
      correct_emotion: question.correct_emotion,
      elapsed_ms,
    })
  }

  /// Persist an answer without blocking the caller.
  ///
  /// Failures are logged and dropped. The handle is only useful to tests
  /// that need to wait for the write.
  pub fn record_answer(&self, emotion_label: &str, is_correct: bool, elapsed_ms: i64) -> JoinHandle<()> {
    let store = self.history.clone();
    let label = emotion_label.to_string();
    tokio::task::spawn_blocking(move || {
      store
        .append(&label, is_correct, elapsed_ms)
        .log_warn("Failed to save question history");
    })
  }

  pub fn summary_statistics(&self) -> Result<SummaryStatistics, HistoryError> {
    SummaryStatistics::collect(&self.history)
  }
}
