pub mod factory;
pub mod session;

use serde::Serialize;

use crate::db::{accuracy_percent, EmotionStat, HistoryStore};
use crate::error::HistoryError;

pub use factory::QuestionFactory;
pub use session::{AnswerOutcome, QuizSession};

/// Per-emotion line of the statistics summary
#[derive(Debug, Clone, Serialize)]
pub struct EmotionSummary {
  pub emotion_label: String,
  pub total_asked: i64,
  pub total_correct: i64,
  pub accuracy_percent: f64,
}

impl From<EmotionStat> for EmotionSummary {
  fn from(stat: EmotionStat) -> Self {
    Self {
      accuracy_percent: stat.accuracy_percent(),
      emotion_label: stat.emotion_label,
      total_asked: stat.total_asked,
      total_correct: stat.total_correct,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryStatistics {
  pub total_count: i64,
  pub correct_count: i64,
  pub accuracy_percent: f64,
  pub per_emotion: Vec<EmotionSummary>,
}

impl SummaryStatistics {
  /// Read totals and per-emotion stats from the store
  pub fn collect(store: &HistoryStore) -> Result<Self, HistoryError> {
    let total_count = store.total_count()?;
    let correct_count = store.correct_count()?;
    let per_emotion = store
      .stats_by_emotion()?
      .into_iter()
      .map(EmotionSummary::from)
      .collect();

    Ok(Self {
      total_count,
      correct_count,
      accuracy_percent: accuracy_percent(correct_count, total_count),
      per_emotion,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db;

  #[test]
  fn test_empty_store_has_zero_accuracy() {
    let store = HistoryStore::new(db::init_memory_db().unwrap());
    let summary = SummaryStatistics::collect(&store).unwrap();
    assert_eq!(summary.total_count, 0);
    assert_eq!(summary.accuracy_percent, 0.0);
    assert!(summary.per_emotion.is_empty());
  }

  #[test]
  fn test_emotion_summary_from_stat() {
    let summary = EmotionSummary::from(EmotionStat {
      emotion_label: "Buồn".into(),
      total_asked: 4,
      total_correct: 1,
    });
    assert_eq!(summary.accuracy_percent, 25.0);
  }
}
