use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use super::Emotion;
use crate::catalog;

/// One answered question, as persisted in `question_history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
  pub id: i64,
  /// Epoch milliseconds at creation
  pub timestamp: i64,
  /// Display name of the emotion that was asked
  pub emotion_label: String,
  pub is_correct: bool,
  pub response_time_ms: i64,
}

impl HistoryRecord {
  pub fn answered_at(&self) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(self.timestamp).single()
  }

  /// Map the stored label back to a catalog emotion
  pub fn emotion(&self) -> Option<Emotion> {
    catalog::lookup_by_display_name(&self.emotion_label).ok()
  }
}
