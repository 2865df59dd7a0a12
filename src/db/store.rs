//! History store: the single owner of `question_history`.
//!
//! Writes go through the shared connection mutex, so interleaved appends
//! from several sessions never corrupt the counts. Every successful append
//! or clear bumps a revision counter that live feeds wait on.

use std::sync::Arc;
use tokio::sync::watch;

use super::{stats, DbPool};
use crate::db::{self, EmotionStat};
use crate::domain::HistoryRecord;
use crate::error::HistoryError;

#[derive(Clone)]
pub struct HistoryStore {
  pool: DbPool,
  revision: Arc<watch::Sender<u64>>,
}

impl HistoryStore {
  pub fn new(pool: DbPool) -> Self {
    let (revision, _) = watch::channel(0);
    Self {
      pool,
      revision: Arc::new(revision),
    }
  }

  /// Persist one answered question
  pub fn append(
    &self,
    emotion_label: &str,
    is_correct: bool,
    response_time_ms: i64,
  ) -> Result<HistoryRecord, HistoryError> {
    let record = {
      let conn = db::try_lock(&self.pool)?;
      db::insert_history(&conn, emotion_label, is_correct, response_time_ms)?
    };
    tracing::debug!(
      id = record.id,
      emotion = %record.emotion_label,
      is_correct = record.is_correct,
      "Recorded answer"
    );
    self.notify();
    Ok(record)
  }

  pub fn total_count(&self) -> Result<i64, HistoryError> {
    let conn = db::try_lock(&self.pool)?;
    Ok(db::count_all(&conn)?)
  }

  pub fn correct_count(&self) -> Result<i64, HistoryError> {
    let conn = db::try_lock(&self.pool)?;
    Ok(db::count_correct(&conn)?)
  }

  pub fn stats_by_emotion(&self) -> Result<Vec<EmotionStat>, HistoryError> {
    let conn = db::try_lock(&self.pool)?;
    Ok(stats::get_stats_by_emotion(&conn)?)
  }

  /// Snapshot of every record, newest first
  pub fn list_all(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
    let conn = db::try_lock(&self.pool)?;
    Ok(db::get_all_history(&conn)?)
  }

  pub fn history_for_emotion(&self, emotion_label: &str) -> Result<Vec<HistoryRecord>, HistoryError> {
    let conn = db::try_lock(&self.pool)?;
    Ok(db::get_history_by_emotion(&conn, emotion_label)?)
  }

  /// Delete every record. Irreversible.
  pub fn clear_all(&self) -> Result<usize, HistoryError> {
    let deleted = {
      let conn = db::try_lock(&self.pool)?;
      db::delete_all_history(&conn)?
    };
    tracing::info!("Cleared {} history records", deleted);
    self.notify();
    Ok(deleted)
  }

  /// Live view of all records, re-queried after every append or clear
  pub fn stream_all(&self) -> HistoryFeed {
    self.feed(None)
  }

  /// Live view of one emotion label's records
  pub fn stream_for_emotion(&self, emotion_label: &str) -> HistoryFeed {
    self.feed(Some(emotion_label.to_string()))
  }

  fn feed(&self, emotion_label: Option<String>) -> HistoryFeed {
    HistoryFeed {
      store: self.clone(),
      rx: self.revision.subscribe(),
      emotion_label,
      primed: false,
    }
  }

  fn notify(&self) {
    self.revision.send_modify(|rev| *rev += 1);
  }
}

/// Subscription returned by [`HistoryStore::stream_all`] and
/// [`HistoryStore::stream_for_emotion`].
///
/// The first call to [`HistoryFeed::next`] yields the current list at once;
/// later calls wait for the next mutation. Several mutations landing between
/// two calls collapse into one emission of the latest state.
pub struct HistoryFeed {
  store: HistoryStore,
  rx: watch::Receiver<u64>,
  /// Restrict to one label; `None` follows every record
  emotion_label: Option<String>,
  primed: bool,
}

impl HistoryFeed {
  pub async fn next(&mut self) -> Result<Vec<HistoryRecord>, HistoryError> {
    if self.primed {
      self
        .rx
        .changed()
        .await
        .map_err(|_| HistoryError::StorageUnavailable("history store closed".into()))?;
    }
    self.primed = true;
    self.rx.borrow_and_update();

    let store = self.store.clone();
    let label = self.emotion_label.clone();
    tokio::task::spawn_blocking(move || match label {
      Some(label) => store.history_for_emotion(&label),
      None => store.list_all(),
    })
    .await?
  }
}
