//! Test utilities for quiz setup.
//!
//! Builds a session on a throwaway database using the real schema, with no
//! API key so every image comes from the placeholder service.

use std::time::Duration;
use tempfile::TempDir;

use crate::config::{GenerationConfig, PlaceholderConfig};
use crate::db::{self, DbPool, HistoryStore};
use crate::generation::ImageGenerationClient;
use crate::quiz::{QuestionFactory, QuizSession};

/// Session, store and scratch directory, cleaned up when dropped
pub struct TestEnv {
  /// Temporary directory (kept alive for database file persistence)
  pub temp: TempDir,
  pool: DbPool,
  pub store: HistoryStore,
  pub session: QuizSession,
}

impl TestEnv {
  pub fn new() -> rusqlite::Result<Self> {
    let temp =
      TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let pool = db::init_db(&temp.path().join("emotion_quiz.db"))?;
    let store = HistoryStore::new(pool.clone());

    let generation = GenerationConfig::without_credential(temp.path().join("cache"));
    let client = ImageGenerationClient::new(generation, PlaceholderConfig::default())
      .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let session = QuizSession::new(QuestionFactory::new(client), store.clone());

    Ok(Self {
      temp,
      pool,
      store,
      session,
    })
  }

  /// Raw connection pool behind the store
  pub fn store_pool(&self) -> &DbPool {
    &self.pool
  }

  /// Poll until background writes have landed (gives up after ~2s)
  pub async fn wait_for_records(&self, expected: i64) {
    for _ in 0..200 {
      if self.store.total_count().unwrap_or(0) >= expected {
        return;
      }
      tokio::time::sleep(Duration::from_millis(10)).await;
    }
  }
}
