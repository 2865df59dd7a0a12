//! Application state shared by all handlers.

use std::sync::Arc;

use crate::db::HistoryStore;
use crate::quiz::QuizSession;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  /// The single quiz session this process serves
  pub session: Arc<QuizSession>,
}

impl AppState {
  pub fn new(session: QuizSession) -> Self {
    Self {
      session: Arc::new(session),
    }
  }

  pub fn history(&self) -> &HistoryStore {
    self.session.history()
  }
}
