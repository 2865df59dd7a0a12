//! Error types for the quiz core.
//!
//! Each component owns one enum. Only `QuizError` reaches the HTTP layer;
//! generation failures are absorbed into the placeholder fallback and
//! storage failures on the recording path are logged and dropped.

use thiserror::Error;

/// Contract violations in the emotion catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),

  #[error("Emotion not found: '{0}'")]
  NotFound(String),
}

/// Why a remote generation attempt produced no image.
///
/// Never returned to callers of `generate_image_for`; kept distinct so the
/// log line says which path failed.
#[derive(Error, Debug)]
pub enum GenerationError {
  #[error("API key not configured")]
  CredentialMissing,

  /// Configured key cannot be sent as an HTTP header value
  #[error("API key is not a valid header value")]
  InvalidCredential,

  #[error("Network error: {0}")]
  Network(String),

  #[error("Decode error: {0}")]
  Decode(String),

  #[error("Generation service returned no images")]
  EmptyResult,

  #[error("Generation service returned HTTP {status}")]
  Remote { status: u16 },

  #[error("Image cache error: {0}")]
  CacheIo(String),
}

impl GenerationError {
  /// Short tag used as a structured log field
  pub fn kind(&self) -> &'static str {
    match self {
      Self::CredentialMissing => "credential_missing",
      Self::InvalidCredential => "invalid_credential",
      Self::Network(_) => "network",
      Self::Decode(_) => "decode",
      Self::EmptyResult => "empty_result",
      Self::Remote { .. } => "remote",
      Self::CacheIo(_) => "cache_io",
    }
  }
}

impl From<reqwest::Error> for GenerationError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_decode() {
      Self::Decode(err.to_string())
    } else if let Some(status) = err.status() {
      Self::Remote {
        status: status.as_u16(),
      }
    } else {
      Self::Network(err.to_string())
    }
  }
}

/// History persistence failures
#[derive(Error, Debug)]
pub enum HistoryError {
  #[error("Storage unavailable: {0}")]
  StorageUnavailable(String),
}

impl From<rusqlite::Error> for HistoryError {
  fn from(err: rusqlite::Error) -> Self {
    Self::StorageUnavailable(err.to_string())
  }
}

impl From<crate::db::DbLockError> for HistoryError {
  fn from(err: crate::db::DbLockError) -> Self {
    Self::StorageUnavailable(err.to_string())
  }
}

impl From<tokio::task::JoinError> for HistoryError {
  fn from(err: tokio::task::JoinError) -> Self {
    Self::StorageUnavailable(format!("storage task failed: {err}"))
  }
}

/// Errors surfaced by the quiz session to its callers
#[derive(Error, Debug)]
pub enum QuizError {
  /// No image reference could be produced at all, not even a placeholder
  #[error("Could not load question: {0}")]
  Unrecoverable(String),

  #[error("No question is waiting for an answer")]
  NoActiveQuestion,

  #[error("'{0}' is not one of the offered options")]
  InvalidChoice(String),

  #[error(transparent)]
  Catalog(#[from] CatalogError),

  #[error(transparent)]
  History(#[from] HistoryError),
}
