//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! This allows running isolated instances side by side:
//! ```bash
//! DATA_DIR=data/test PORT=3001 cargo run
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
  DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// SQLite database holding question history
pub fn db_path() -> PathBuf {
  PathBuf::from(format!("{}/emotion_quiz.db", data_dir()))
}

/// Private scratch directory for decoded generated images
pub fn image_cache_dir() -> PathBuf {
  PathBuf::from(format!("{}/cache/images", data_dir()))
}
