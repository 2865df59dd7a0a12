use rusqlite::{Connection, Result};

/// Bump when the `question_history` layout changes. Older databases are
/// reset rather than migrated.
pub const SCHEMA_VERSION: i64 = 1;

pub fn run_migrations(conn: &Connection) -> Result<()> {
  let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

  if version != 0 && version != SCHEMA_VERSION {
    // Unknown layout: drop and recreate
    tracing::warn!(
      "History schema version {} does not match {}, dropping question_history",
      version,
      SCHEMA_VERSION
    );
    conn.execute_batch("DROP TABLE IF EXISTS question_history;")?;
  }

  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS question_history (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      timestamp INTEGER NOT NULL,
      emotionAsked TEXT NOT NULL,
      isCorrect INTEGER NOT NULL,
      timeTaken INTEGER NOT NULL DEFAULT 0
    );

    CREATE INDEX IF NOT EXISTS idx_question_history_timestamp ON question_history(timestamp);
    CREATE INDEX IF NOT EXISTS idx_question_history_emotion ON question_history(emotionAsked);
    "#,
  )?;

  conn.execute_batch(&format!("PRAGMA user_version = {};", SCHEMA_VERSION))?;
  Ok(())
}
