//! Question history rows

use chrono::Utc;
use rusqlite::{params, Connection, Result};

use crate::domain::HistoryRecord;

/// Insert one answered question, stamped with the current time
pub fn insert_history(
  conn: &Connection,
  emotion_label: &str,
  is_correct: bool,
  response_time_ms: i64,
) -> Result<HistoryRecord> {
  let timestamp = Utc::now().timestamp_millis();
  let response_time_ms = response_time_ms.max(0);

  conn.execute(
    r#"
    INSERT INTO question_history (timestamp, emotionAsked, isCorrect, timeTaken)
    VALUES (?1, ?2, ?3, ?4)
    "#,
    params![timestamp, emotion_label, is_correct, response_time_ms],
  )?;

  Ok(HistoryRecord {
    id: conn.last_insert_rowid(),
    timestamp,
    emotion_label: emotion_label.to_string(),
    is_correct,
    response_time_ms,
  })
}

pub fn count_all(conn: &Connection) -> Result<i64> {
  conn.query_row("SELECT COUNT(*) FROM question_history", [], |row| row.get(0))
}

pub fn count_correct(conn: &Connection) -> Result<i64> {
  conn.query_row(
    "SELECT COUNT(*) FROM question_history WHERE isCorrect = 1",
    [],
    |row| row.get(0),
  )
}

/// All records, newest first
pub fn get_all_history(conn: &Connection) -> Result<Vec<HistoryRecord>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, timestamp, emotionAsked, isCorrect, timeTaken
    FROM question_history
    ORDER BY timestamp DESC, id DESC
    "#,
  )?;

  let records = stmt
    .query_map([], row_to_record)?
    .collect::<Result<Vec<_>>>()?;

  Ok(records)
}

/// Records for one emotion label, newest first
pub fn get_history_by_emotion(conn: &Connection, emotion_label: &str) -> Result<Vec<HistoryRecord>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, timestamp, emotionAsked, isCorrect, timeTaken
    FROM question_history
    WHERE emotionAsked = ?1
    ORDER BY timestamp DESC, id DESC
    "#,
  )?;

  let records = stmt
    .query_map(params![emotion_label], row_to_record)?
    .collect::<Result<Vec<_>>>()?;

  Ok(records)
}

/// Delete every record. Ids keep increasing afterwards (AUTOINCREMENT).
pub fn delete_all_history(conn: &Connection) -> Result<usize> {
  conn.execute("DELETE FROM question_history", [])
}

fn row_to_record(row: &rusqlite::Row) -> Result<HistoryRecord> {
  Ok(HistoryRecord {
    id: row.get(0)?,
    timestamp: row.get(1)?,
    emotion_label: row.get(2)?,
    is_correct: row.get(3)?,
    response_time_ms: row.get(4)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::run_migrations;

  fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn
  }

  #[test]
  fn test_insert_increments_counts() {
    let conn = conn();
    assert_eq!(count_all(&conn).unwrap(), 0);

    insert_history(&conn, "Buồn", true, 900).unwrap();
    assert_eq!(count_all(&conn).unwrap(), 1);
    assert_eq!(count_correct(&conn).unwrap(), 1);

    insert_history(&conn, "Buồn", false, 900).unwrap();
    assert_eq!(count_all(&conn).unwrap(), 2);
    assert_eq!(count_correct(&conn).unwrap(), 1);
  }

  #[test]
  fn test_ids_strictly_increase_even_after_delete() {
    let conn = conn();
    let a = insert_history(&conn, "Buồn", true, 1).unwrap();
    let b = insert_history(&conn, "Sợ hãi", true, 1).unwrap();
    assert!(b.id > a.id);

    delete_all_history(&conn).unwrap();
    let c = insert_history(&conn, "Buồn", true, 1).unwrap();
    assert!(c.id > b.id);
  }

  #[test]
  fn test_negative_response_time_clamped() {
    let conn = conn();
    let record = insert_history(&conn, "Buồn", true, -50).unwrap();
    assert_eq!(record.response_time_ms, 0);
    assert_eq!(get_all_history(&conn).unwrap()[0].response_time_ms, 0);
  }

  #[test]
  fn test_history_newest_first() {
    let conn = conn();
    conn
      .execute_batch(
        r#"
        INSERT INTO question_history (timestamp, emotionAsked, isCorrect, timeTaken) VALUES (100, 'Buồn', 1, 5);
        INSERT INTO question_history (timestamp, emotionAsked, isCorrect, timeTaken) VALUES (300, 'Sợ hãi', 0, 5);
        INSERT INTO question_history (timestamp, emotionAsked, isCorrect, timeTaken) VALUES (200, 'Buồn', 0, 5);
        "#,
      )
      .unwrap();

    let timestamps: Vec<i64> = get_all_history(&conn)
      .unwrap()
      .iter()
      .map(|r| r.timestamp)
      .collect();
    assert_eq!(timestamps, vec![300, 200, 100]);

    let sad = get_history_by_emotion(&conn, "Buồn").unwrap();
    assert_eq!(sad.len(), 2);
    assert_eq!(sad[0].timestamp, 200);
    assert!(!sad[0].is_correct);
  }

  #[test]
  fn test_delete_all() {
    let conn = conn();
    insert_history(&conn, "Buồn", true, 1).unwrap();
    insert_history(&conn, "Buồn", false, 1).unwrap();
    assert_eq!(delete_all_history(&conn).unwrap(), 2);
    assert_eq!(count_all(&conn).unwrap(), 0);
    assert!(get_all_history(&conn).unwrap().is_empty());
  }
}
