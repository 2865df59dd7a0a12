//! Accuracy statistics over question history

use rusqlite::{Connection, Result};
use serde::Serialize;

/// Percentage of correct answers; 0 when nothing was answered
pub fn accuracy_percent(correct: i64, total: i64) -> f64 {
    if total > 0 {
        correct as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Aggregate correctness for one emotion label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionStat {
    pub emotion_label: String,
    pub total_asked: i64,
    pub total_correct: i64,
}

impl EmotionStat {
    pub fn accuracy_percent(&self) -> f64 {
        accuracy_percent(self.total_correct, self.total_asked)
    }
}

/// One stat per distinct label, ordered by label
pub fn get_stats_by_emotion(conn: &Connection) -> Result<Vec<EmotionStat>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT emotionAsked,
           COUNT(*) AS total,
           SUM(CASE WHEN isCorrect = 1 THEN 1 ELSE 0 END) AS correct
    FROM question_history
    GROUP BY emotionAsked
    ORDER BY emotionAsked
    "#,
    )?;

    let stats = stmt
        .query_map([], |row| {
            Ok(EmotionStat {
                emotion_label: row.get(0)?,
                total_asked: row.get(1)?,
                total_correct: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(stats)
}
