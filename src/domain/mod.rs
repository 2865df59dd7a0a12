pub mod emotion;
pub mod history;
pub mod question;

pub use emotion::Emotion;
pub use history::HistoryRecord;
pub use question::{ImageRef, Question};
