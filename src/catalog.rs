//! Emotion catalog: the fixed registry of emotions, their prompts, and
//! random sampling for quiz options.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::Emotion;
use crate::error::CatalogError;

/// All emotions in catalog order
pub fn list_all() -> &'static [Emotion] {
  &Emotion::ALL
}

/// Draw `n` distinct emotions in random order
pub fn sample_distinct(n: usize) -> Result<Vec<Emotion>, CatalogError> {
  sample_distinct_with(n, &mut rand::rng())
}

/// Same as [`sample_distinct`] with a caller-supplied RNG
pub fn sample_distinct_with<R: Rng + ?Sized>(
  n: usize,
  rng: &mut R,
) -> Result<Vec<Emotion>, CatalogError> {
  let size = Emotion::ALL.len();
  if n < 1 || n > size {
    return Err(CatalogError::InvalidArgument(format!(
      "sample size must be between 1 and {}, got {}",
      size, n
    )));
  }

  let mut emotions = Emotion::ALL.to_vec();
  emotions.shuffle(rng);
  emotions.truncate(n);
  Ok(emotions)
}

pub fn prompt_for(emotion: Emotion) -> &'static str {
  emotion.image_prompt()
}

/// Translate a persisted display name back into an emotion
pub fn lookup_by_display_name(name: &str) -> Result<Emotion, CatalogError> {
  Emotion::ALL
    .into_iter()
    .find(|e| e.display_name() == name)
    .ok_or_else(|| CatalogError::NotFound(name.to_string()))
}

/// Look up by identifier, case-insensitive
pub fn lookup_by_id(id: &str) -> Result<Emotion, CatalogError> {
  Emotion::from_str(id).ok_or_else(|| CatalogError::NotFound(id.to_string()))
}
