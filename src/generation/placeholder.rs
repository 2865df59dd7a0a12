//! Deterministic placeholder images from a seeded avatar service

use reqwest::Url;

use crate::config::PlaceholderConfig;
use crate::domain::{Emotion, ImageRef};
use crate::error::QuizError;

/// Placeholder URL for an emotion, keyed by its lowercase identifier.
///
/// Fails only when the configured base URL does not form a valid URL.
pub fn placeholder_image(config: &PlaceholderConfig, emotion: Emotion) -> Result<ImageRef, QuizError> {
  let raw = format!(
    "{}/{}/png?seed={}&size={}",
    config.base_url.trim_end_matches('/'),
    urlencoding::encode(&config.style),
    urlencoding::encode(&emotion.placeholder_seed()),
    config.size
  );

  let url = Url::parse(&raw)
    .map_err(|e| QuizError::Unrecoverable(format!("invalid placeholder URL '{}': {}", raw, e)))?;
  if !matches!(url.scheme(), "http" | "https") {
    return Err(QuizError::Unrecoverable(format!(
      "placeholder URL must be http(s), got '{}'",
      raw
    )));
  }

  Ok(ImageRef::Remote(url.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_placeholder_url() {
    let image = placeholder_image(&PlaceholderConfig::default(), Emotion::Happiness).unwrap();
    assert_eq!(
      image,
      ImageRef::Remote("https://api.dicebear.com/7.x/adventurer/png?seed=happiness&size=512".into())
    );
  }

  #[test]
  fn test_same_emotion_same_seed() {
    let config = PlaceholderConfig::default();
    let a = placeholder_image(&config, Emotion::Contempt).unwrap();
    let b = placeholder_image(&config, Emotion::Contempt).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, placeholder_image(&config, Emotion::Trust).unwrap());
  }

  #[test]
  fn test_invalid_base_url_is_unrecoverable() {
    let config = PlaceholderConfig {
      base_url: "not a url".into(),
      ..PlaceholderConfig::default()
    };
    assert!(matches!(
      placeholder_image(&config, Emotion::Fear),
      Err(QuizError::Unrecoverable(_))
    ));

    let config = PlaceholderConfig {
      base_url: "ftp://avatars.example".into(),
      ..PlaceholderConfig::default()
    };
    assert!(placeholder_image(&config, Emotion::Fear).is_err());
  }
}
