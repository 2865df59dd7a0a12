use serde::Serialize;
use std::path::PathBuf;

use super::Emotion;

/// Where a displayable image lives: a remote URL or a file in the image cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ImageRef {
  Remote(String),
  Local(PathBuf),
}

impl ImageRef {
  pub fn is_local(&self) -> bool {
    matches!(self, Self::Local(_))
  }

  pub fn as_string(&self) -> String {
    match self {
      Self::Remote(url) => url.clone(),
      Self::Local(path) => path.display().to_string(),
    }
  }
}

impl From<ImageRef> for String {
  fn from(image: ImageRef) -> Self {
    image.as_string()
  }
}

impl std::fmt::Display for ImageRef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.as_string())
  }
}

/// One quiz round: an image of `correct_emotion` and three labels to pick from
#[derive(Debug, Clone, Serialize)]
pub struct Question {
  pub correct_emotion: Emotion,
  pub image: ImageRef,
  /// Always three distinct emotions, one of them `correct_emotion`
  pub options: Vec<Emotion>,
}

impl Question {
  pub fn new(correct_emotion: Emotion, image: ImageRef, options: Vec<Emotion>) -> Self {
    debug_assert!(options.contains(&correct_emotion));
    Self {
      correct_emotion,
      image,
      options,
    }
  }

  pub fn is_correct_answer(&self, selected: Emotion) -> bool {
    selected == self.correct_emotion
  }

  pub fn has_option(&self, emotion: Emotion) -> bool {
    self.options.contains(&emotion)
  }
}
