use rand::seq::IndexedRandom;

use crate::catalog;
use crate::config::OPTION_COUNT;
use crate::domain::Question;
use crate::error::QuizError;
use crate::generation::ImageGenerationClient;

/// Builds quiz questions: three random options, one of them pictured
#[derive(Clone)]
pub struct QuestionFactory {
  images: ImageGenerationClient,
}

impl QuestionFactory {
  pub fn new(images: ImageGenerationClient) -> Self {
    Self { images }
  }

  /// Sample options, pick the answer, then wait for its image
  pub async fn next_question(&self) -> Result<Question, QuizError> {
    let options = catalog::sample_distinct(OPTION_COUNT)?;
    let correct = *options
      .choose(&mut rand::rng())
      .ok_or_else(|| QuizError::Unrecoverable("no options sampled".into()))?;

    let image = self.images.generate_image_for(correct).await?;
    Ok(Question::new(correct, image, options))
  }
}
