//! Image generation with placeholder fallback.
//!
//! [`ImageGenerationClient::request_image`] makes exactly one attempt against
//! the configured backend and reports what went wrong as a
//! [`GenerationError`]. [`ImageGenerationClient::generate_image_for`] is the
//! caller-facing entry point: it substitutes the placeholder for every
//! generation failure, so the only error it can return is
//! [`QuizError::Unrecoverable`].

pub mod cache;
pub mod placeholder;
pub mod wire;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::catalog;
use crate::config::{Backend, GenerationConfig, PlaceholderConfig};
use crate::domain::{Emotion, ImageRef};
use crate::error::{GenerationError, QuizError};
use wire::{
  GeminiImageRequest, GeminiImageResponse, GeneratedImage, OpenAiImageRequest, OpenAiImageResponse,
};

pub use placeholder::placeholder_image;

#[derive(Clone)]
pub struct ImageGenerationClient {
  client: Client,
  config: GenerationConfig,
  placeholder: PlaceholderConfig,
}

impl ImageGenerationClient {
  pub fn new(config: GenerationConfig, placeholder: PlaceholderConfig) -> reqwest::Result<Self> {
    let client = Client::builder()
      .connect_timeout(config.connect_timeout)
      .read_timeout(config.read_timeout)
      .timeout(config.request_timeout)
      .build()?;

    Ok(Self {
      client,
      config,
      placeholder,
    })
  }

  pub fn has_credential(&self) -> bool {
    self.config.credential().is_some()
  }

  /// Image for `emotion`, falling back to the placeholder on any failure
  pub async fn generate_image_for(&self, emotion: Emotion) -> Result<ImageRef, QuizError> {
    match self.request_image(emotion).await {
      Ok(image) => {
        tracing::info!(emotion = %emotion, image = %image, "Generated image");
        Ok(image)
      }
      Err(GenerationError::CredentialMissing) => {
        tracing::info!(
          "API key not configured, using placeholder image for {}",
          emotion.display_name()
        );
        self.placeholder_for(emotion)
      }
      Err(err) => {
        tracing::warn!(
          emotion = %emotion,
          kind = err.kind(),
          "Image generation failed, falling back to placeholder: {}",
          err
        );
        self.placeholder_for(emotion)
      }
    }
  }

  pub fn placeholder_for(&self, emotion: Emotion) -> Result<ImageRef, QuizError> {
    placeholder_image(&self.placeholder, emotion)
  }

  /// One request to the remote service, no fallback
  pub async fn request_image(&self, emotion: Emotion) -> Result<ImageRef, GenerationError> {
    let api_key = self
      .config
      .credential()
      .ok_or(GenerationError::CredentialMissing)?;
    let prompt = catalog::prompt_for(emotion);
    tracing::debug!(emotion = %emotion, backend = ?self.config.backend, "Requesting image");

    let image = match self.config.backend {
      Backend::Gemini => self.call_gemini(api_key, prompt).await?,
      Backend::OpenAi => self.call_openai(api_key, prompt).await?,
    };

    match image {
      GeneratedImage::Url(url) => Ok(ImageRef::Remote(url)),
      GeneratedImage::Inline { data, mime_type } => {
        let path =
          cache::save_base64_image(&self.config.cache_dir, emotion, &data, mime_type.as_deref())
            .await?;
        Ok(ImageRef::Local(path))
      }
    }
  }

  async fn call_gemini(&self, api_key: &str, prompt: &str) -> Result<GeneratedImage, GenerationError> {
    let url = format!(
      "{}/v1beta/models/{}:generateImage",
      self.config.base_url.trim_end_matches('/'),
      self.config.model
    );
    let key = HeaderValue::from_str(api_key)
      .map_err(|_| GenerationError::InvalidCredential)?;

    let request = self
      .client
      .post(url)
      .header("x-goog-api-key", key)
      .json(&GeminiImageRequest::new(prompt));

    let response: GeminiImageResponse = send_json(request).await?;
    response.into_first_image()
  }

  async fn call_openai(&self, api_key: &str, prompt: &str) -> Result<GeneratedImage, GenerationError> {
    let url = format!(
      "{}/v1/images/generations",
      self.config.base_url.trim_end_matches('/')
    );
    let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
      .map_err(|_| GenerationError::InvalidCredential)?;

    let request = self
      .client
      .post(url)
      .header(AUTHORIZATION, bearer)
      .json(&OpenAiImageRequest::new(&self.config.model, prompt));

    let response: OpenAiImageResponse = send_json(request).await?;
    response.into_first_image()
  }
}

async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, GenerationError> {
  let response = request
    .send()
    .await
    .map_err(|err| GenerationError::Network(err.to_string()))?;

  let status = response.status();
  if !status.is_success() {
    let body = response.text().await.unwrap_or_default();
    tracing::debug!("Generation service error body: {}", truncate(&body, 500));
    return Err(GenerationError::Remote {
      status: status.as_u16(),
    });
  }

  let bytes = response.bytes().await?;
  serde_json::from_slice(&bytes)
    .map_err(|err| GenerationError::Decode(format!("unexpected response body: {err}")))
}

fn truncate(s: &str, max: usize) -> &str {
  match s.char_indices().nth(max) {
    Some((idx, _)) => &s[..idx],
    None => s,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  fn offline_client() -> ImageGenerationClient {
    ImageGenerationClient::new(
      GenerationConfig::without_credential(PathBuf::from("unused-cache")),
      PlaceholderConfig::default(),
    )
    .unwrap()
  }

  #[tokio::test]
  async fn test_request_without_key_is_credential_missing() {
    let client = offline_client();
    assert!(!client.has_credential());
    let err = client.request_image(Emotion::Fear).await.unwrap_err();
    assert!(matches!(err, GenerationError::CredentialMissing));
  }

  #[tokio::test]
  async fn test_malformed_key_is_invalid_credential() {
    for backend in [Backend::Gemini, Backend::OpenAi] {
      let mut config = GenerationConfig::without_credential(PathBuf::from("unused-cache"));
      config.backend = backend;
      config.api_key = Some("abc\ndef".into());
      let client = ImageGenerationClient::new(config, PlaceholderConfig::default()).unwrap();
      assert!(client.has_credential());

      let err = client.request_image(Emotion::Fear).await.unwrap_err();
      assert!(matches!(err, GenerationError::InvalidCredential));
      assert_eq!(err.kind(), "invalid_credential");
      assert_eq!(
        client.generate_image_for(Emotion::Fear).await.unwrap(),
        ImageRef::Remote("https://api.dicebear.com/7.x/adventurer/png?seed=fear&size=512".into())
      );
    }
  }

  #[tokio::test]
  async fn test_no_key_falls_back_to_placeholder() {
    let client = offline_client();
    let image = client.generate_image_for(Emotion::Sadness).await.unwrap();
    assert_eq!(
      image,
      ImageRef::Remote("https://api.dicebear.com/7.x/adventurer/png?seed=sadness&size=512".into())
    );
  }

  #[tokio::test]
  async fn test_placeholder_seed_is_stable() {
    let client = offline_client();
    let a = client.generate_image_for(Emotion::Love).await.unwrap();
    let b = client.generate_image_for(Emotion::Love).await.unwrap();
    assert_eq!(a, b);
  }

  #[tokio::test]
  async fn test_broken_placeholder_config_is_unrecoverable() {
    let client = ImageGenerationClient::new(
      GenerationConfig::without_credential(PathBuf::from("unused-cache")),
      PlaceholderConfig {
        base_url: "::::".into(),
        ..PlaceholderConfig::default()
      },
    )
    .unwrap();
    assert!(matches!(
      client.generate_image_for(Emotion::Love).await,
      Err(QuizError::Unrecoverable(_))
    ));
  }

  #[test]
  fn test_truncate_respects_char_boundaries() {
    assert_eq!(truncate("Hạnh phúc", 3), "Hạn");
    assert_eq!(truncate("abc", 10), "abc");
  }
}
