//! Request and response bodies for the supported generation APIs

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::GenerationError;

/// First usable image of a generation response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedImage {
  Url(String),
  Inline { data: String, mime_type: Option<String> },
}

// ==================== Gemini / Imagen ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiImageRequest<'a> {
  pub prompt: &'a str,
  pub aspect_ratio: &'a str,
}

impl<'a> GeminiImageRequest<'a> {
  pub fn new(prompt: &'a str) -> Self {
    Self {
      prompt,
      aspect_ratio: config::GEMINI_ASPECT_RATIO,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct GeminiImageResponse {
  #[serde(default)]
  pub images: Option<Vec<GeminiImageResult>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiImageResult {
  #[serde(default)]
  pub image_bytes: Option<String>,
  #[serde(default)]
  pub mime_type: Option<String>,
  #[serde(default)]
  pub url: Option<String>,
}

impl GeminiImageResponse {
  pub fn into_first_image(self) -> Result<GeneratedImage, GenerationError> {
    let first = self
      .images
      .and_then(|images| images.into_iter().next())
      .ok_or(GenerationError::EmptyResult)?;
    pick(first.url, first.image_bytes, first.mime_type)
  }
}

// ==================== OpenAI / DALL-E ====================

#[derive(Debug, Serialize)]
pub struct OpenAiImageRequest<'a> {
  pub model: &'a str,
  pub prompt: &'a str,
  pub n: u32,
  pub size: &'a str,
  pub quality: &'a str,
  pub response_format: &'a str,
}

impl<'a> OpenAiImageRequest<'a> {
  pub fn new(model: &'a str, prompt: &'a str) -> Self {
    Self {
      model,
      prompt,
      n: 1,
      size: config::OPENAI_SIZE,
      quality: config::OPENAI_QUALITY,
      response_format: "url",
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct OpenAiImageResponse {
  #[serde(default)]
  pub created: Option<i64>,
  #[serde(default)]
  pub data: Vec<OpenAiImageData>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiImageData {
  #[serde(default)]
  pub url: Option<String>,
  #[serde(default)]
  pub b64_json: Option<String>,
}

impl OpenAiImageResponse {
  pub fn into_first_image(self) -> Result<GeneratedImage, GenerationError> {
    let first = self
      .data
      .into_iter()
      .next()
      .ok_or(GenerationError::EmptyResult)?;
    pick(first.url, first.b64_json, Some("image/png".to_string()))
  }
}

fn pick(
  url: Option<String>,
  data: Option<String>,
  mime_type: Option<String>,
) -> Result<GeneratedImage, GenerationError> {
  if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
    return Ok(GeneratedImage::Url(url));
  }
  match data.filter(|d| !d.trim().is_empty()) {
    Some(data) => Ok(GeneratedImage::Inline { data, mime_type }),
    None => Err(GenerationError::Decode(
      "image entry has neither url nor data".into(),
    )),
  }
}
