//! Decoded images written to the private cache directory.
//!
//! Nothing here evicts old files; the directory grows with every inline
//! image the service returns.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::domain::Emotion;
use crate::error::GenerationError;

/// File extension for a MIME type, png when unknown
pub fn extension_for(mime_type: Option<&str>) -> &'static str {
  match mime_type.map(|m| m.trim().to_ascii_lowercase()).as_deref() {
    Some("image/jpeg") | Some("image/jpg") => "jpg",
    Some("image/webp") => "webp",
    Some("image/gif") => "gif",
    _ => "png",
  }
}

/// `emotion_{ID}_{millis}_{digest8}`, without extension
fn base_name(emotion: Emotion, bytes: &[u8]) -> String {
  let digest = hex::encode(Sha256::digest(bytes));
  format!(
    "emotion_{}_{}_{}",
    emotion.as_str(),
    Utc::now().timestamp_millis(),
    &digest[..8]
  )
}

/// Decode a base64 payload and write it to a fresh file under `dir`
pub async fn save_base64_image(
  dir: &Path,
  emotion: Emotion,
  data: &str,
  mime_type: Option<&str>,
) -> Result<PathBuf, GenerationError> {
  let bytes = BASE64_STANDARD
    .decode(data.trim())
    .map_err(|e| GenerationError::Decode(format!("invalid base64 image: {e}")))?;
  if bytes.is_empty() {
    return Err(GenerationError::Decode("image payload is empty".into()));
  }

  tokio::fs::create_dir_all(dir)
    .await
    .map_err(|e| GenerationError::CacheIo(format!("cannot create cache dir {}: {e}", dir.display())))?;

  let base = base_name(emotion, &bytes);
  let ext = extension_for(mime_type);

  // create_new never clobbers; a taken name gets a numeric suffix
  let mut attempt = 0u32;
  loop {
    let file_name = if attempt == 0 {
      format!("{base}.{ext}")
    } else {
      format!("{base}_{attempt}.{ext}")
    };
    let path = dir.join(file_name);

    match tokio::fs::OpenOptions::new()
      .write(true)
      .create_new(true)
      .open(&path)
      .await
    {
      Ok(mut file) => {
        file
          .write_all(&bytes)
          .await
          .map_err(|e| GenerationError::CacheIo(format!("cannot write {}: {e}", path.display())))?;
        file
          .flush()
          .await
          .map_err(|e| GenerationError::CacheIo(format!("cannot write {}: {e}", path.display())))?;
        return Ok(path);
      }
      Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
      Err(e) => {
        return Err(GenerationError::CacheIo(format!(
          "cannot create {}: {e}",
          path.display()
        )));
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;
  use tempfile::TempDir;

  const HELLO_B64: &str = "aGVsbG8gaW1hZ2U="; // "hello image"

  #[test]
  fn test_extension_for() {
    assert_eq!(extension_for(Some("image/png")), "png");
    assert_eq!(extension_for(Some("IMAGE/JPEG")), "jpg");
    assert_eq!(extension_for(Some("image/webp")), "webp");
    assert_eq!(extension_for(None), "png");
    assert_eq!(extension_for(Some("application/octet-stream")), "png");
  }

  #[tokio::test]
  async fn test_save_writes_decoded_bytes() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("images");

    let path = save_base64_image(&dir, Emotion::Love, HELLO_B64, Some("image/png"))
      .await
      .unwrap();

    assert!(path.starts_with(&dir));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("emotion_LOVE_"));
    assert!(name.ends_with(".png"));
    assert_eq!(std::fs::read(&path).unwrap(), b"hello image");
  }

  #[tokio::test]
  async fn test_rapid_saves_never_collide() {
    let temp = TempDir::new().unwrap();
    let mut paths = HashSet::new();
    for _ in 0..20 {
      let path = save_base64_image(temp.path(), Emotion::Fear, HELLO_B64, None)
        .await
        .unwrap();
      assert!(paths.insert(path));
    }
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 20);
  }

  #[tokio::test]
  async fn test_invalid_base64_is_decode_error() {
    let temp = TempDir::new().unwrap();
    let result = save_base64_image(temp.path(), Emotion::Fear, "%%% not base64 %%%", None).await;
    assert!(matches!(result, Err(GenerationError::Decode(_))));
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
  }

  #[tokio::test]
  async fn test_cache_dir_blocked_by_file_is_cache_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("images");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let result = save_base64_image(&blocker, Emotion::Fear, HELLO_B64, None).await;
    let err = result.unwrap_err();
    assert!(matches!(err, GenerationError::CacheIo(_)));
    assert_eq!(err.kind(), "cache_io");
  }
}
