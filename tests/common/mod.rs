#![allow(dead_code)]

use axum::{
  extract::State,
  http::{HeaderMap, StatusCode, Uri},
  response::{IntoResponse, Response},
  Json, Router,
};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use emotion_quiz::config::{Backend, GenerationConfig, PlaceholderConfig};
use emotion_quiz::db::{self, HistoryStore};
use emotion_quiz::generation::ImageGenerationClient;
use emotion_quiz::quiz::{QuestionFactory, QuizSession};

pub const TEST_KEY: &str = "test-key-123";

/// What the fake generation service answers with
#[derive(Clone)]
pub enum Reply {
  Json(StatusCode, serde_json::Value),
  Raw(StatusCode, &'static str),
  Stall(Duration),
}

#[derive(Debug, Clone)]
pub struct Captured {
  pub path: String,
  pub headers: HeaderMap,
  pub body: String,
}

pub struct MockService {
  reply: Reply,
  pub requests: Mutex<Vec<Captured>>,
}

impl MockService {
  pub fn requests(&self) -> Vec<Captured> {
    self.requests.lock().unwrap().clone()
  }
}

async fn handle(
  State(mock): State<Arc<MockService>>,
  uri: Uri,
  headers: HeaderMap,
  body: String,
) -> Response {
  mock.requests.lock().unwrap().push(Captured {
    path: uri.path().to_string(),
    headers,
    body,
  });

  match &mock.reply {
    Reply::Json(status, value) => (*status, Json(value.clone())).into_response(),
    Reply::Raw(status, text) => (*status, text.to_string()).into_response(),
    Reply::Stall(duration) => {
      tokio::time::sleep(*duration).await;
      StatusCode::OK.into_response()
    }
  }
}

/// Serve `reply` for every request on a random local port
pub async fn spawn_mock(reply: Reply) -> (String, Arc<MockService>) {
  let mock = Arc::new(MockService {
    reply,
    requests: Mutex::new(Vec::new()),
  });
  let app = Router::new().fallback(handle).with_state(mock.clone());

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });

  (format!("http://{}", addr), mock)
}

pub fn generation_config(backend: Backend, base_url: &str, cache_dir: &Path) -> GenerationConfig {
  let mut config = GenerationConfig::without_credential(cache_dir.to_path_buf());
  config.backend = backend;
  config.api_key = Some(TEST_KEY.to_string());
  config.base_url = base_url.to_string();
  config.model = "test-model".to_string();
  config.request_timeout = Duration::from_secs(5);
  config
}

pub fn client(config: GenerationConfig) -> ImageGenerationClient {
  ImageGenerationClient::new(config, PlaceholderConfig::default()).unwrap()
}

/// Session without an API key, backed by a database under `dir`
pub fn offline_session(dir: &Path) -> QuizSession {
  offline_session_with(dir, PlaceholderConfig::default())
}

pub fn offline_session_with(dir: &Path, placeholder: PlaceholderConfig) -> QuizSession {
  let pool = db::init_db(&dir.join("emotion_quiz.db")).unwrap();
  let store = HistoryStore::new(pool);
  let images = ImageGenerationClient::new(
    GenerationConfig::without_credential(dir.join("cache")),
    placeholder,
  )
  .unwrap();
  QuizSession::new(QuestionFactory::new(images), store)
}

/// Poll until the store holds `expected` records (gives up after ~2s)
pub async fn wait_for_records(store: &HistoryStore, expected: i64) {
  for _ in 0..200 {
    if store.total_count().unwrap_or(0) >= expected {
      return;
    }
    tokio::time::sleep(Duration::from_millis(10)).await;
  }
}
