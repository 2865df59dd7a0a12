use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emotion_quiz::{config, db, generation, handlers, quiz, state};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "emotion_quiz=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = config::load();

  let pool = db::init_db(&settings.database_path).expect("Failed to initialize database");
  tracing::info!("History database at {}", settings.database_path.display());
  let store = db::HistoryStore::new(pool);

  let images = generation::ImageGenerationClient::new(
    settings.generation.clone(),
    settings.placeholder.clone(),
  )
  .expect("Failed to build HTTP client");
  if !images.has_credential() {
    tracing::warn!("No image API key configured, questions will use placeholder images");
  }

  let session = quiz::QuizSession::new(quiz::QuestionFactory::new(images), store);
  let app = handlers::router(state::AppState::new(session));

  let bind_addr = settings.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", settings.server_port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
