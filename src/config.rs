//! Application configuration.
//!
//! Values are resolved with priority: config.toml > environment (.env) > default.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;

// ==================== Generation Defaults ====================

/// Literal left in sample configs; treated as "no key"
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "imagen-3.0-fast-generate-001";
pub const GEMINI_ASPECT_RATIO: &str = "1:1";

pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const OPENAI_MODEL: &str = "dall-e-3";
pub const OPENAI_SIZE: &str = "1024x1024";
pub const OPENAI_QUALITY: &str = "standard";

/// Connect, read and write budgets, each 30 seconds
pub const CONNECT_TIMEOUT_SECS: u64 = 30;
pub const READ_TIMEOUT_SECS: u64 = 30;
pub const WRITE_TIMEOUT_SECS: u64 = 30;

// ==================== Placeholder Defaults ====================

pub const PLACEHOLDER_BASE_URL: &str = "https://api.dicebear.com/7.x";
pub const PLACEHOLDER_STYLE: &str = "adventurer";
pub const PLACEHOLDER_SIZE: u32 = 512;

// ==================== Quiz Defaults ====================

/// Number of answer options per question
pub const OPTION_COUNT: usize = 3;

// ==================== Server Defaults ====================

pub const SERVER_ADDR: &str = "0.0.0.0";
pub const SERVER_PORT: u16 = 3000;

/// Which remote image-generation API to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Gemini,
    OpenAi,
}

impl Backend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "openai" => Some(Self::OpenAi),
            _ => None,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Gemini => GEMINI_BASE_URL,
            Self::OpenAi => OPENAI_BASE_URL,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => GEMINI_MODEL,
            Self::OpenAi => OPENAI_MODEL,
        }
    }
}

/// Resolved settings for the image-generation client
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub backend: Backend,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Upper bound for the whole request, upload included
    pub request_timeout: Duration,
    pub cache_dir: PathBuf,
}

impl GenerationConfig {
    /// Config with no API key; every request falls back to the placeholder
    pub fn without_credential(cache_dir: PathBuf) -> Self {
        let backend = Backend::default();
        Self {
            backend,
            api_key: None,
            base_url: backend.default_base_url().to_string(),
            model: backend.default_model().to_string(),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(READ_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(
                CONNECT_TIMEOUT_SECS + READ_TIMEOUT_SECS + WRITE_TIMEOUT_SECS,
            ),
            cache_dir,
        }
    }

    /// The configured key, unless missing, blank, or the sample placeholder
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != API_KEY_PLACEHOLDER)
    }
}

#[derive(Debug, Clone)]
pub struct PlaceholderConfig {
    pub base_url: String,
    pub style: String,
    pub size: u32,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            base_url: PLACEHOLDER_BASE_URL.to_string(),
            style: PLACEHOLDER_STYLE.to_string(),
            size: PLACEHOLDER_SIZE,
        }
    }
}

/// Everything the process needs at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: PathBuf,
    pub generation: GenerationConfig,
    pub placeholder: PlaceholderConfig,
    pub server_addr: String,
    pub server_port: u16,
}

impl Settings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.server_port)
    }
}

// ==================== config.toml ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database: Option<DatabaseSection>,
    generation: Option<GenerationSection>,
    placeholder: Option<PlaceholderSection>,
    server: Option<ServerSection>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerationSection {
    backend: Option<Backend>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    cache_dir: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PlaceholderSection {
    base_url: Option<String>,
    style: Option<String>,
    size: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    addr: Option<String>,
    port: Option<u16>,
}

/// Load settings from ./config.toml and the environment
pub fn load() -> Settings {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let file = match std::fs::read_to_string("config.toml") {
        Ok(contents) => match toml::from_str::<FileConfig>(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config.toml");
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring malformed config.toml: {}", e);
                FileConfig::default()
            }
        },
        Err(_) => FileConfig::default(),
    };

    resolve(file, |key| std::env::var(key).ok())
}

/// Parse a config.toml body, falling back to the environment for unset keys
pub fn from_toml_str(contents: &str) -> Result<Settings, toml::de::Error> {
    let file = toml::from_str::<FileConfig>(contents)?;
    Ok(resolve(file, |key| std::env::var(key).ok()))
}

fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Settings {
    let database_path = file
        .database
        .and_then(|db| db.path)
        .or_else(|| env("DATABASE_PATH"))
        .map(PathBuf::from)
        .unwrap_or_else(paths::db_path);

    let generation_section = file.generation;
    let backend = generation_section
        .as_ref()
        .and_then(|g| g.backend)
        .or_else(|| env("IMAGE_BACKEND").and_then(|b| Backend::from_str(&b)))
        .unwrap_or_default();

    let mut generation = GenerationConfig::without_credential(paths::image_cache_dir());
    generation.backend = backend;
    generation.base_url = backend.default_base_url().to_string();
    generation.model = backend.default_model().to_string();
    generation.api_key = env("IMAGE_API_KEY");

    if let Some(section) = generation_section {
        if let Some(key) = section.api_key {
            generation.api_key = Some(key);
        }
        if let Some(url) = section.base_url {
            generation.base_url = url;
        }
        if let Some(model) = section.model {
            generation.model = model;
        }
        if let Some(dir) = section.cache_dir {
            generation.cache_dir = PathBuf::from(dir);
        }
        if let Some(secs) = section.timeout_secs {
            generation.request_timeout = Duration::from_secs(secs);
        }
    }

    let mut placeholder = PlaceholderConfig::default();
    if let Some(section) = file.placeholder {
        if let Some(url) = section.base_url {
            placeholder.base_url = url;
        }
        if let Some(style) = section.style {
            placeholder.style = style;
        }
        if let Some(size) = section.size {
            placeholder.size = size;
        }
    }

    let server_addr = file
        .server
        .as_ref()
        .and_then(|s| s.addr.clone())
        .unwrap_or_else(|| SERVER_ADDR.to_string());
    let server_port = file
        .server
        .and_then(|s| s.port)
        .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
        .unwrap_or(SERVER_PORT);

    Settings {
        database_path,
        generation,
        placeholder,
        server_addr,
        server_port,
    }
}
