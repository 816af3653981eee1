/// Configuration management for the API server
///
/// Configuration is loaded from environment variables once at startup into a
/// typed struct, then injected through `AppState`. No component reads the
/// environment after startup.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `API_HOST`: host to bind to (default: 0.0.0.0)
/// - `API_PORT`: port to bind to (default: 8080)
/// - `TOKEN_SECRET`: secret for token signing (development default; must be
///   overridden in any real deployment)
/// - `GEMINI_API_KEY`: API key for content generation (optional; without it
///   every draft degrades to placeholder content)
/// - `GEMINI_MODEL`: model name (default: gemini-pro)
/// - `EXPORT_DIR`: directory for exported files (default: exports)
/// - `RUST_LOG`: log filter (default: info)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Development-only signing secret, used when `TOKEN_SECRET` is unset.
const DEV_TOKEN_SECRET: &str = "draftforge-dev-secret-do-not-use-in-production";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Content generation configuration
    pub ai: AiConfig,

    /// Document export configuration
    pub export: ExportConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing
    pub token_secret: String,
}

/// Content generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Gemini API key; None disables real generation (drafts degrade)
    pub api_key: Option<String>,

    /// Model name
    pub model: String,
}

/// Document export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported files are written to
    pub dir: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a numeric variable
    /// fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let token_secret = match env::var("TOKEN_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                tracing::warn!(
                    "TOKEN_SECRET not set, using the development default; \
                     override it in any real deployment"
                );
                DEV_TOKEN_SECRET.to_string()
            }
        };

        let ai_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        if ai_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set; section drafts will degrade to placeholders");
        }

        let ai_model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string());

        let export_dir =
            PathBuf::from(env::var("EXPORT_DIR").unwrap_or_else(|_| "exports".to_string()));

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            auth: AuthConfig { token_secret },
            ai: AiConfig {
                api_key: ai_api_key,
                model: ai_model,
            },
            export: ExportConfig { dir: export_dir },
        })
    }

    /// Returns the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
