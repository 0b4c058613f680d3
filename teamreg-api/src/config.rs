/// Configuration management for the API server
///
/// Configuration is read from environment variables (with `.env` support
/// for development).
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `COOKIE_SECURE`: Mark identity cookies `Secure` (default: false)
/// - `DOCUMENT_DIR`: Directory uploaded documents are written to (default: ./documents)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use teamreg_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub cookies: CookieConfig,
    pub documents: DocumentConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Identity cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Add the `Secure` attribute (HTTPS deployments)
    pub secure: bool,
}

/// Document storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub dir: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a numeric/boolean
    /// variable does not parse
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let secure = env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .map_err(|_| anyhow::anyhow!("COOKIE_SECURE must be true or false"))?;

        let dir = env::var("DOCUMENT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./documents"));

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            database: DatabaseConfig {
                url,
                max_connections,
            },
            cookies: CookieConfig { secure },
            documents: DocumentConfig { dir },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
