/// Configuration management for the API server
///
/// Configuration is loaded from environment variables once at process
/// start into an immutable `Config`. The token signing secret is required
/// configuration; it is never embedded as a source literal.
///
/// # Environment Variables
///
/// - `GATEHOUSE_HOST`: Host to bind to (default: 0.0.0.0)
/// - `GATEHOUSE_PORT`: Port to bind to (default: 3000)
/// - `GATEHOUSE_JWT_SECRET`: Secret key for token signing (required, >= 32 bytes)
/// - `GATEHOUSE_CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `APP_ENV`: "production" enables HSTS on responses
/// - `RUST_LOG`: Log filter (default: info)
///
/// # Example
///
/// ```no_run
/// use gatehouse_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Listening on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins ("*" means permissive)
    pub cors_origins: Vec<String>,

    /// Whether the server runs behind HTTPS in production
    pub production: bool,
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for HS256 signing
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub secret: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `GATEHOUSE_JWT_SECRET` is missing or shorter
    /// than 32 bytes, or if numeric variables fail to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("GATEHOUSE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("GATEHOUSE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()?;

        let cors_origins = env::var("GATEHOUSE_CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let production = env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let secret = env::var("GATEHOUSE_JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("GATEHOUSE_JWT_SECRET environment variable is required"))?;

        if secret.len() < 32 {
            anyhow::bail!("GATEHOUSE_JWT_SECRET must be at least 32 characters long");
        }

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            jwt: JwtConfig { secret },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
