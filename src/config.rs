//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; handlers only ever see the
//! already-populated `Config` inside `AppState`.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL for CORS and the sign-in redirect
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Identity provider REST endpoint
    pub identity_api_url: String,
    /// Question generation REST endpoint
    pub generation_api_url: String,
    /// Generation model name
    pub generation_model: String,
    /// Server port
    pub port: u16,

    // --- Secrets ---
    /// Identity provider API key
    pub identity_api_key: String,
    /// Question generation API key
    pub generation_api_key: String,
    /// Signing key for session credentials (raw bytes)
    pub session_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            identity_api_url: env::var("IDENTITY_API_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com".to_string()),
            generation_api_url: env::var("GENERATION_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            generation_model: env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash-001".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            identity_api_key: env::var("IDENTITY_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("IDENTITY_API_KEY"))?,
            generation_api_key: env::var("GENERATION_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GENERATION_API_KEY"))?,
            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Whether session cookies should carry the `Secure` attribute.
    ///
    /// Derived from the frontend URL scheme so local development over
    /// plain http keeps working without a separate knob.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            identity_api_url: "http://127.0.0.1:9".to_string(),
            generation_api_url: "http://127.0.0.1:9".to_string(),
            generation_model: "test-model".to_string(),
            port: 8080,
            identity_api_key: "test_identity_key".to_string(),
            generation_api_key: "test_generation_key".to_string(),
            session_signing_key: b"test_session_key_32_bytes_long!!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("IDENTITY_API_KEY", "test_identity");
        env::set_var("GENERATION_API_KEY", "test_generation");
        env::set_var("SESSION_SIGNING_KEY", "test_session_key_32_bytes_long!!");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.identity_api_key, "test_identity");
        assert_eq!(config.generation_api_key, "test_generation");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_secure_cookies_follows_frontend_scheme() {
        let mut config = Config::test_default();
        assert!(!config.secure_cookies());

        config.frontend_url = "https://prepdeck.example.com".to_string();
        assert!(config.secure_cookies());
    }
}
