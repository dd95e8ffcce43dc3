//! Application configuration loaded from environment variables.
//!
//! Everything here is public client-side configuration (OAuth client IDs
//! are public by design); there are no secrets to cache.

use std::env;
use std::time::Duration;

/// Default post-login destination when the caller supplies none. Fixed
/// rather than configurable: the initiation and completion halves never
/// share memory, so both lean on the same constant.
pub const DEFAULT_REDIRECT: &str = "/profile";

/// Inactivity window after which the user is considered idle (15 minutes).
pub const IDLE_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the session/user backend
    pub backend_url: String,
    /// Origin of this application, used to build OAuth callback URIs
    pub app_origin: String,
    /// Google OAuth client ID (public)
    pub google_client_id: String,
    /// Facebook OAuth client ID (public)
    pub facebook_client_id: String,
    /// Inactivity window before the idle transition
    pub idle_window: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            app_origin: "http://localhost:3000".to_string(),
            google_client_id: "test_google_client_id".to_string(),
            facebook_client_id: "test_facebook_client_id".to_string(),
            idle_window: IDLE_WINDOW,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            app_origin: env::var("APP_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            facebook_client_id: env::var("FACEBOOK_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("FACEBOOK_CLIENT_ID"))?,
            idle_window: env::var("IDLE_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(IDLE_WINDOW),
        })
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
        env::set_var("GOOGLE_CLIENT_ID", "test_google");
        env::set_var("FACEBOOK_CLIENT_ID", "test_facebook");
        env::set_var("IDLE_WINDOW_SECS", "60");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.google_client_id, "test_google");
        assert_eq!(config.facebook_client_id, "test_facebook");
        assert_eq!(config.idle_window, Duration::from_secs(60));
    }

    #[test]
    fn test_default_config_window() {
        let config = Config::default();
        assert_eq!(config.idle_window, Duration::from_secs(900));
    }
}
