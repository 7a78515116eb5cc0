use anyhow::{Context, Result};
use std::env;

use crate::auth::types::AuthConfig;

const DEFAULT_PORT: &str = "5000";
const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";
const DEFAULT_POSTS_LIMIT: &str = "5";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Absent means the in-memory counter store is used.
    pub database_url: Option<String>,
    /// Browser origin allowed by CORS (with credentials).
    pub client_url: String,
    pub posts_url: String,
    pub posts_limit: usize,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth = AuthConfig::from_vars(&var)?;

        Ok(Self {
            port: var("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_url: var("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            client_url: var("CLIENT_URL").context("CLIENT_URL must be set")?,
            posts_url: var("POSTS_URL").unwrap_or_else(|| DEFAULT_POSTS_URL.to_string()),
            posts_limit: var("POSTS_LIMIT")
                .unwrap_or_else(|| DEFAULT_POSTS_LIMIT.to_string())
                .parse()
                .context("POSTS_LIMIT must be a valid number")?,
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("GOOGLE_CLIENT_ID", "client-id"),
            ("GOOGLE_CLIENT_SECRET", "client-secret"),
            ("REDIRECT_URL", "http://localhost:3000/auth/callback"),
            ("TOKEN_SECRET", "secret"),
            ("CLIENT_URL", "http://localhost:3000"),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let map = vars(&required());
        let config = AppConfig::from_vars(|k| map.get(k).cloned()).expect("should load");

        assert_eq!(config.port, 5000);
        assert!(config.database_url.is_none());
        assert_eq!(config.posts_url, DEFAULT_POSTS_URL);
        assert_eq!(config.posts_limit, 5);
        assert_eq!(config.auth.token_expiration_secs, 36000);
        assert_eq!(config.auth.cookie_name, "token");
        assert!(!config.auth.secure_cookies);
    }

    #[test]
    fn test_overrides_read() {
        let mut pairs = required();
        pairs.push(("PORT", "8080"));
        pairs.push(("DATABASE_URL", "postgres://localhost/counter_db"));
        pairs.push(("TOKEN_EXPIRATION_SECS", "60"));
        pairs.push(("RUST_ENV", "production"));
        let map = vars(&pairs);
        let config = AppConfig::from_vars(|k| map.get(k).cloned()).expect("should load");

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/counter_db")
        );
        assert_eq!(config.auth.token_expiration_secs, 60);
        assert!(config.auth.secure_cookies);
    }

    #[test]
    fn test_missing_secret_rejected() {
        let pairs: Vec<_> = required()
            .into_iter()
            .filter(|(k, _)| *k != "TOKEN_SECRET")
            .collect();
        let map = vars(&pairs);
        let err = AppConfig::from_vars(|k| map.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("TOKEN_SECRET"));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut pairs = required();
        pairs.push(("PORT", "not-a-port"));
        let map = vars(&pairs);
        assert!(AppConfig::from_vars(|k| map.get(k).cloned()).is_err());
    }
}
