//! Auth-related types and configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// Re-export shared types for convenience
pub use counter_types::{AuthUrlResponse, LoggedInResponse, SessionUser, TokenResponse};

const DEFAULT_TOKEN_EXPIRATION_SECS: i64 = 36000;

/// Session JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: SessionUser,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Auth configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token_secret: String,
    pub token_expiration_secs: i64,
    pub cookie_name: String,
    pub secure_cookies: bool,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub redirect_url: String,
}

impl AuthConfig {
    /// Load auth configuration from a variable source.
    ///
    /// Required vars:
    /// - `TOKEN_SECRET`: Secret key for signing session tokens
    /// - `GOOGLE_CLIENT_ID`: Google OAuth client ID
    /// - `GOOGLE_CLIENT_SECRET`: Google OAuth client secret
    /// - `REDIRECT_URL`: OAuth redirect URI registered with Google
    ///
    /// Optional: `TOKEN_EXPIRATION_SECS`, `RUST_ENV` (`production` marks cookies `Secure`).
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_expiration_secs = match var("TOKEN_EXPIRATION_SECS") {
            Some(raw) => raw
                .parse()
                .context("TOKEN_EXPIRATION_SECS must be a valid number")?,
            None => DEFAULT_TOKEN_EXPIRATION_SECS,
        };

        Ok(Self {
            token_secret: var("TOKEN_SECRET").context("TOKEN_SECRET must be set")?,
            token_expiration_secs,
            cookie_name: "token".to_string(),
            secure_cookies: var("RUST_ENV").as_deref() == Some("production"),
            google_client_id: var("GOOGLE_CLIENT_ID").context("GOOGLE_CLIENT_ID must be set")?,
            google_client_secret: var("GOOGLE_CLIENT_SECRET")
                .context("GOOGLE_CLIENT_SECRET must be set")?,
            redirect_url: var("REDIRECT_URL").context("REDIRECT_URL must be set")?,
        })
    }
}
