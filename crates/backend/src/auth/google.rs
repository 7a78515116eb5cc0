//! Google OAuth client: consent URL, code exchange and ID token verification.

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{AuthConfig, SessionUser};

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];
const SCOPES: &str = "openid profile email";
const STATE: &str = "standard_oauth";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Token endpoint rejected the code: {0}")]
    Rejected(String),

    #[error("Token response did not include an id_token")]
    MissingIdToken,

    #[error("Invalid id_token: {0}")]
    InvalidIdToken(#[from] jsonwebtoken::errors::Error),

    #[error("No signing key matches id_token kid {0:?}")]
    UnknownKey(Option<String>),

    #[error("Email {0} is not verified by the provider")]
    UnverifiedEmail(String),

    #[error("Identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The OAuth provider seen by the auth handlers.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to for consent.
    fn consent_url(&self) -> String;

    /// Exchange an authorization code for the verified identity it belongs to.
    async fn exchange_code(&self, code: &str) -> Result<SessionUser, ProviderError>;
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleIdClaims {
    email: String,
    email_verified: Option<bool>,
    name: Option<String>,
    picture: Option<String>,
}

impl From<GoogleIdClaims> for SessionUser {
    fn from(claims: GoogleIdClaims) -> Self {
        SessionUser {
            name: claims.name,
            email: claims.email,
            picture: claims.picture,
        }
    }
}

pub struct GoogleProvider {
    client_id: String,
    client_secret: String,
    redirect_url: String,
    token_url: String,
    jwks_url: String,
    http: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(config: &AuthConfig, http: reqwest::Client) -> Self {
        Self {
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_url: config.redirect_url.clone(),
            token_url: TOKEN_URL.to_string(),
            jwks_url: JWKS_URL.to_string(),
            http,
        }
    }

    /// Point the token and key endpoints somewhere other than Google.
    pub fn with_endpoints(mut self, token_url: impl Into<String>, jwks_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self.jwks_url = jwks_url.into();
        self
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, ProviderError> {
        let jwks = self
            .http
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(jwks)
    }

    /// Check signature, audience, issuer and expiry before trusting any claim.
    fn verify_id_token(&self, id_token: &str, jwks: &JwkSet) -> Result<SessionUser, ProviderError> {
        let header = decode_header(id_token)?;
        let jwk = header
            .kid
            .as_deref()
            .and_then(|kid| jwks.find(kid))
            .ok_or_else(|| ProviderError::UnknownKey(header.kid.clone()))?;

        let key = DecodingKey::from_jwk(jwk)?;
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(&ISSUERS);

        let claims = decode::<GoogleIdClaims>(id_token, &key, &validation)?.claims;
        if claims.email_verified == Some(false) {
            return Err(ProviderError::UnverifiedEmail(claims.email));
        }
        Ok(claims.into())
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn consent_url(&self) -> String {
        format!(
            "{}?\
             client_id={}&\
             redirect_uri={}&\
             response_type=code&\
             scope={}&\
             access_type=offline&\
             state={}&\
             prompt=consent",
            AUTH_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_url),
            urlencoding::encode(SCOPES),
            STATE
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<SessionUser, ProviderError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&TokenRequest {
                code,
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                redirect_uri: &self.redirect_url,
                grant_type: "authorization_code",
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Token exchange failed: {} - {}", status, body);
            return Err(ProviderError::Rejected(status.to_string()));
        }

        let tokens: GoogleTokenResponse = response.json().await?;
        let id_token = tokens.id_token.ok_or(ProviderError::MissingIdToken)?;

        let jwks = self.fetch_jwks().await?;
        self.verify_id_token(&id_token, &jwks)
    }
}
