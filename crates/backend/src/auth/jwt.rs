//! Session token creation and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::types::{AuthConfig, Claims, SessionUser};

/// Sign a new session token for a user, expiring after the configured lifetime.
pub fn create_token(
    config: &AuthConfig,
    user: &SessionUser,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::seconds(config.token_expiration_secs);

    let claims = Claims {
        user: user.clone(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.token_secret.as_bytes()),
    )
}

/// Validate a session token and return its claims.
///
/// Expiry is checked with zero leeway.
pub fn validate_token(
    config: &AuthConfig,
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.token_secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_config() -> AuthConfig {
        AuthConfig {
            token_secret: "test-secret-key-for-testing-only".to_string(),
            token_expiration_secs: 36000,
            cookie_name: "token".to_string(),
            secure_cookies: false,
            google_client_id: "test-client".to_string(),
            google_client_secret: "test-secret".to_string(),
            redirect_url: "http://localhost:3000/auth/callback".to_string(),
        }
    }

    pub(crate) fn test_user() -> SessionUser {
        SessionUser {
            name: Some("Test User".to_string()),
            email: "test@example.com".to_string(),
            picture: Some("https://example.com/avatar.png".to_string()),
        }
    }

    /// Sign claims that expired an hour ago.
    pub(crate) fn expired_token(config: &AuthConfig) -> String {
        let now = Utc::now();
        let claims = Claims {
            user: test_user(),
            iat: (now - Duration::hours(11)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.token_secret.as_bytes()),
        )
        .expect("should encode")
    }

    #[test]
    fn test_create_and_validate_token() {
        let config = test_config();
        let token = create_token(&config, &test_user()).expect("should create token");

        let claims = validate_token(&config, &token).expect("should validate token");
        assert_eq!(claims.user, test_user());
        assert_eq!(claims.exp - claims.iat, config.token_expiration_secs);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let config = test_config();
        let result = validate_token(&config, "invalid-token");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = test_config();
        let token = create_token(&config, &test_user()).expect("should create token");

        let mut wrong_config = config;
        wrong_config.token_secret = "wrong-secret".to_string();

        let result = validate_token(&wrong_config, &token);
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config();
        let token = expired_token(&config);

        let err = validate_token(&config, &token).unwrap_err();
        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }
}
