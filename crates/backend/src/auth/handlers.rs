//! Authentication HTTP handlers.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use counter_types::MessageResponse;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

use super::{
    build_session_cookie, clear_session_cookie, extract_session_token, jwt,
    types::{AuthUrlResponse, LoggedInResponse, TokenResponse},
};

/// Return the Google consent URL the frontend should redirect the user to.
pub async fn auth_url(State(state): State<AppState>) -> Json<AuthUrlResponse> {
    Json(AuthUrlResponse {
        url: state.identity.consent_url(),
    })
}

#[derive(Debug, Deserialize)]
pub struct TokenParams {
    pub code: Option<String>,
}

/// Exchange an authorization code for a session.
///
/// The identity token returned by Google is verified before its claims are
/// copied into a freshly signed session cookie.
pub async fn auth_token(
    State(state): State<AppState>,
    Query(params): Query<TokenParams>,
) -> ApiResult<Response> {
    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ApiError::auth("Authorization code must be provided"))?;

    let user = state.identity.exchange_code(&code).await?;

    let token = jwt::create_token(&state.auth_config, &user)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))?;
    let cookie = build_session_cookie(&state.auth_config, &token);

    tracing::info!("Successful login for: {}", user.email);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(TokenResponse { user }),
    )
        .into_response())
}

/// Report whether the caller holds a valid session, renewing it if so.
///
/// Any verification failure degrades to `{ loggedIn: false }`.
pub async fn logged_in(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let config = &state.auth_config;

    let Some(token) = extract_session_token(&headers, &config.cookie_name) else {
        return Json(LoggedInResponse::logged_out()).into_response();
    };

    let claims = match jwt::validate_token(config, &token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Session check failed: {}", e);
            return Json(LoggedInResponse::logged_out()).into_response();
        }
    };

    match jwt::create_token(config, &claims.user) {
        Ok(renewed) => (
            [(header::SET_COOKIE, build_session_cookie(config, &renewed))],
            Json(LoggedInResponse::logged_in(claims.user)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to renew session: {}", e);
            Json(LoggedInResponse::logged_out()).into_response()
        }
    }
}

/// Logout - clear session cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie(&state.auth_config))],
        Json(MessageResponse::new("Logged out")),
    )
}
