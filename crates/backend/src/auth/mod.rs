//! Authentication module for cookie sessions with Google OAuth login.
//!
//! This module provides:
//! - Session token creation and validation
//! - Google OAuth code exchange with ID token verification
//! - `require_auth` middleware for protecting routes

mod google;
mod handlers;
pub(crate) mod jwt;
mod middleware;
pub mod types;

pub use google::{GoogleProvider, IdentityProvider, ProviderError};
pub use handlers::{auth_token, auth_url, logged_in, logout};
pub use middleware::{
    build_session_cookie, clear_session_cookie, extract_session_token, extract_session_user,
    require_auth,
};
