//! Google-login counter service.
//!
//! `auth` owns the OAuth code exchange and cookie sessions, `services` the
//! counter rules, `store` their persistence; `routes` wires them into an
//! axum [`Router`](axum::Router).

use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
mod handlers;
pub mod routes;
mod schema;
pub mod services;
pub mod store;

use auth::{types::AuthConfig, IdentityProvider};
use store::CounterStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_config: Arc<AuthConfig>,
    pub store: Arc<dyn CounterStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub http: reqwest::Client,
    pub posts_url: String,
    pub posts_limit: usize,
}
