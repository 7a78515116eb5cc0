use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{auth, handlers, AppState};

/// Build the application router.
///
/// `client_url` is the comma-separated list of browser origins allowed to
/// call the API with credentials.
pub fn build_router(state: AppState, client_url: &str) -> Router {
    let protected = Router::new()
        .route("/user/posts", get(handlers::user_posts))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health_check))
        // Auth routes
        .route("/auth/url", get(auth::auth_url))
        .route("/auth/token", get(auth::auth_token))
        .route("/auth/logged_in", get(auth::logged_in))
        .route("/auth/logout", post(auth::logout))
        // Counter routes
        .route("/api/counter/:email", get(handlers::get_counter))
        .route("/api/counter/create/:email", post(handlers::create_counter))
        .route("/api/counter/increment/:email", post(handlers::increment))
        .route("/api/counter/decrement/:email", post(handlers::decrement))
        .route("/api/counter/myincrement/:email", post(handlers::my_increment))
        .route("/api/counter/mydecrement/:email", post(handlers::my_decrement))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(client_url))
        .with_state(state)
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Build CORS layer allowing only the configured client origins.
fn build_cors_layer(client_url: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = client_url
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("No valid CORS origin in CLIENT_URL, cross-origin requests will be refused");
    } else {
        tracing::info!("CORS configured for origins: {:?}", origins);
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
