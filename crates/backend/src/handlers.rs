use axum::{
    extract::{Extension, Path, State},
    Json,
};
use counter_types::{Counter, PostsResponse, SessionUser};

use crate::error::{ApiError, ApiResult};
use crate::services::{CounterField, CounterService};
use crate::AppState;

// Counter handlers
pub async fn get_counter(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<Option<Counter>>> {
    let counter = CounterService::get(state.store.as_ref(), &email).await?;
    Ok(Json(counter))
}

pub async fn create_counter(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<Counter>> {
    let counter = CounterService::create(state.store.as_ref(), &email).await?;
    Ok(Json(counter))
}

pub async fn increment(state: State<AppState>, email: Path<String>) -> ApiResult<Json<Counter>> {
    adjust(state, email, CounterField::Count, 1).await
}

pub async fn decrement(state: State<AppState>, email: Path<String>) -> ApiResult<Json<Counter>> {
    adjust(state, email, CounterField::Count, -1).await
}

pub async fn my_increment(state: State<AppState>, email: Path<String>) -> ApiResult<Json<Counter>> {
    adjust(state, email, CounterField::MyCount, 1).await
}

pub async fn my_decrement(state: State<AppState>, email: Path<String>) -> ApiResult<Json<Counter>> {
    adjust(state, email, CounterField::MyCount, -1).await
}

async fn adjust(
    State(state): State<AppState>,
    Path(email): Path<String>,
    field: CounterField,
    delta: i32,
) -> ApiResult<Json<Counter>> {
    let counter = CounterService::adjust(state.store.as_ref(), &email, field, delta).await?;
    Ok(Json(counter))
}

// Posts proxy (session required)
pub async fn user_posts(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> ApiResult<Json<PostsResponse>> {
    tracing::debug!("Fetching posts for {}", user.email);

    let mut posts: Vec<serde_json::Value> = state
        .http
        .get(state.posts_url.as_str())
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Posts request failed: {}", e)))?
        .json()
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Invalid posts response: {}", e)))?;

    posts.truncate(state.posts_limit);

    Ok(Json(PostsResponse { posts }))
}
