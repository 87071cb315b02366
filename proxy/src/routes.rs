//! Inbound routes. Each handler awaits one `UserApiClient` call.

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use users_core::UserResponse;

use crate::client::UserApiClient;
use crate::error::ProxyError;

pub fn router(client: UserApiClient) -> Router {
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", get(get_user).delete(delete_user))
        .with_state(client)
}

/// `{id}` path segment parsed as an integer.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = ProxyError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ProxyError::BadRequest(e.body_text()))?;
        raw.parse().map(UserId).map_err(|_| ProxyError::BadRequest(raw))
    }
}

async fn list_users(State(client): State<UserApiClient>) -> Result<Json<Vec<UserResponse>>, ProxyError> {
    Ok(Json(client.list_users().await?))
}

async fn get_user(State(client): State<UserApiClient>, UserId(id): UserId) -> Result<Response, ProxyError> {
    match client.get_user(id).await? {
        Some(user) => Ok(Json(user).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

async fn delete_user(State(client): State<UserApiClient>, UserId(id): UserId) -> Result<StatusCode, ProxyError> {
    client.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
