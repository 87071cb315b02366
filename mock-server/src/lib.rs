//! In-memory stand-in for the upstream users service.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn new(id: i64, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}

// Keyed by id so listings come back in id order.
pub type Db = Arc<RwLock<BTreeMap<i64, User>>>;

/// Users served by `app()`.
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(1, "Ada", "Lovelace"),
        User::new(2, "Alan", "Turing"),
        User::new(3, "Grace", "Hopper"),
    ]
}

pub fn app() -> Router {
    app_with_users(seed_users())
}

pub fn app_with_users(users: impl IntoIterator<Item = User>) -> Router {
    let db: Db = Arc::new(RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()));
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_app(listener, app()).await
}

pub async fn run_app(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

async fn list_users(State(db): State<Db>) -> ([(&'static str, String); 1], Json<Vec<User>>) {
    let users: Vec<User> = db.read().await.values().cloned().collect();
    tracing::debug!(count = users.len(), "listing users");
    ([(TOTAL_COUNT_HEADER, users.len().to_string())], Json(users))
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<User>, StatusCode> {
    let users = db.read().await;
    users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut users = db.write().await;
    users
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
