//! HTTP proxy in front of the upstream users service.
//!
//! # Overview
//! `GET /api/users`, `GET /api/users/{id}` and `DELETE /api/users/{id}` are
//! forwarded to `GET /users`, `GET /users/{id}` and `DELETE /users/{id}` on the
//! upstream. Request building and response interpretation live in
//! `users-core`; this crate executes them asynchronously with reqwest and
//! serves the results with axum.
//!
//! # Design
//! - No shared mutable state: handlers share a cloned `UserApiClient`, which
//!   holds the immutable base URL and reqwest's connection pool.
//! - A missing user is `None`, not an error; the router turns it into an
//!   empty 404.
//! - Upstream failures become 502, timeouts 504, unparsable ids 400.

pub mod client;
pub mod config;
pub mod error;
pub mod routes;

pub use client::UserApiClient;
pub use config::{ClientConfig, Config};
pub use error::ProxyError;

use axum::Router;
use tokio::net::TcpListener;

pub fn app(client: UserApiClient) -> Router {
    routes::router(client)
}

pub async fn run(listener: TcpListener, client: UserApiClient) -> Result<(), std::io::Error> {
    axum::serve(listener, app(client)).await
}
