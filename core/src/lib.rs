//! Sans-IO client core for the upstream users service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. An async transport (see the `users-proxy` crate)
//! or a plain blocking agent executes the round-trip in between.
//!
//! # Design
//! - `UsersClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - 404 on a by-id lookup is an absent value by default; the `_strict`
//!   parser turns it into `ApiError::NotFound` for callers that need it.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::UsersClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseHead};
pub use types::UserResponse;
