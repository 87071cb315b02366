//! Stateless HTTP request builder and response parser for the users API.
//!
//! # Design
//! `UsersClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! Any 2xx counts as success. A 404 is meaningful only for by-id lookups;
//! for list and delete it is an upstream failure like any other status.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ResponseHead};
use crate::types::UserResponse;

const NOT_FOUND: u16 = 404;

/// Stateless client for the upstream users API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct UsersClient {
    base_url: String,
}

impl UsersClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/users".to_string())
    }

    pub fn build_get_user(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/users/{id}"))
    }

    pub fn build_delete_user(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/users/{id}"))
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<UserResponse>, ApiError> {
        ensure_success(&response)?;
        decode(&response.body)
    }

    /// Lenient lookup: a 404 yields `Ok(None)`.
    pub fn parse_get_user(&self, response: HttpResponse) -> Result<Option<UserResponse>, ApiError> {
        if response.status == NOT_FOUND {
            return Ok(None);
        }
        ensure_success(&response)?;
        decode(&response.body).map(Some)
    }

    /// Strict lookup: a 404 yields `ApiError::NotFound`.
    pub fn parse_get_user_strict(&self, response: HttpResponse) -> Result<UserResponse, ApiError> {
        self.parse_get_user(response)?.ok_or(ApiError::NotFound)
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.parse_delete_user_bodiless(response).map(|_| ())
    }

    /// Like `parse_delete_user`, but hands back status and headers.
    pub fn parse_delete_user_bodiless(&self, response: HttpResponse) -> Result<ResponseHead, ApiError> {
        ensure_success(&response)?;
        Ok(response.into_head())
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// Map a non-2xx status to `ApiError::Upstream`.
fn ensure_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::upstream(response.status, &response.body))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> UsersClient {
        UsersClient::new("http://localhost:8090")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_users_produces_correct_request() {
        let req = client().build_list_users();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8090/users");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_get_user_produces_correct_request() {
        let req = client().build_get_user(17);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8090/users/17");
    }

    #[test]
    fn build_delete_user_produces_correct_request() {
        let req = client().build_delete_user(-3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:8090/users/-3");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = UsersClient::new("http://localhost:8090//");
        assert_eq!(client.base_url(), "http://localhost:8090");
        assert_eq!(client.build_list_users().url, "http://localhost:8090/users");
    }

    #[test]
    fn parse_list_users_preserves_order() {
        let body = r#"[
            {"id":2,"first_name":"Alan","last_name":"Turing"},
            {"id":1,"first_name":"Ada","last_name":"Lovelace"}
        ]"#;
        let users = client().parse_list_users(response(200, body)).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 2);
        assert_eq!(users[0].first_name, "Alan");
        assert_eq!(users[1].last_name, "Lovelace");
    }

    #[test]
    fn parse_list_users_not_found_is_upstream_error() {
        let err = client().parse_list_users(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::Upstream { status: 404, .. }));
    }

    #[test]
    fn parse_list_users_bad_json() {
        let err = client().parse_list_users(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_list_users_rejects_object_body() {
        let body = r#"{"id":1,"first_name":"Ada","last_name":"Lovelace"}"#;
        let err = client().parse_list_users(response(200, body)).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_get_user_success() {
        let body = r#"{"id":5,"first_name":"Ada","last_name":"Lovelace"}"#;
        let user = client().parse_get_user(response(200, body)).unwrap().unwrap();
        assert_eq!(user.id, 5);
    }

    #[test]
    fn parse_get_user_not_found_is_absent() {
        let user = client().parse_get_user(response(404, "")).unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn parse_get_user_server_error() {
        let err = client()
            .parse_get_user(response(500, "internal error"))
            .unwrap_err();
        match err {
            ApiError::Upstream { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_get_user_strict_not_found() {
        let err = client().parse_get_user_strict(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_get_user_strict_bad_request_is_upstream() {
        let err = client().parse_get_user_strict(response(400, "bad")).unwrap_err();
        assert!(matches!(err, ApiError::Upstream { status: 400, .. }));
    }

    #[test]
    fn parse_get_user_error_body_is_bounded() {
        let body = "e".repeat(10_000);
        let err = client().parse_get_user(response(500, &body)).unwrap_err();
        let ApiError::Upstream { body, .. } = err else {
            panic!("expected Upstream");
        };
        assert_eq!(body.len(), crate::error::MAX_ERROR_BODY);
    }

    #[test]
    fn parse_delete_user_discards_body() {
        assert!(client().parse_delete_user(response(204, "")).is_ok());
        assert!(client().parse_delete_user(response(200, "ignored {")).is_ok());
    }

    #[test]
    fn parse_delete_user_not_found_is_upstream_error() {
        let err = client().parse_delete_user(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::Upstream { status: 404, .. }));
    }

    #[test]
    fn parse_delete_user_bodiless_keeps_head() {
        let mut resp = response(204, "");
        resp.headers.push(("x-request-id".to_string(), "abc".to_string()));
        let head = client().parse_delete_user_bodiless(resp).unwrap();
        assert_eq!(head.status, 204);
        assert_eq!(head.headers, vec![("x-request-id".to_string(), "abc".to_string())]);
    }
}
