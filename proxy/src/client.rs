//! Async client for the upstream users service.
//!
//! # Design
//! `UserApiClient` pairs the sans-IO `UsersClient` from `users-core` with a
//! shared `reqwest::Client`. `users-core` decides what to send and how to read
//! the answer; this module only moves bytes. Cloning is cheap and clones share
//! one connection pool, so a single instance serves every inbound request.

use futures_util::stream::{self, Stream, StreamExt};
use reqwest::header::HeaderMap;
use tracing::{info, instrument};
use users_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, ResponseHead, UserResponse, UsersClient};

use crate::config::ClientConfig;

#[derive(Debug, Clone)]
pub struct UserApiClient {
    http: reqwest::Client,
    users: UsersClient,
}

impl UserApiClient {
    /// Build a client from `config`.
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            users: UsersClient::new(&config.base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        self.users.base_url()
    }

    pub async fn list_users(&self) -> Result<Vec<UserResponse>, ApiError> {
        let response = self.exchange(self.users.build_list_users()).await?;
        self.users.parse_list_users(response)
    }

    /// Users one at a time. The body is read in full before the first item;
    /// a failed call yields a single `Err`.
    pub fn list_users_stream(&self) -> impl Stream<Item = Result<UserResponse, ApiError>> + '_ {
        stream::once(self.list_users()).flat_map(|result| {
            let items: Vec<Result<UserResponse, ApiError>> = match result {
                Ok(users) => users.into_iter().map(Ok).collect(),
                Err(e) => vec![Err(e)],
            };
            stream::iter(items)
        })
    }

    /// `Ok(None)` when the upstream answers 404.
    pub async fn get_user(&self, id: i64) -> Result<Option<UserResponse>, ApiError> {
        let response = self.exchange(self.users.build_get_user(id)).await?;
        self.users.parse_get_user(response)
    }

    /// `Err(ApiError::NotFound)` when the upstream answers 404.
    pub async fn get_user_strict(&self, id: i64) -> Result<UserResponse, ApiError> {
        let response = self.exchange(self.users.build_get_user(id)).await?;
        self.users.parse_get_user_strict(response)
    }

    /// The raw upstream response; the status is left to the caller.
    pub async fn get_user_response(&self, id: i64) -> Result<HttpResponse, ApiError> {
        self.exchange(self.users.build_get_user(id)).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let response = self.exchange(self.users.build_delete_user(id)).await?;
        self.users.parse_delete_user(response)
    }

    pub async fn delete_user_bodiless(&self, id: i64) -> Result<ResponseHead, ApiError> {
        let response = self.exchange(self.users.build_delete_user(id)).await?;
        self.users.parse_delete_user_bodiless(response)
    }

    /// Execute a request built by `UsersClient` and return the response as data.
    ///
    /// Any status is `Ok`; only transport failures and timeouts are errors.
    #[instrument(skip_all, fields(method = %request.method, url = %request.url))]
    pub async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = header_pairs(response.headers());
        log_response_headers(status, &headers);

        let body = response.text().await.map_err(transport_error)?;
        Ok(HttpResponse { status, headers, body })
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport(e.to_string())
    }
}

/// Header values that are not valid UTF-8 are dropped.
fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}

fn log_response_headers(status: u16, headers: &[(String, String)]) {
    info!(status, ?headers, "received response from users API");
}
