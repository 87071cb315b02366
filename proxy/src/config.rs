//! Runtime configuration.
//!
//! Every option can be given as a flag or through its environment variable;
//! flags win.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8090";

#[derive(Debug, Clone, Parser)]
#[command(name = "users-proxy", about = "Proxy in front of the upstream users API")]
pub struct Config {
    /// Base URL of the upstream users service.
    #[arg(long, env = "USERS_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Address the proxy listens on.
    #[arg(long, env = "USERS_PROXY_LISTEN", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// Connect timeout for upstream calls, in milliseconds. Unset means none.
    #[arg(long, env = "USERS_CONNECT_TIMEOUT_MS")]
    pub connect_timeout_ms: Option<u64>,

    /// Total timeout for one upstream call, in milliseconds. Unset means none.
    #[arg(long, env = "USERS_REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "USERS_PROXY_LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.upstream_url.clone(),
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Settings for `UserApiClient`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["users-proxy"]).unwrap();
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.listen, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert!(!config.log_json);

        let client = config.client_config();
        assert!(client.connect_timeout.is_none());
        assert!(client.request_timeout.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "users-proxy",
            "--upstream-url",
            "http://users.internal:9000",
            "--listen",
            "0.0.0.0:3000",
            "--connect-timeout-ms",
            "250",
            "--request-timeout-ms",
            "1500",
            "--log-json",
        ])
        .unwrap();

        let client = config.client_config();
        assert_eq!(client.base_url, "http://users.internal:9000");
        assert_eq!(client.connect_timeout, Some(Duration::from_millis(250)));
        assert_eq!(client.request_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(config.listen.port(), 3000);
        assert!(config.log_json);
    }

    #[test]
    fn rejects_bad_listen_address() {
        assert!(Config::try_parse_from(["users-proxy", "--listen", "nowhere"]).is_err());
    }
}
