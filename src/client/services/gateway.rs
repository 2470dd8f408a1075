//! # Request Gateway
//!
//! Issues JSON POSTs to the remote service and classifies every outcome
//! into a small taxonomy the controllers can react to. The gateway does
//! not retry and does not interpret payload semantics; per-endpoint
//! policy lives with the callers.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use thiserror::Error;

/// Paths of the remote service, relative to the configured origin.
pub const SEARCH_ENDPOINT: &str = "/search";
pub const SIGNUP_ENDPOINT: &str = "/signup";
pub const LOGIN_ENDPOINT: &str = "/api/login";
pub const FORGOT_PASSWORD_ENDPOINT: &str = "/api/forgot-password";
pub const CHECK_USERNAME_ENDPOINT: &str = "/api/check-username";
pub const LOGOUT_ENDPOINT: &str = "/api/logout";

/// Classified request failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The call never produced a response from the network layer.
    #[error("could not reach the server: {0}")]
    Transport(String),

    /// A response arrived with a non-success status. `server_message`
    /// carries the `error` field of the body when it could be parsed.
    #[error("server returned status {status}")]
    Http {
        status: u16,
        server_message: Option<String>,
    },

    /// A success status arrived but the body is not valid JSON.
    #[error("server response was not valid JSON")]
    MalformedResponse,
}

impl GatewayError {
    /// User-facing text for this failure: transport problems get a
    /// generic connectivity message, server rejections surface the
    /// server's own text when present, anything else falls back.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GatewayError::Transport(_) => {
                "Cannot connect to the server. Please try again later.".to_string()
            }
            GatewayError::Http {
                server_message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type GatewayResult = Result<Value, GatewayError>;

/// Boxed future so the gateway stays object-safe behind `Arc<dyn Gateway>`.
pub type GatewayFuture = Pin<Box<dyn Future<Output = GatewayResult> + Send>>;

/// Capability for talking to the remote service. Injected into the
/// controller so tests can substitute a scripted implementation.
pub trait Gateway: Send + Sync {
    fn post(&self, path: &str, body: Value) -> GatewayFuture;
}

/// Production gateway over `reqwest` with a shared cookie store, so the
/// server session cookie rides along on every call.
pub struct RequestGateway {
    client: reqwest::Client,
    origin: String,
}

impl RequestGateway {
    pub fn new(origin: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
        })
    }
}

impl Gateway for RequestGateway {
    fn post(&self, path: &str, body: Value) -> GatewayFuture {
        let url = format!("{}{}", self.origin, path);
        let client = self.client.clone();

        Box::pin(async move {
            tracing::debug!("POST {url}");
            let response = client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|error| GatewayError::Transport(error.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let server_message = response
                    .json::<Value>()
                    .await
                    .ok()
                    .and_then(|body| body.get("error")?.as_str().map(str::to_string));
                tracing::debug!("POST {url} failed with {status}: {server_message:?}");
                return Err(GatewayError::Http {
                    status: status.as_u16(),
                    server_message,
                });
            }

            response
                .json::<Value>()
                .await
                .map_err(|_| GatewayError::MalformedResponse)
        })
    }
}
