// Recipe API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token injection,
// and uniform error mapping. Endpoint methods live in `auth.rs` and
// `recipes.rs` as inherent impls to keep this module about transport.

use std::sync::RwLock;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::AuthToken;
use crate::transport::TransportConfig;

/// Error body shape used by the recipe API: `{"message": "..."}`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the recipe API.
///
/// Owns its credential: the bearer token set by [`set_auth_token`] is
/// attached to every request built afterwards until [`clear_auth_token`]
/// is called. There is no process-wide header state.
///
/// [`set_auth_token`]: ApiClient::set_auth_token
/// [`clear_auth_token`]: ApiClient::clear_auth_token
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<AuthToken>>,
}

impl ApiClient {
    /// Create a new client from a base URL and transport settings.
    ///
    /// The base URL is normalized to end with `/` so that relative endpoint
    /// paths such as `users/login` are appended rather than replacing the
    /// last path segment.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base(base_url),
            token: RwLock::new(None),
        }
    }

    /// Parse `base_url` and build a client with default transport settings.
    pub fn from_url(base_url: &str) -> Result<Self, Error> {
        let url = Url::parse(base_url)?;
        Self::new(url, &TransportConfig::default())
    }

    /// The API base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Credential management ─────────────────────────────────────────

    /// Attach `Authorization: Bearer <token>` to all future requests.
    pub fn set_auth_token(&self, token: AuthToken) {
        debug!("storing bearer token");
        *self.token.write().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token);
    }

    /// Stop sending the `Authorization` header.
    pub fn clear_auth_token(&self) {
        debug!("clearing bearer token");
        *self.token.write().unwrap_or_else(std::sync::PoisonError::into_inner) = None;
    }

    /// The token currently attached to requests, if any.
    pub fn auth_token(&self) -> Option<AuthToken> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token().is_some()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Resolve an endpoint path against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a request with an optional JSON body and decode the response.
    ///
    /// An empty response body decodes as JSON `null`, so `T = ()` or
    /// `T = Option<_>` work for endpoints that return nothing.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(path)?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url);
        if let Some(token) = self.auth_token() {
            builder = builder.bearer_auth(token.expose());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(Error::Transport)?;
        parse_response(resp).await
    }

    /// Send a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request::<T, ()>(Method::POST, path, None).await
    }

    /// Send a PATCH request with a JSON body.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request::<T, ()>(Method::DELETE, path, None).await
    }
}

fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Map non-2xx statuses to errors and decode the body of successful ones.
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;
    trace!(%status, len = body.len(), "response received");

    if !status.is_success() {
        let message = error_message(status, &body);
        return Err(if status == StatusCode::UNAUTHORIZED {
            Error::Authentication { message }
        } else {
            Error::Api {
                status: status.as_u16(),
                message,
            }
        });
    }

    let text = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str(text).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            let preview: String = body.chars().take(200).collect();
            if preview.is_empty() {
                status
                    .canonical_reason()
                    .map_or_else(|| format!("HTTP {status}"), str::to_owned)
            } else {
                preview
            }
        })
}
