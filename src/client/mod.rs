//! REST API Client
//!
//! Single point of egress to the backend. Every request goes through
//! [`ApiClient::execute`], which:
//!
//! - attaches `Authorization: Bearer <token>` when a token is stored
//! - turns a 401 into a session eviction before reporting it
//! - extracts the server's `message`/`error` text from failures
//!
//! GET requests additionally carry a strictly increasing `_t` parameter.
//! Nothing is retried and requests are never coalesced.

mod cache_buster;

pub use cache_buster::{CacheBuster, CACHE_PARAM};

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::Session;

/// Request body for writes
#[derive(Debug)]
pub enum Payload {
    Json(serde_json::Value),
    Multipart(Form),
}

/// Authenticated HTTP client for the admin REST API
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Arc<str>,
    session: Session,
    cache_buster: Arc<CacheBuster>,
}

impl ApiClient {
    /// Create a client against `config.base_url`
    pub fn new(config: &ApiConfig, session: Session) -> ApiResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            session,
            cache_buster: Arc::new(CacheBuster::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// GET `path` and decode the body as `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let mut url = self.url(path)?;
        url.query_pairs_mut()
            .append_pair(CACHE_PARAM, &self.cache_buster.next().to_string());

        let body = self
            .execute(Method::GET, path, self.http.get(url))
            .await?;
        decode(path, &body)
    }

    /// POST a JSON body
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)?).json(body);
        let body = self.execute(Method::POST, path, request).await?;
        decode(path, &body)
    }

    /// PUT a JSON body
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.put(self.url(path)?).json(body);
        let body = self.execute(Method::PUT, path, request).await?;
        decode(path, &body)
    }

    /// POST a multipart form
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> ApiResult<T> {
        let request = self.http.post(self.url(path)?).multipart(form);
        let body = self.execute(Method::POST, path, request).await?;
        decode(path, &body)
    }

    /// PUT a multipart form
    pub async fn put_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> ApiResult<T> {
        let request = self.http.put(self.url(path)?).multipart(form);
        let body = self.execute(Method::PUT, path, request).await?;
        decode(path, &body)
    }

    /// Send a write with whichever body encoding the payload carries
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> ApiResult<T> {
        let request = self.http.request(method.clone(), self.url(path)?);
        let request = match payload {
            Payload::Json(value) => request.json(&value),
            Payload::Multipart(form) => request.multipart(form),
        };
        let body = self.execute(method, path, request).await?;
        decode(path, &body)
    }

    /// DELETE `path`. The response body is not interpreted.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let request = self.http.delete(self.url(path)?);
        self.execute(Method::DELETE, path, request).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ApiResult<Vec<u8>> {
        // The token is read per request and dropped with the builder
        let request = match self.session.store().read() {
            Some(token) => request.header(AUTHORIZATION, token.bearer()),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::error!(method = %method, path, "Request failed: {}", e);
            ApiError::from_transport(e)
        })?;

        let status = response.status();
        tracing::debug!(method = %method, path, status = status.as_u16(), "API request");

        let body = response
            .bytes()
            .await
            .map_err(ApiError::from_transport)?
            .to_vec();

        if status == StatusCode::UNAUTHORIZED {
            self.session.expire();
            return Err(ApiError::Unauthorized {
                message: server_message(&body).unwrap_or_default(),
            });
        }

        if !status.is_success() {
            let message = server_message(&body).unwrap_or_default();
            tracing::error!(
                method = %method,
                path,
                status = status.as_u16(),
                "API error: {}",
                message
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|source| {
        tracing::error!(path, "Response did not match expected shape: {}", source);
        ApiError::Decode {
            path: path.to_string(),
            source,
        }
    })
}

/// Best-effort explanation from an error body: `{"message": ..}`,
/// `{"error": ..}` or `{"error": {"message": ..}}`
fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let text = value
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| value.get("error").and_then(|e| e.as_str()))
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
        })?;
    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Route;
    use crate::session::{AuthState, SessionToken};
    use crate::testing::{self, FakeBackend, TEST_TOKEN};
    use serde_json::{json, Value};

    #[test]
    fn test_server_message_shapes() {
        assert_eq!(
            server_message(br#"{"message":"Review not found"}"#).as_deref(),
            Some("Review not found")
        );
        assert_eq!(
            server_message(br#"{"error":"Bad input"}"#).as_deref(),
            Some("Bad input")
        );
        assert_eq!(
            server_message(br#"{"error":{"code":"X","message":"Nested"}}"#).as_deref(),
            Some("Nested")
        );
        assert!(server_message(b"<html>502 Bad Gateway</html>").is_none());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        let err = ApiClient::new(&config, testing::session()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_bearer_attached_when_token_stored() {
        let backend = FakeBackend::start().await;
        let client = testing::client_for(&backend);
        client
            .session()
            .sign_in(SessionToken::new(TEST_TOKEN))
            .unwrap();

        let _: Vec<Value> = client.get("/reviews").await.unwrap();
        let _: Value = client
            .post_json("/store-links", &json!({"type": "google", "url": "https://play.google.com"}))
            .await
            .unwrap();

        for request in backend.requests() {
            assert_eq!(request.authorization.as_deref(), Some("Bearer tok123"));
        }
    }

    #[tokio::test]
    async fn test_no_header_without_token() {
        let backend = FakeBackend::start().await;
        let client = testing::client_for(&backend);

        let _ = client.get::<Vec<Value>>("/reviews").await;

        let requests = backend.requests_to("/reviews");
        assert_eq!(requests.len(), 1);
        assert!(requests[0].authorization.is_none());
    }

    #[tokio::test]
    async fn test_gets_carry_distinct_cache_busters() {
        let backend = FakeBackend::start().await;
        let client = testing::signed_in_client(&backend);

        let _: Vec<Value> = client.get("/navbar").await.unwrap();
        let _: Vec<Value> = client.get("/navbar").await.unwrap();

        let values: Vec<u64> = backend
            .requests_to("/navbar")
            .iter()
            .filter_map(|r| r.cache_buster())
            .collect();
        assert_eq!(values.len(), 2);
        assert!(values[1] > values[0]);
    }

    #[tokio::test]
    async fn test_writes_carry_no_cache_buster() {
        let backend = FakeBackend::start().await;
        let client = testing::signed_in_client(&backend);

        let _: Value = client
            .post_json("/navbar", &json!({"label": "IOS DOWNLOAD", "url": "https://apps.apple.com"}))
            .await
            .unwrap();

        assert!(backend.requests_to("/navbar")[0].cache_buster().is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_evicts_session_once() {
        let backend = FakeBackend::start().await;
        let client = testing::signed_in_client(&backend);
        let mut state = client.session().subscribe();
        backend.revoke_tokens();

        let first = client.get::<Vec<Value>>("/reviews").await.unwrap_err();
        assert!(first.is_unauthorized());
        assert!(client.session().store().read().is_none());
        assert_eq!(client.session().navigator().current(), Route::Login);
        assert!(state.has_changed().unwrap());
        assert_eq!(*state.borrow_and_update(), AuthState::Unauthenticated);

        // Later failures keep the store empty without another transition
        let second = client.get::<Vec<Value>>("/store-links").await.unwrap_err();
        assert!(second.is_unauthorized());
        assert!(!state.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_unauthorized_transition_once() {
        let backend = FakeBackend::start().await;
        let client = testing::signed_in_client(&backend);
        let mut state = client.session().subscribe();
        backend.revoke_tokens();

        let (a, b, c) = tokio::join!(
            client.get::<Vec<Value>>("/reviews"),
            client.get::<Vec<Value>>("/navbar"),
            client.get::<Vec<Value>>("/bgcarousel"),
        );
        assert!(a.is_err() && b.is_err() && c.is_err());

        assert!(state.has_changed().unwrap());
        state.borrow_and_update();
        assert!(!state.has_changed().unwrap());
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_other_errors_propagate_with_message() {
        let backend = FakeBackend::start().await;
        let client = testing::signed_in_client(&backend);
        backend.fail("/reviews", 500);

        let err = client.get::<Vec<Value>>("/reviews").await.unwrap_err();
        match &err {
            ApiError::Status { status, message } => {
                assert_eq!(*status, 500);
                assert_eq!(message, "Forced failure");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // Session untouched by non-401 failures
        assert!(client.session().is_authenticated());
        assert_eq!(backend.requests_to("/reviews").len(), 1);
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let backend = FakeBackend::start().await;
        let client = testing::signed_in_client(&backend);

        #[derive(Debug, serde::Deserialize)]
        struct Strict {
            #[allow(dead_code)]
            rating: u8,
        }

        let err = client.get::<Strict>("/reviews").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { ref path, .. } if path == "/reviews"));
    }

    #[tokio::test]
    async fn test_network_failure_surfaces() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            request_timeout_secs: 2,
        };
        let client = ApiClient::new(&config, testing::session()).unwrap();

        let err = client.get::<Vec<Value>>("/reviews").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_) | ApiError::Timeout));
        assert_eq!(err.user_message(), crate::error::GENERIC_FAILURE);
    }
}
