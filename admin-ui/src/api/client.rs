//! HTTP API Client
//!
//! Single point of egress to the landing page backend. Every request carries
//! the stored bearer token, every GET carries a strictly increasing `_t`
//! stamp, and a 401 signs the session out.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::Cell;
use std::fmt;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://backend-landingpage-zs9q.onrender.com/api";

/// Local storage key overriding the API base URL
const API_BASE_KEY: &str = "apiBaseUrl";

/// Local storage key holding the bearer token
pub const TOKEN_KEY: &str = "authToken";

/// Query parameter defeating cached GET responses
pub const CACHE_PARAM: &str = "_t";

/// Shown when the server gave no usable message
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

thread_local! {
    static LAST_STAMP: Cell<u64> = Cell::new(0);
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Stored bearer token, if any
pub fn read_token() -> Option<String> {
    local_storage()?
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

pub fn save_token(token: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(TOKEN_KEY, token).is_err() {
            web_sys::console::error_1(&"Failed to store session token".into());
        }
    }
}

pub fn clear_token() {
    if let Some(storage) = local_storage() {
        if storage.remove_item(TOKEN_KEY).is_err() {
            web_sys::console::error_1(&"Failed to clear session token".into());
        }
    }
}

pub fn has_token() -> bool {
    read_token().is_some()
}

/// Next cache-buster value: the current time, forced past the last one
pub fn next_stamp(last: u64, now: u64) -> u64 {
    now.max(last + 1)
}

fn cache_buster() -> String {
    let now = js_sys::Date::now() as u64;
    LAST_STAMP
        .with(|last| {
            let stamp = next_stamp(last.get(), now);
            last.set(stamp);
            stamp
        })
        .to_string()
}

// ============ Errors ============

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401; the session has been cleared
    Unauthorized(Option<String>),
    Status { status: u16, message: Option<String> },
    Network(String),
    Decode(String),
    Request(String),
}

impl ApiError {
    /// Text to show the user: the server's message when it sent one
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized(Some(message)) | ApiError::Status { message: Some(message), .. } => {
                message.clone()
            }
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(_) => write!(f, "Unauthorized"),
            ApiError::Status { status, message } => {
                write!(f, "HTTP {}: {}", status, message.as_deref().unwrap_or("no message"))
            }
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::Decode(e) => write!(f, "Parse error: {}", e),
            ApiError::Request(e) => write!(f, "Request build error: {}", e),
        }
    }
}

/// Best-effort message from an error body
pub fn server_message(body: &serde_json::Value) -> Option<String> {
    body.get("message")
        .and_then(|m| m.as_str())
        .or_else(|| body.get("error").and_then(|e| e.as_str()))
        .or_else(|| body.pointer("/error/message").and_then(|m| m.as_str()))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

// ============ Transport ============

enum Body {
    Empty,
    Json(serde_json::Value),
    Form(web_sys::FormData),
}

fn url(path: &str) -> String {
    format!("{}{}", get_api_base(), path)
}

/// Clear the token and go to the login page. Only the first rejection of a
/// stored token does anything.
/// Drop a stored token the server refused. Only the first of several
/// concurrent 401s finds a token, so the sign-out happens once.
fn evict_session() -> bool {
    if !has_token() {
        return false;
    }
    clear_token();
    web_sys::console::warn_1(&"Session rejected by the server, signing out".into());
    true
}

fn sign_out_rejected_session() {
    if !evict_session() {
        return;
    }
    if let Some(window) = web_sys::window() {
        if window.location().set_href("/login").is_err() {
            web_sys::console::error_1(&"Failed to open the login page".into());
        }
    }
}

async fn execute(method: &str, path: &str, builder: RequestBuilder, body: Body) -> Result<Response, ApiError> {
    let builder = match read_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    };

    let request: Request = match body {
        Body::Empty => builder.build(),
        Body::Json(value) => builder.json(&value),
        Body::Form(form) => builder.body(form),
    }
    .map_err(|e| ApiError::Request(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .as_ref()
        .and_then(server_message);

    web_sys::console::error_1(&format!("{} {} failed with {}", method, path, status).into());

    if status == 401 {
        sign_out_rejected_session();
        return Err(ApiError::Unauthorized(message));
    }
    Err(ApiError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn to_json<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Request(e.to_string()))
}

pub async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let stamp = cache_buster();
    let builder = Request::get(&url(path)).query([(CACHE_PARAM, stamp.as_str())]);
    decode(execute("GET", path, builder, Body::Empty).await?).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let body = Body::Json(to_json(body)?);
    decode(execute("POST", path, Request::post(&url(path)), body).await?).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let body = Body::Json(to_json(body)?);
    decode(execute("PUT", path, Request::put(&url(path)), body).await?).await
}

pub async fn post_form<T: DeserializeOwned>(path: &str, form: web_sys::FormData) -> Result<T, ApiError> {
    decode(execute("POST", path, Request::post(&url(path)), Body::Form(form)).await?).await
}

pub async fn put_form<T: DeserializeOwned>(path: &str, form: web_sys::FormData) -> Result<T, ApiError> {
    decode(execute("PUT", path, Request::put(&url(path)), Body::Form(form)).await?).await
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    execute("DELETE", path, Request::delete(&url(path)), Body::Empty).await?;
    Ok(())
}
