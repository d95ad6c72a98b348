//! In-process REST backend for tests
//!
//! An axum server on `127.0.0.1:0` that behaves like the admin API closely
//! enough for end-to-end checks: bearer authentication, in-memory
//! collections with server-assigned `_id`s, JSON and multipart bodies,
//! partial updates. Every request is recorded with its `Authorization`
//! header and query string.

use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::client::{ApiClient, CACHE_PARAM};
use crate::config::ApiConfig;
use crate::navigation::{Navigator, Route};
use crate::session::{CredentialStore, Session, SessionToken};
use crate::storage::MemoryStorage;

pub const TEST_EMAIL: &str = "a@b.com";
pub const TEST_PASSWORD: &str = "secret1";
pub const TEST_TOKEN: &str = "tok123";

const COLLECTIONS: [&str; 5] = ["bgcarousel", "store-links", "social-links", "navbar", "reviews"];

/// One request as the backend saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path relative to the `/api` prefix
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

impl RecordedRequest {
    pub fn cache_buster(&self) -> Option<u64> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == CACHE_PARAM).then(|| value.parse().ok()).flatten()
        })
    }
}

#[derive(Default)]
struct BackendState {
    token: Mutex<String>,
    requests: Mutex<Vec<RecordedRequest>>,
    collections: Mutex<HashMap<String, Vec<Value>>>,
    failures: Mutex<HashMap<String, u16>>,
    delays: Mutex<HashMap<String, Duration>>,
}

pub struct FakeBackend {
    pub base_url: String,
    state: Arc<BackendState>,
    server: JoinHandle<()>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Arc::new(BackendState::default());
        *state.token.lock().unwrap() = TEST_TOKEN.to_string();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::clone(&state));
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
            server,
        }
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: 5,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests whose path starts with `prefix`
    pub fn requests_to(&self, prefix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with(prefix))
            .collect()
    }

    /// Insert a raw entity; an `_id` is assigned when missing
    pub fn seed(&self, collection: &str, entity: Value) -> String {
        let mut entity = entity;
        let id = match entity.get("_id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                entity["_id"] = json!(id);
                id
            }
        };
        self.state
            .collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(entity);
        id
    }

    pub fn entities(&self, collection: &str) -> Vec<Value> {
        self.state
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Answer every request under `path` with `status`
    pub fn fail(&self, path: &str, status: u16) {
        self.state
            .failures
            .lock()
            .unwrap()
            .insert(path.to_string(), status);
    }

    /// Hold every response under `path` for `delay`
    pub fn delay(&self, path: &str, delay: Duration) {
        self.state
            .delays
            .lock()
            .unwrap()
            .insert(path.to_string(), delay);
    }

    pub fn clear_failures(&self) {
        self.state.failures.lock().unwrap().clear();
    }

    /// Invalidate the issued token until the next login
    pub fn revoke_tokens(&self) {
        self.state.token.lock().unwrap().clear();
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Fresh in-memory session starting on the login page
pub fn session() -> Session {
    let store = CredentialStore::new(Arc::new(MemoryStorage::new()));
    Session::new(store, Navigator::new(Route::Login))
}

/// Client against `backend` with no stored token
pub fn client_for(backend: &FakeBackend) -> ApiClient {
    ApiClient::new(&backend.config(), session()).unwrap()
}

/// Client against `backend` already holding the issued token
pub fn signed_in_client(backend: &FakeBackend) -> ApiClient {
    let client = client_for(backend);
    client
        .session()
        .sign_in(SessionToken::new(TEST_TOKEN))
        .unwrap();
    client
}

fn router(state: Arc<BackendState>) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/reset-password/:token", post(reset_password))
        .route("/api/profile", get(profile))
        .route("/api/change-password", put(change_password))
        .route("/api/:collection", get(list).post(create))
        .route("/api/:collection/:id", put(update).delete(remove))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            record_and_inject,
        ))
        .with_state(state)
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn record_and_inject(
    State(state): State<Arc<BackendState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request
        .uri()
        .path()
        .trim_start_matches("/api")
        .to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: request.method().to_string(),
        path: path.clone(),
        query: request.uri().query().map(str::to_string),
        authorization: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    let forced = state
        .failures
        .lock()
        .unwrap()
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix.as_str()))
        .map(|(_, status)| *status);
    if let Some(status) = forced {
        let status = StatusCode::from_u16(status).unwrap();
        return reply(status, json!({ "message": "Forced failure" }));
    }

    let delay = state
        .delays
        .lock()
        .unwrap()
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix.as_str()))
        .map(|(_, delay)| *delay);
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    next.run(request).await
}

fn authorize(state: &BackendState, headers: &HeaderMap) -> Result<(), Response> {
    let token = state.token.lock().unwrap().clone();
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(value) if !token.is_empty() && value == format!("Bearer {}", token) => Ok(()),
        _ => Err(reply(
            StatusCode::UNAUTHORIZED,
            json!({ "message": "Invalid or expired token" }),
        )),
    }
}

fn check_collection(collection: &str) -> Result<(), Response> {
    if COLLECTIONS.contains(&collection) {
        Ok(())
    } else {
        Err(reply(StatusCode::NOT_FOUND, json!({ "message": "Not found" })))
    }
}

async fn login(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if email == TEST_EMAIL && password == TEST_PASSWORD {
        *state.token.lock().unwrap() = TEST_TOKEN.to_string();
        reply(StatusCode::OK, json!({ "token": TEST_TOKEN }))
    } else {
        reply(
            StatusCode::UNAUTHORIZED,
            json!({ "message": "Invalid email or password" }),
        )
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"].as_str() == Some("taken@b.com") {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "message": "User already exists" }),
        );
    }
    reply(
        StatusCode::CREATED,
        json!({ "message": "User registered successfully" }),
    )
}

async fn reset_password(Path(token): Path<String>, Json(body): Json<Value>) -> Response {
    if token == "expired" || body["password"].as_str().is_none() {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "message": "Invalid or expired token" }),
        );
    }
    reply(
        StatusCode::OK,
        json!({ "message": "Password reset successful" }),
    )
}

async fn profile(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    reply(
        StatusCode::OK,
        json!({
            "_id": "u1",
            "name": "Site Admin",
            "email": TEST_EMAIL,
            "phone": "9876543210",
            "createdAt": "2024-01-15T10:00:00.000Z"
        }),
    )
}

async fn change_password(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    if body["currentPassword"].as_str() != Some(TEST_PASSWORD) {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "message": "Current password is incorrect" }),
        );
    }
    reply(
        StatusCode::OK,
        json!({ "message": "Password changed successfully" }),
    )
}

async fn list(
    State(state): State<Arc<BackendState>>,
    Path(collection): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = check_collection(&collection).and(authorize(&state, &headers)) {
        return rejection;
    }
    let items = state
        .collections
        .lock()
        .unwrap()
        .get(&collection)
        .cloned()
        .unwrap_or_default();
    reply(StatusCode::OK, Value::Array(items))
}

async fn create(
    State(state): State<Arc<BackendState>>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    request: Request,
) -> Response {
    if let Err(rejection) = check_collection(&collection).and(authorize(&state, &headers)) {
        return rejection;
    }
    let mut entity = match read_fields(request).await {
        Ok(fields) => fields,
        Err(rejection) => return rejection,
    };

    let stamp = now();
    entity.insert("_id".into(), json!(uuid::Uuid::new_v4().to_string()));
    entity.insert("createdAt".into(), json!(stamp));
    entity.insert("updatedAt".into(), json!(stamp));
    let entity = Value::Object(entity);

    state
        .collections
        .lock()
        .unwrap()
        .entry(collection)
        .or_default()
        .push(entity.clone());
    reply(StatusCode::CREATED, entity)
}

async fn update(
    State(state): State<Arc<BackendState>>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
    request: Request,
) -> Response {
    if let Err(rejection) = check_collection(&collection).and(authorize(&state, &headers)) {
        return rejection;
    }
    let fields = match read_fields(request).await {
        Ok(fields) => fields,
        Err(rejection) => return rejection,
    };

    let mut collections = state.collections.lock().unwrap();
    let entry = collections
        .get_mut(&collection)
        .and_then(|items| items.iter_mut().find(|e| e["_id"].as_str() == Some(&id)));

    match entry.and_then(Value::as_object_mut) {
        Some(entity) => {
            for (key, value) in fields {
                entity.insert(key, value);
            }
            entity.insert("updatedAt".into(), json!(now()));
            reply(StatusCode::OK, Value::Object(entity.clone()))
        }
        None => reply(StatusCode::NOT_FOUND, json!({ "message": "Not found" })),
    }
}

async fn remove(
    State(state): State<Arc<BackendState>>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = check_collection(&collection).and(authorize(&state, &headers)) {
        return rejection;
    }

    let mut collections = state.collections.lock().unwrap();
    let items = collections.entry(collection).or_default();
    let before = items.len();
    items.retain(|e| e["_id"].as_str() != Some(&id));

    if items.len() < before {
        reply(StatusCode::OK, json!({ "message": "Deleted successfully" }))
    } else {
        reply(StatusCode::NOT_FOUND, json!({ "message": "Not found" }))
    }
}

/// JSON object or multipart form. Uploaded files become CDN-style URLs;
/// the `image` part is stored as `imageUrl`. File parts without an `image/*`
/// content type are refused with 415.
async fn read_fields(request: Request) -> Result<Map<String, Value>, Response> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.starts_with("multipart/form-data"));

    if !is_multipart {
        let Json(fields) = Json::<Map<String, Value>>::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        return Ok(fields);
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(IntoResponse::into_response)?;
    let mut fields = Map::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(IntoResponse::into_response)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let is_image = field
                    .content_type()
                    .map_or(false, |mime| mime.starts_with("image/"));
                if !is_image {
                    return Err(reply(
                        StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        json!({ "message": "Only image uploads are allowed" }),
                    ));
                }
                let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;
                let key = if name == "image" { "imageUrl".to_string() } else { name };
                fields.insert(
                    key,
                    json!(format!("https://cdn.test/{}/{}", bytes.len(), file_name)),
                );
            }
            None => {
                let text = field.text().await.map_err(IntoResponse::into_response)?;
                let value = match (name.as_str(), text.parse::<u64>()) {
                    ("rating", Ok(n)) => json!(n),
                    _ => json!(text),
                };
                fields.insert(name, value);
            }
        }
    }

    Ok(fields)
}
