//! In-memory stand-in for the See API, used to exercise the client over
//! real HTTP in tests.
//!
//! Answers every route the client calls with the `{code, message, data}`
//! envelope, rejects requests whose `Authorization` header does not match
//! the configured key, and records each request it receives.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;
use uuid::Uuid;

pub const DOMAINS: [&str; 2] = ["s.ee", "2.sb"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct Link {
    pub domain: String,
    pub slug: String,
    pub target_url: String,
    pub title: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TextShare {
    pub domain: String,
    pub slug: String,
    pub content: String,
    pub title: Option<String>,
}

#[derive(Default)]
struct Store {
    links: HashMap<(String, String), Link>,
    texts: HashMap<(String, String), TextShare>,
    files: HashMap<String, usize>,
    requests: Vec<RecordedRequest>,
}

/// Shared server state. Clone it before handing it to `app_with_state` to
/// keep a handle for inspecting recorded requests.
#[derive(Clone)]
pub struct MockState {
    api_key: Arc<str>,
    store: Arc<Mutex<Store>>,
}

impl MockState {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: Arc::from(api_key),
            store: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.store.lock().unwrap().requests.clone()
    }

    pub fn link(&self, domain: &str, slug: &str) -> Option<Link> {
        let key = (domain.to_string(), slug.to_string());
        self.store.lock().unwrap().links.get(&key).cloned()
    }

    pub fn text(&self, domain: &str, slug: &str) -> Option<TextShare> {
        let key = (domain.to_string(), slug.to_string());
        self.store.lock().unwrap().texts.get(&key).cloned()
    }

    /// Record the request and check its credentials.
    fn admit(&self, method: &Method, uri: &Uri, headers: &HeaderMap, body: &[u8]) -> Result<(), Reply> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let recorded = RecordedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            authorization: header("authorization"),
            content_type: header("content-type"),
            user_agent: header("user-agent"),
            body: body.to_vec(),
        };
        debug!(method = %recorded.method, path = %recorded.path, "mock request");
        let authorized = recorded.authorization.as_deref() == Some(&*self.api_key);
        self.store.lock().unwrap().requests.push(recorded);

        if authorized {
            Ok(())
        } else {
            Err(failure(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Invalid API key"))
        }
    }
}

type Reply = (StatusCode, Json<Value>);

fn success(data: Value) -> Reply {
    (StatusCode::OK, Json(json!({"code": 200, "message": "success", "data": data})))
}

fn failure(status: StatusCode, code: &str, message: &str) -> Reply {
    (status, Json(json!({"code": code, "message": message})))
}

fn parse<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, Reply> {
    serde_json::from_slice(body).map_err(|e| failure(StatusCode::BAD_REQUEST, "INVALID_REQUEST", &e.to_string()))
}

fn known_domain(domain: &str) -> Result<(), Reply> {
    if DOMAINS.contains(&domain) {
        Ok(())
    } else {
        Err(failure(StatusCode::BAD_REQUEST, "INVALID_DOMAIN", "Unknown domain"))
    }
}

fn new_slug() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_string()
}

pub fn app(api_key: &str) -> Router {
    app_with_state(MockState::new(api_key))
}

pub fn app_with_state(state: MockState) -> Router {
    Router::new()
        .route("/shorten", post(create_link).put(update_link).delete(delete_link))
        .route("/domains", get(list_domains))
        .route("/tags", get(list_tags))
        .route("/text", post(create_text).put(update_text).delete(delete_text))
        .route("/text/domains", get(list_domains))
        .route("/file/upload", post(upload_file))
        .route("/file/delete/{hash}", get(delete_file))
        .route("/file/domains", get(list_domains))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

#[derive(Deserialize)]
struct CreateLink {
    domain: String,
    target_url: String,
    custom_slug: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
struct UpdateLink {
    domain: String,
    slug: String,
    target_url: String,
    title: String,
}

#[derive(Deserialize)]
struct Target {
    domain: String,
    slug: String,
}

#[derive(Deserialize)]
struct CreateText {
    content: String,
    title: Option<String>,
}

#[derive(Deserialize)]
struct UpdateText {
    content: String,
    domain: String,
    slug: String,
    title: Option<String>,
}

async fn create_link(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Reply, Reply> {
    state.admit(&method, &uri, &headers, &body)?;
    let input: CreateLink = parse(&body)?;
    known_domain(&input.domain)?;

    let mut store = state.store.lock().unwrap();
    let slug = input.custom_slug.clone().unwrap_or_else(new_slug);
    let key = (input.domain.clone(), slug.clone());
    if store.links.contains_key(&key) {
        return Err(failure(StatusCode::CONFLICT, "SLUG_EXISTS", "Slug already in use"));
    }
    let short_url = format!("https://{}/{slug}", input.domain);
    store.links.insert(
        key,
        Link {
            domain: input.domain,
            slug: slug.clone(),
            target_url: input.target_url,
            title: input.title,
        },
    );
    Ok(success(json!({
        "short_url": short_url,
        "slug": slug,
        "custom_slug": input.custom_slug,
    })))
}

async fn update_link(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Reply, Reply> {
    state.admit(&method, &uri, &headers, &body)?;
    let input: UpdateLink = parse(&body)?;
    let mut store = state.store.lock().unwrap();
    let link = store
        .links
        .get_mut(&(input.domain.clone(), input.slug.clone()))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "NOT_FOUND", "Short URL not found"))?;
    link.target_url = input.target_url;
    link.title = Some(input.title);
    Ok(success(json!({
        "short_url": format!("https://{}/{}", input.domain, input.slug),
        "slug": input.slug,
    })))
}

async fn delete_link(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Reply, Reply> {
    state.admit(&method, &uri, &headers, &body)?;
    let input: Target = parse(&body)?;
    let mut store = state.store.lock().unwrap();
    store
        .links
        .remove(&(input.domain.clone(), input.slug.clone()))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "NOT_FOUND", "Short URL not found"))?;
    Ok(success(json!({
        "short_url": format!("https://{}/{}", input.domain, input.slug),
        "slug": input.slug,
    })))
}

async fn list_domains(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Reply, Reply> {
    state.admit(&method, &uri, &headers, &[])?;
    Ok(success(json!({ "domains": DOMAINS })))
}

async fn list_tags(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Reply, Reply> {
    state.admit(&method, &uri, &headers, &[])?;
    Ok(success(json!({ "tags": [{"id": 1, "name": "work"}, {"id": 2, "name": "personal"}] })))
}

async fn create_text(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Reply, Reply> {
    state.admit(&method, &uri, &headers, &body)?;
    let input: CreateText = parse(&body)?;
    if input.content.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "EMPTY_CONTENT", "Content is required"));
    }
    let domain = DOMAINS[0].to_string();
    let slug = new_slug();
    let short_url = format!("https://{domain}/{slug}");
    state.store.lock().unwrap().texts.insert(
        (domain.clone(), slug.clone()),
        TextShare {
            domain,
            slug: slug.clone(),
            content: input.content,
            title: input.title,
        },
    );
    Ok(success(json!({"custom_slug": "", "short_url": short_url, "slug": slug})))
}

async fn update_text(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Reply, Reply> {
    state.admit(&method, &uri, &headers, &body)?;
    let input: UpdateText = parse(&body)?;
    let mut store = state.store.lock().unwrap();
    let share = store
        .texts
        .get_mut(&(input.domain.clone(), input.slug.clone()))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "NOT_FOUND", "Text share not found"))?;
    share.content = input.content;
    if input.title.is_some() {
        share.title = input.title;
    }
    Ok(success(json!({"code": 0, "data": {"tags": []}, "message": "Updated"})))
}

async fn delete_text(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Reply, Reply> {
    state.admit(&method, &uri, &headers, &body)?;
    let input: Target = parse(&body)?;
    state
        .store
        .lock()
        .unwrap()
        .texts
        .remove(&(input.domain, input.slug))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "NOT_FOUND", "Text share not found"))?;
    Ok(success(json!({"code": 0, "data": {"tags": []}, "message": "Deleted"})))
}

async fn upload_file(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Reply, Reply> {
    state.admit(&method, &uri, &headers, &body)?;
    if body.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "EMPTY_FILE", "No file content"));
    }
    let hash = Uuid::new_v4().simple().to_string();
    let mut store = state.store.lock().unwrap();
    store.files.insert(hash.clone(), body.len());
    let file_id = store.files.len();
    Ok(success(json!({
        "delete": format!("del-{hash}"),
        "file_id": file_id,
        "filename": "upload.bin",
        "hash": hash,
        "height": 0,
        "width": 0,
        "page": format!("https://{}/f/{hash}", DOMAINS[0]),
        "path": format!("/f/{hash}"),
        "size": body.len(),
        "storename": format!("{hash}.bin"),
        "upload_status": 1,
        "url": format!("https://{}/f/{hash}", DOMAINS[0]),
    })))
}

async fn delete_file(
    State(state): State<MockState>,
    Path(hash): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Reply, Reply> {
    state.admit(&method, &uri, &headers, &[])?;
    state
        .store
        .lock()
        .unwrap()
        .files
        .remove(&hash)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "NOT_FOUND", "File not found"))?;
    Ok((StatusCode::OK, Json(json!({"code": "200", "message": "Deleted", "success": true}))))
}
