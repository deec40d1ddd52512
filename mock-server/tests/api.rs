use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_state, MockState};
use serde_json::Value;
use tower::ServiceExt;

const KEY: &str = "test-key";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, KEY)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, KEY)
        .body(String::new())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_authorization_is_rejected() {
    let resp = app(KEY)
        .oneshot(Request::builder().uri("/domains").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn requests_are_recorded() {
    let state = MockState::new(KEY);
    let resp = app_with_state(state.clone())
        .oneshot(json_request("POST", "/shorten", r#"{"domain":"s.ee","target_url":"https://example.com"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let requests = state.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/shorten");
    assert_eq!(requests[0].authorization.as_deref(), Some(KEY));
}

// --- listings ---

#[tokio::test]
async fn list_domains_returns_envelope() {
    for uri in ["/domains", "/text/domains", "/file/domains"] {
        let resp = app(KEY).oneshot(get_request(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let body = body_json(resp).await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"]["domains"][0], "s.ee", "{uri}");
    }
}

#[tokio::test]
async fn list_tags_returns_tags() {
    let resp = app(KEY).oneshot(get_request("/tags")).await.unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"]["tags"][0]["name"], "work");
}

// --- shorten ---

#[tokio::test]
async fn create_with_custom_slug() {
    let state = MockState::new(KEY);
    let resp = app_with_state(state.clone())
        .oneshot(json_request(
            "POST",
            "/shorten",
            r#"{"domain":"s.ee","target_url":"https://example.com","custom_slug":"hello"}"#,
        ))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["data"]["slug"], "hello");
    assert_eq!(body["data"]["short_url"], "https://s.ee/hello");
    assert_eq!(state.link("s.ee", "hello").unwrap().target_url, "https://example.com");
}

#[tokio::test]
async fn duplicate_slug_conflicts() {
    let state = MockState::new(KEY);
    let body = r#"{"domain":"s.ee","target_url":"https://example.com","custom_slug":"dup"}"#;
    app_with_state(state.clone())
        .oneshot(json_request("POST", "/shorten", body))
        .await
        .unwrap();
    let resp = app_with_state(state)
        .oneshot(json_request("POST", "/shorten", body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await["code"], "SLUG_EXISTS");
}

#[tokio::test]
async fn unknown_domain_is_rejected() {
    let resp = app(KEY)
        .oneshot(json_request(
            "POST",
            "/shorten",
            r#"{"domain":"nope.example","target_url":"https://example.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "INVALID_DOMAIN");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let resp = app(KEY)
        .oneshot(json_request("POST", "/shorten", "not json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn delete_missing_link_is_not_found() {
    let resp = app(KEY)
        .oneshot(json_request("DELETE", "/shorten", r#"{"domain":"s.ee","slug":"ghost"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- text ---

#[tokio::test]
async fn text_create_then_update() {
    let state = MockState::new(KEY);
    let resp = app_with_state(state.clone())
        .oneshot(json_request("POST", "/text", r#"{"content":"hello","title":"t"}"#))
        .await
        .unwrap();
    let slug = body_json(resp).await["data"]["slug"].as_str().unwrap().to_string();

    let update = format!(r#"{{"content":"updated","domain":"s.ee","slug":"{slug}"}}"#);
    let resp = app_with_state(state.clone())
        .oneshot(json_request("PUT", "/text", &update))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let share = state.text("s.ee", &slug).unwrap();
    assert_eq!(share.content, "updated");
    assert_eq!(share.title.as_deref(), Some("t"));
}

// --- files ---

#[tokio::test]
async fn upload_then_delete_file() {
    let state = MockState::new(KEY);
    let resp = app_with_state(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/file/upload")
                .header(http::header::AUTHORIZATION, KEY)
                .header(http::header::CONTENT_TYPE, "text/plain")
                .body("file-bytes".to_string())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"]["size"], 10);
    let hash = body["data"]["hash"].as_str().unwrap().to_string();

    let resp = app_with_state(state.clone())
        .oneshot(get_request(&format!("/file/delete/{hash}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);

    let resp = app_with_state(state)
        .oneshot(get_request(&format!("/file/delete/{hash}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_is_empty_404() {
    let resp = app(KEY).oneshot(get_request("/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}
