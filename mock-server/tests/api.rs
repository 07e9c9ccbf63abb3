use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_log, RecordedRequest, RequestLog, NOT_FOUND_BODY};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn fetch_request(uri: &str) -> Request<String> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header("user_id", "your-user-id")
        .body(String::new())
        .unwrap()
}

// --- root ---

#[tokio::test]
async fn root_returns_plain_text_404() {
    let resp = app().oneshot(fetch_request("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(resp.headers()[http::header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(body_bytes(resp).await, NOT_FOUND_BODY.as_bytes());
}

#[tokio::test]
async fn root_request_is_recorded_with_headers() {
    let log = RequestLog::default();
    let resp = app_with_log(log.clone())
        .oneshot(fetch_request("/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let recorded = log.snapshot().await;
    assert_eq!(recorded.len(), 1);
    let entry = &recorded[0];
    assert_eq!(entry.method, "GET");
    assert_eq!(entry.path, "/");
    assert_eq!(entry.header("content-type"), Some("application/json"));
    assert_eq!(entry.header("user_id"), Some("your-user-id"));
    assert!(entry.body.is_empty());
}

// --- health ---

#[tokio::test]
async fn health_returns_ok() {
    let log = RequestLog::default();
    let resp = app_with_log(log.clone())
        .oneshot(Request::builder().uri("/health").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "OK");
    assert_eq!(log.len().await, 1);
}

// --- other paths ---

#[tokio::test]
async fn unknown_path_records_body_and_query() {
    let log = RequestLog::default();
    let resp = app_with_log(log.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/category?page=2")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(r#"{"name":"x"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let recorded = log.snapshot().await;
    assert_eq!(recorded[0].method, "POST");
    assert_eq!(recorded[0].path, "/api/v1/category?page=2");
    assert_eq!(recorded[0].body, r#"{"name":"x"}"#);
}

// --- introspection ---

#[tokio::test]
async fn requests_endpoint_lists_log_without_recording_itself() {
    let log = RequestLog::default();
    let router = app_with_log(log.clone());

    router.clone().oneshot(fetch_request("/")).await.unwrap();
    router.clone().oneshot(fetch_request("/")).await.unwrap();

    let resp = router
        .oneshot(Request::builder().uri("/__requests").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let listed: Vec<RecordedRequest> = body_json(resp).await;
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|r| r.path == "/"));
    assert_eq!(log.len().await, 2);
}
