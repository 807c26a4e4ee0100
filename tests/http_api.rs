//! HTTP routes driven in-process through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use songrank::server::router;
use songrank_core::models::NewRecommendation;
use songrank_core::random::FixedRandom;
use songrank_core::store::memory::InMemoryStore;
use songrank_core::ScoringEngine;

const LINK: &str = "https://www.youtube.com/watch?v=chwyjJbcs1Y";

fn app_with(store: Arc<InMemoryStore>, test_mode: bool) -> Router {
    let engine = ScoringEngine::new(store, Arc::new(FixedRandom::new(0.3, 0)));
    router(engine, test_mode)
}

fn app() -> (Arc<InMemoryStore>, Router) {
    let store = Arc::new(InMemoryStore::new());
    (store.clone(), app_with(store, false))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn valid_input() -> Value {
    json!({ "name": "Falamansa - Xote dos Milagres", "youtubeLink": LINK })
}

// ─── POST /recommendations ──────────────────────────────────────────

#[tokio::test]
async fn create_returns_201_and_stores_row() {
    let (store, app) = app();
    let (status, body) = send(&app, "POST", "/recommendations", Some(valid_input())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Falamansa - Xote dos Milagres");
    assert_eq!(body["youtubeLink"], LINK);
    assert_eq!(body["score"], 0);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn create_with_misspelled_field_is_422() {
    let (store, app) = app();
    let input = json!({ "name": "Falamansa - Xote dos Milagres", "youtuubeLink": LINK });
    let (status, body) = send(&app, "POST", "/recommendations", Some(input)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation");
    assert!(store.is_empty());
}

#[tokio::test]
async fn create_with_bad_shapes_is_422() {
    let (store, app) = app();

    for input in [
        json!({ "name": "x" }),
        json!({ "name": 5, "youtubeLink": LINK }),
        json!({ "name": "", "youtubeLink": LINK }),
        json!({ "name": "x", "youtubeLink": "  " }),
        json!({ "name": "x", "youtubeLink": LINK, "score": 100 }),
    ] {
        let (status, _) = send(&app, "POST", "/recommendations", Some(input.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "input: {}", input);
    }

    let request = Request::builder()
        .method("POST")
        .uri("/recommendations")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let request = Request::builder()
        .method("POST")
        .uri("/recommendations")
        .body(Body::from(valid_input().to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(store.is_empty());
}

#[tokio::test]
async fn create_duplicate_name_is_409_and_keeps_one_row() {
    let (store, app) = app();
    send(&app, "POST", "/recommendations", Some(valid_input())).await;
    let (status, body) = send(&app, "POST", "/recommendations", Some(valid_input())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");
    assert_eq!(body["error"]["message"], "Recommendations names must be unique");
    assert_eq!(store.len(), 1);
}

// ─── GET routes ─────────────────────────────────────────────────────

#[tokio::test]
async fn list_returns_array() {
    let (store, app) = app();
    let (status, body) = send(&app, "GET", "/recommendations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    store
        .insert_with_score(&NewRecommendation::new("a", LINK), 3)
        .unwrap();
    store
        .insert_with_score(&NewRecommendation::new("b", LINK), 1)
        .unwrap();
    let (_, first) = send(&app, "GET", "/recommendations", None).await;
    let (_, second) = send(&app, "GET", "/recommendations", None).await;
    assert_eq!(first.as_array().unwrap().len(), 2);
    assert_eq!(first[0]["name"], "a");
    assert_eq!(first, second);
}

#[tokio::test]
async fn get_by_id_found_missing_and_malformed() {
    let (store, app) = app();
    let rec = store
        .insert_with_score(&NewRecommendation::new("a", LINK), 0)
        .unwrap();

    let (status, body) = send(&app, "GET", &format!("/recommendations/{}", rec.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], rec.id);

    let (status, body) = send(&app, "GET", "/recommendations/-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    let (status, _) = send(&app, "GET", "/recommendations/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn top_returns_highest_scores() {
    let (store, app) = app();
    let (status, body) = send(&app, "GET", "/recommendations/top/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for score in 0..10 {
        store
            .insert_with_score(&NewRecommendation::new(format!("song {}", score), LINK), score)
            .unwrap();
    }

    let (_, body) = send(&app, "GET", "/recommendations/top/1", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["score"], 9);

    let (_, body) = send(&app, "GET", "/recommendations/top/5", None).await;
    assert_eq!(body.as_array().unwrap().len(), 5);

    let (status, _) = send(&app, "GET", "/recommendations/top/-2", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn random_empty_is_404_and_nonempty_is_200() {
    let (store, app) = app();
    let (status, body) = send(&app, "GET", "/recommendations/random", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    store
        .insert_with_score(&NewRecommendation::new("low", LINK), 2)
        .unwrap();
    store
        .insert_with_score(&NewRecommendation::new("high", LINK), 40)
        .unwrap();

    // draw 0.3 < 0.7 selects the high-score pool
    let (status, body) = send(&app, "GET", "/recommendations/random", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "high");
}

// ─── votes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn upvote_and_downvote() {
    let (store, app) = app();
    let rec = store
        .insert_with_score(&NewRecommendation::new("a", LINK), 0)
        .unwrap();

    let (status, _) = send(&app, "POST", &format!("/recommendations/{}/upvote", rec.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", &format!("/recommendations/{}", rec.id), None).await;
    assert_eq!(body["score"], 1);

    let (status, _) =
        send(&app, "POST", &format!("/recommendations/{}/downvote", rec.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", &format!("/recommendations/{}", rec.id), None).await;
    assert_eq!(body["score"], 0);

    let (status, _) = send(&app, "POST", "/recommendations/999/upvote", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "POST", "/recommendations/999/downvote", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn downvote_past_threshold_removes() {
    let (store, app) = app();
    let rec = store
        .insert_with_score(&NewRecommendation::new("a", LINK), -5)
        .unwrap();
    let uri = format!("/recommendations/{}/downvote", rec.id);

    let (status, _) = send(&app, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(store.is_empty());

    let (status, _) = send(&app, "GET", &format!("/recommendations/{}", rec.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── misc ───────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_version() {
    let (_, app) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn reset_only_in_test_mode() {
    let (store, app) = app();
    store
        .insert_with_score(&NewRecommendation::new("a", LINK), 0)
        .unwrap();
    let (status, _) = send(&app, "DELETE", "/recommendations", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(store.len(), 1);

    let app = app_with(store.clone(), true);
    let (status, _) = send(&app, "DELETE", "/recommendations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(store.is_empty());
}
