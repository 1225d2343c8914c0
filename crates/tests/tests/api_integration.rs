use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use mitra_api::{build_app_with_options, ApiOptions};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    build_app_with_options(ApiOptions {
        reply_delay: Duration::ZERO,
        ..ApiOptions::default()
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn start_session(app: &Router, language: &str) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/sessions")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "language": language }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn send_and_wait(app: &Router, session_id: &str, text: &str) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/v1/sessions/{session_id}/messages"))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": text, "wait": true }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn health_reports_status_and_metrics() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = body_json(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["supported_languages"], 5);
    assert!(parsed["metrics"]["messages_total"].is_u64());
}

#[tokio::test]
async fn languages_catalog_lists_native_names() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/languages")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = body_json(response).await;
    let entries = parsed.as_array().expect("language array");
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["code"], "en");
    assert_eq!(entries[1]["native_name"], "हिंदी");
}

#[tokio::test]
async fn session_start_seeds_localized_greeting() {
    let app = test_app();
    let session = start_session(&app, "hi").await;

    assert_eq!(session["language"], "hi");
    assert_eq!(session["pending"], false);
    let messages = session["messages"].as_array().expect("message log");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["origin"], "assistant");
    assert_eq!(
        messages[0]["text"],
        mitra_core::ui_strings(mitra_core::Language::Hi).greeting
    );
    assert_eq!(messages[0]["quick_replies"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn unknown_language_code_falls_back_to_english() {
    let app = test_app();
    let session = start_session(&app, "xx").await;

    assert_eq!(session["language"], "en");
    assert_eq!(
        session["messages"][0]["text"],
        mitra_core::ui_strings(mitra_core::Language::En).greeting
    );
}

#[tokio::test]
async fn chat_round_trip_appends_templated_reply() {
    let app = test_app();
    let session = start_session(&app, "en").await;
    let session_id = session["session_id"].as_str().unwrap();

    let result = send_and_wait(&app, session_id, "What vaccines does my baby need").await;

    assert_eq!(result["accepted"], true);
    assert_eq!(result["pending"], false);
    let messages = result["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["origin"], "user");
    assert_eq!(messages[2]["origin"], "assistant");
    assert_eq!(
        messages[2]["quick_replies"],
        json!(["Find PHC", "Child Vaccines", "Adult Vaccines"])
    );
    assert_eq!(messages[2]["emergency"], false);
}

#[tokio::test]
async fn emergency_flags_travel_on_the_wire() {
    let app = test_app();
    let session = start_session(&app, "en").await;
    let session_id = session["session_id"].as_str().unwrap();

    let result = send_and_wait(&app, session_id, "I have chest pain and can't breathe").await;

    let reply = result["messages"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(reply["emergency"], true);
    assert_eq!(reply["show_actions"], true);
    assert!(reply["text"].as_str().unwrap().contains("Call 102"));
}

#[tokio::test]
async fn blank_send_is_a_silent_noop() {
    let app = test_app();
    let session = start_session(&app, "en").await;
    let session_id = session["session_id"].as_str().unwrap();

    let result = send_and_wait(&app, session_id, "   ").await;

    assert_eq!(result["accepted"], false);
    assert_eq!(result["pending"], false);
    assert_eq!(result["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/sessions/nope/messages")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let parsed = body_json(response).await;
    assert_eq!(parsed["error"], "unknown_session");
}

#[tokio::test]
async fn teardown_removes_the_session() {
    let app = test_app();
    let session = start_session(&app, "en").await;
    let session_id = session["session_id"].as_str().unwrap().to_string();

    let delete_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/sessions/{session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(delete_response.status(), StatusCode::OK);

    let followup = app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/sessions/{session_id}/messages"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(followup.status(), StatusCode::NOT_FOUND);
}
