mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use common::{CountingAlarm, ManualClock};
use serde_json::{json, Value};
use tower::ServiceExt;

use drooly_timer::{
    create_router,
    services::WatchDisplay,
    state::{AppState, Capabilities, ControllerOptions, TimerController},
    tasks::TickKind,
};

fn app() -> (Router, Arc<AppState>, ManualClock) {
    let clock = ManualClock::default();
    let (display, display_rx) = WatchDisplay::new();
    let controller = TimerController::new(
        1500,
        ControllerOptions::default(),
        Capabilities {
            clock: Box::new(clock.clone()),
            display: Box::new(display),
            notifier: Box::new(CountingAlarm::default()),
            sound: Box::new(CountingAlarm::default()),
        },
    );
    let state = Arc::new(AppState::new(controller, display_rx, 20554, "127.0.0.1".to_string()));
    (create_router(Arc::clone(&state)), state, clock)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn status_reports_the_idle_label() {
    let (app, _, _) = app();

    let (status, body) = send(&app, "GET", "/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["label"], "⏳");
    assert_eq!(body["timer"]["state"]["phase"], "idle");
    assert_eq!(body["timer"]["presets"], json!([5, 15, 25, 50, 90]));
    assert_eq!(body["timer"]["custom_dialog_default"], "25");
    assert_eq!(body["display"]["label"], "⏳");
}

#[tokio::test]
async fn click_starts_and_pauses() {
    let (app, _, _) = app();

    let (status, body) = send(&app, "POST", "/click", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["state"]["phase"], "running");
    assert_eq!(body["timer"]["label"], "⏳25");

    let (_, body) = send(&app, "POST", "/click", None).await;
    assert_eq!(body["timer"]["state"]["phase"], "paused");
    assert_eq!(body["timer"]["play_pause_title"], "Resume");

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["last_action"], "click");
    assert_eq!(body["display"]["label"], "⏸ PAUSED");
}

#[tokio::test]
async fn preset_route_starts_the_preset() {
    let (app, _, clock) = app();

    let (status, body) = send(&app, "POST", "/preset/15", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["state"]["default_duration_seconds"], 900);
    assert_eq!(body["timer"]["state"]["phase"], "running");
    assert_eq!(clock.live(TickKind::Countdown).len(), 1);

    let (status, body) = send(&app, "POST", "/preset/0", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["timer"]["state"]["default_duration_seconds"], 900);
}

#[tokio::test]
async fn custom_route_rejects_bad_input() {
    let (app, _, _) = app();

    let (status, body) = send(&app, "POST", "/custom", Some(json!({ "minutes": "abc" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["timer"]["state"]["phase"], "idle");
    assert_eq!(body["timer"]["state"]["remaining_seconds"], 0);

    let (status, body) = send(&app, "POST", "/custom", Some(json!({ "minutes": "1.5" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["state"]["remaining_seconds"], 90);
}

#[tokio::test]
async fn ticks_reach_the_controller_through_app_state() {
    let (app, state, clock) = app();
    send(&app, "POST", "/start", None).await;

    state.handle_tick(clock.event(TickKind::Countdown)).unwrap();

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["timer"]["state"]["remaining_seconds"], 1499);

    let (_, body) = send(&app, "POST", "/reset", None).await;
    assert_eq!(body["timer"]["state"]["remaining_seconds"], 1500);
    assert_eq!(body["timer"]["state"]["phase"], "idle");
    assert_eq!(clock.live_count(), 0);
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _, _) = app();

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
