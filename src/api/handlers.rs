//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    error::TimerError,
    state::{AppState, TimerController},
};
use super::responses::{ActionResponse, CustomDurationRequest, HealthResponse, StatusResponse};

type ActionResult = Result<Json<ActionResponse>, StatusCode>;
type CheckedActionResult = Result<(StatusCode, Json<ActionResponse>), StatusCode>;

/// Apply an infallible controller operation and report the new state
fn run_action<F>(state: &AppState, action: &str, message: &str, op: F) -> ActionResult
where
    F: FnOnce(&mut TimerController),
{
    match state.apply(action, |controller| {
        op(&mut *controller);
        controller.snapshot()
    }) {
        Ok(timer) => {
            info!("{} endpoint called - {}", action, timer.label);
            Ok(Json(ActionResponse::ok(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to apply {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Apply an operation that may reject its input; rejections answer 422
fn run_checked_action<F>(state: &AppState, action: &str, message: String, op: F) -> CheckedActionResult
where
    F: FnOnce(&mut TimerController) -> Result<(), TimerError>,
{
    match state.try_apply(action, op) {
        Ok(Ok(timer)) => {
            info!("{} endpoint called - {}", action, timer.label);
            Ok((StatusCode::OK, Json(ActionResponse::ok(message, timer))))
        }
        Ok(Err(rejection)) => {
            warn!("{} rejected: {}", action, rejection);
            match state.snapshot() {
                Ok(timer) => Ok((
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ActionResponse::rejected(rejection.to_string(), timer)),
                )),
                Err(e) => {
                    error!("Failed to read timer state: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
        Err(e) => {
            error!("Failed to apply {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /click - Left click on the status item
pub async fn click_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    run_action(&state, "click", "Status item clicked", TimerController::primary_click)
}

/// Handle POST /play-pause - Play/Pause menu entry
pub async fn play_pause_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    run_action(&state, "play-pause", "Play/pause toggled", TimerController::toggle_play_pause)
}

/// Handle POST /start
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    run_action(&state, "start", "Timer started", TimerController::start)
}

/// Handle POST /pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    run_action(&state, "pause", "Timer paused", TimerController::pause)
}

/// Handle POST /resume
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    run_action(&state, "resume", "Timer resumed", TimerController::resume)
}

/// Handle POST /reset - Reset Timer menu entry
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    run_action(&state, "reset", "Timer reset", TimerController::reset)
}

/// Handle POST /preset/:minutes - Preset submenu entry
pub async fn preset_handler(
    State(state): State<Arc<AppState>>,
    Path(minutes): Path<u32>,
) -> CheckedActionResult {
    run_checked_action(
        &state,
        "preset",
        format!("{} minute preset started", minutes),
        |controller| controller.set_preset(minutes),
    )
}

/// Handle POST /custom - Custom Timer dialog confirmed
pub async fn custom_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CustomDurationRequest>,
) -> CheckedActionResult {
    run_checked_action(
        &state,
        "custom",
        format!("Custom timer of {} minutes started", request.minutes.trim()),
        |controller| controller.set_custom_duration(&request.minutes),
    )
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        display: state.display_rx.borrow().clone(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
