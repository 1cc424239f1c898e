//! Shared application state
//!
//! The controller is single-threaded; every caller (HTTP actions and the tick
//! dispatcher) goes through the mutex here so deliveries never overlap.

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use super::{TimerController, TimerSnapshot};
use crate::{error::TimerError, services::DisplayFrame, tasks::clock::TickEvent};

/// Main application state wrapping the timer controller
pub struct AppState {
    controller: Mutex<TimerController>,
    /// Latest frame pushed to the status display
    pub display_rx: watch::Receiver<DisplayFrame>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(
        controller: TimerController,
        display_rx: watch::Receiver<DisplayFrame>,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            controller: Mutex::new(controller),
            display_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Run a user action against the controller and record it as the last action
    pub fn apply<F, T>(&self, action: &str, op: F) -> Result<T, String>
    where
        F: FnOnce(&mut TimerController) -> T,
    {
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock timer controller: {}", e))?;

        let result = op(&mut *controller);
        drop(controller); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        debug!("Applied action: {}", action);
        Ok(result)
    }

    /// Like [`apply`](Self::apply) for operations that can reject their input
    pub fn try_apply<F>(&self, action: &str, op: F) -> Result<Result<TimerSnapshot, TimerError>, String>
    where
        F: FnOnce(&mut TimerController) -> Result<(), TimerError>,
    {
        self.apply(action, |controller| op(&mut *controller).map(|()| controller.snapshot()))
    }

    /// Deliver a clock event to the controller
    pub fn handle_tick(&self, event: TickEvent) -> Result<(), String> {
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock timer controller: {}", e))?;
        controller.handle_tick(event);
        Ok(())
    }

    /// Get current controller snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.controller.lock()
            .map(|controller| controller.snapshot())
            .map_err(|e| format!("Failed to lock timer controller: {}", e))
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
