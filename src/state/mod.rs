//! State management module
//!
//! This module contains the countdown state, its formatting, the controller
//! state machine and the shared wrapper the host drives it through.

pub mod timer_state;
pub mod display;
pub mod controller;
pub mod app_state;

// Re-export main types
pub use timer_state::{Phase, TimerState};
pub use controller::{Capabilities, ControllerOptions, TimerController, TimerSnapshot};
pub use app_state::AppState;
