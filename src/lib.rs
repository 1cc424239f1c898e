//! Drooly Timer - A menu-bar style countdown timer
//!
//! This library provides the countdown state machine, its label formatting,
//! and the clock, display, notification and sound capabilities it drives.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, Phase, TimerController, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
