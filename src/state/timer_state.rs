//! Timer state structure and management

use serde::{Deserialize, Serialize};

/// Lifecycle phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
        }
    }
}

/// Countdown state owned by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Seconds left to count down
    pub remaining_seconds: u64,
    /// Seconds used when (re)starting from zero
    pub default_duration_seconds: u64,
    pub phase: Phase,
}

impl TimerState {
    /// Create the start state: idle with nothing on the clock
    pub fn new(default_duration_seconds: u64) -> Self {
        Self {
            remaining_seconds: 0,
            default_duration_seconds,
            phase: Phase::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    /// Idle with a duration loaded but not started
    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Idle && self.remaining_seconds > 0
    }

    /// Remove one second, never going below zero. Returns true once the clock reads zero.
    pub fn decrement(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }
}
