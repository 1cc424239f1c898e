//! Countdown controller
//!
//! Translates user actions and clock ticks into [`TimerState`] transitions and
//! pushes the rendered label to the display after every change.
//!
//! ```text
//! Idle    --start-->              Running
//! Running --pause-->              Paused
//! Paused  --resume/start-->       Running
//! Running --tick reaches 0-->     Idle      (notify + alarm)
//! any     --reset-->              Idle
//! any     --preset/custom-->      Running   (via Idle)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    display::{format_label, play_pause_title},
    Phase, TimerState,
};
use crate::{
    error::{TimerError, MAX_DURATION_SECONDS},
    services::{DisplaySink, Notifier, SoundPlayer},
    tasks::clock::{Clock, SubscriptionId, TickEvent, TickKind, BLINK_INTERVAL, COUNTDOWN_INTERVAL},
};

/// Presentation and menu settings, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Show `m:ss` instead of whole minutes
    pub verbose_time: bool,
    /// Alternate the paused label between "PAUSED" and the time
    pub blink: bool,
    /// Preset started by a primary click while idle
    pub quick_start_minutes: u32,
    /// Presets offered in the menu
    pub presets: Vec<u32>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            verbose_time: false,
            blink: true,
            quick_start_minutes: 25,
            presets: vec![5, 15, 25, 50, 90],
        }
    }
}

/// Everything the controller calls out to
pub struct Capabilities {
    pub clock: Box<dyn Clock>,
    pub display: Box<dyn DisplaySink>,
    pub notifier: Box<dyn Notifier>,
    pub sound: Box<dyn SoundPlayer>,
}

/// Read-only view of the controller for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub label: String,
    pub play_pause_title: String,
    pub presets: Vec<u32>,
    pub custom_dialog_default: String,
}

/// Parse custom-dialog input into a duration in whole seconds.
///
/// Input is a real number of minutes. Fractional seconds round up so any
/// positive input yields at least one second.
pub fn parse_custom_minutes(raw: &str) -> Result<u64, TimerError> {
    let trimmed = raw.trim();
    let minutes: f64 = trimmed
        .parse()
        .map_err(|_| TimerError::InvalidDuration(trimmed.to_string()))?;

    if minutes.is_nan() {
        return Err(TimerError::InvalidDuration(trimmed.to_string()));
    }
    if minutes <= 0.0 {
        return Err(TimerError::NonPositiveDuration(minutes));
    }

    let seconds = (minutes * 60.0).ceil();
    if !seconds.is_finite() || seconds > MAX_DURATION_SECONDS as f64 {
        return Err(TimerError::DurationTooLong(minutes));
    }

    Ok(seconds as u64)
}

pub struct TimerController {
    state: TimerState,
    show_paused_text: bool,
    countdown_sub: Option<SubscriptionId>,
    blink_sub: Option<SubscriptionId>,
    options: ControllerOptions,
    caps: Capabilities,
}

impl TimerController {
    /// Create an idle controller with nothing on the clock and render it once
    pub fn new(default_duration_seconds: u64, options: ControllerOptions, caps: Capabilities) -> Self {
        let mut controller = Self {
            state: TimerState::new(default_duration_seconds.max(1)),
            show_paused_text: false,
            countdown_sub: None,
            blink_sub: None,
            options,
            caps,
        };
        controller.render();
        controller
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state.remaining_seconds
    }

    pub fn default_duration_seconds(&self) -> u64 {
        self.state.default_duration_seconds
    }

    pub fn show_paused_text(&self) -> bool {
        self.show_paused_text
    }

    pub fn presets(&self) -> &[u32] {
        &self.options.presets
    }

    /// Text pre-filled in the custom duration dialog
    pub fn custom_dialog_default(&self) -> String {
        (self.state.default_duration_seconds / 60).to_string()
    }

    pub fn label(&self) -> String {
        format_label(
            self.state.remaining_seconds,
            self.state.phase,
            self.show_paused_text,
            self.options.verbose_time,
        )
    }

    pub fn play_pause_title(&self) -> &'static str {
        play_pause_title(self.state.phase)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state.clone(),
            label: self.label(),
            play_pause_title: self.play_pause_title().to_string(),
            presets: self.options.presets.clone(),
            custom_dialog_default: self.custom_dialog_default(),
        }
    }

    /// Start counting down, loading the default duration if nothing is left
    pub fn start(&mut self) {
        if self.state.remaining_seconds == 0 {
            self.state.remaining_seconds = self.state.default_duration_seconds;
        }

        self.cancel_ticks();
        self.state.phase = Phase::Running;
        self.show_paused_text = false;
        self.countdown_sub = Some(self.caps.clock.subscribe(TickKind::Countdown, COUNTDOWN_INTERVAL));

        info!("Timer running with {}s remaining", self.state.remaining_seconds);
        self.render();
    }

    pub fn pause(&mut self) {
        if !self.state.is_running() {
            debug!("Pause ignored in {} phase", self.state.phase.as_str());
            return;
        }

        self.cancel_ticks();
        self.state.phase = Phase::Paused;
        self.show_paused_text = self.options.blink;
        if self.options.blink {
            self.blink_sub = Some(self.caps.clock.subscribe(TickKind::Blink, BLINK_INTERVAL));
        }

        info!("Timer paused with {}s remaining", self.state.remaining_seconds);
        self.render();
    }

    /// Continue a paused countdown from where it stopped
    pub fn resume(&mut self) {
        if !self.state.is_paused() {
            debug!("Resume ignored in {} phase", self.state.phase.as_str());
            return;
        }
        self.start();
    }

    pub fn toggle_play_pause(&mut self) {
        match self.state.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Idle if self.state.remaining_seconds > 0 => self.start(),
            Phase::Idle => debug!("Nothing to play"),
        }
    }

    /// Left click on the status item.
    ///
    /// Idle starts the quick-start preset; otherwise behaves like play/pause.
    pub fn primary_click(&mut self) {
        match self.state.phase {
            Phase::Idle => {
                let minutes = self.options.quick_start_minutes;
                if let Err(e) = self.set_preset(minutes) {
                    warn!("Quick start rejected: {}", e);
                }
            }
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
        }
    }

    /// Stop and load the default duration without starting
    pub fn reset(&mut self) {
        self.cancel_ticks();
        self.state.remaining_seconds = self.state.default_duration_seconds;
        self.state.phase = Phase::Idle;
        self.show_paused_text = false;

        info!("Timer reset to {}s", self.state.default_duration_seconds);
        self.render();
    }

    /// Make `minutes` the new default and start it immediately
    pub fn set_preset(&mut self, minutes: u32) -> Result<(), TimerError> {
        if minutes == 0 {
            return Err(TimerError::ZeroPreset);
        }
        info!("Preset selected: {} minutes", minutes);
        self.apply_duration(u64::from(minutes) * 60);
        Ok(())
    }

    /// Apply raw custom dialog input. Invalid input leaves everything untouched.
    pub fn set_custom_duration(&mut self, raw: &str) -> Result<(), TimerError> {
        let seconds = parse_custom_minutes(raw)?;
        info!("Custom duration selected: {}s", seconds);
        self.apply_duration(seconds);
        Ok(())
    }

    /// Route a clock delivery. Deliveries from cancelled subscriptions are dropped.
    pub fn handle_tick(&mut self, event: TickEvent) {
        match event.kind {
            TickKind::Countdown if self.countdown_sub == Some(event.id) => self.tick(),
            TickKind::Blink if self.blink_sub == Some(event.id) => self.blink(),
            kind => debug!("Dropping stale {:?} tick {}", kind, event.id.raw()),
        }
    }

    /// One second elapsed while running
    pub fn tick(&mut self) {
        if !self.state.is_running() {
            debug!("Tick ignored in {} phase", self.state.phase.as_str());
            return;
        }

        let expired = self.state.decrement();
        self.render();

        if expired {
            self.cancel_ticks();
            self.state.phase = Phase::Idle;
            info!("Timer expired");
            self.fire_expiry();
            self.render();
        }
    }

    /// Flip the paused label between text and time
    pub fn blink(&mut self) {
        if !self.state.is_paused() {
            debug!("Blink ignored in {} phase", self.state.phase.as_str());
            return;
        }
        self.show_paused_text = !self.show_paused_text;
        self.render();
    }

    fn apply_duration(&mut self, seconds: u64) {
        self.cancel_ticks();
        self.state.default_duration_seconds = seconds;
        self.state.remaining_seconds = seconds;
        self.state.phase = Phase::Idle;
        self.start();
    }

    fn cancel_ticks(&mut self) {
        if let Some(id) = self.countdown_sub.take() {
            self.caps.clock.cancel(id);
        }
        if let Some(id) = self.blink_sub.take() {
            self.caps.clock.cancel(id);
        }
    }

    fn fire_expiry(&self) {
        if let Err(e) = self.caps.notifier.notify_expired() {
            warn!("Failed to send expiry notification: {:#}", e);
        }
        if let Err(e) = self.caps.sound.play_alarm() {
            warn!("Failed to play alarm: {:#}", e);
        }
    }

    fn render(&mut self) {
        let label = self.label();
        let title = self.play_pause_title();
        self.caps.display.set_label(&label);
        self.caps.display.set_play_pause_title(title);
    }
}
