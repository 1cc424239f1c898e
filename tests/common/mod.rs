#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use drooly_timer::{
    services::{DisplaySink, Notifier, SoundPlayer},
    state::{Capabilities, ControllerOptions, TimerController},
    tasks::{Clock, SubscriptionId, TickEvent, TickKind},
};

/// Clock that never fires on its own; tests deliver ticks by hand
#[derive(Clone, Default)]
pub struct ManualClock {
    inner: Arc<Mutex<ClockInner>>,
}

#[derive(Default)]
struct ClockInner {
    next_id: u64,
    live: Vec<(SubscriptionId, TickKind, Duration)>,
}

impl ManualClock {
    pub fn live(&self, kind: TickKind) -> Vec<SubscriptionId> {
        self.inner
            .lock()
            .unwrap()
            .live
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(id, _, _)| *id)
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.inner.lock().unwrap().live.len()
    }

    pub fn interval_of(&self, id: SubscriptionId) -> Option<Duration> {
        self.inner
            .lock()
            .unwrap()
            .live
            .iter()
            .find(|(live, _, _)| *live == id)
            .map(|(_, _, interval)| *interval)
    }

    /// The single live subscription of `kind` as a deliverable event
    pub fn event(&self, kind: TickKind) -> TickEvent {
        let live = self.live(kind);
        assert_eq!(live.len(), 1, "expected exactly one live {:?} subscription", kind);
        TickEvent { id: live[0], kind }
    }
}

impl Clock for ManualClock {
    fn subscribe(&mut self, kind: TickKind, interval: Duration) -> SubscriptionId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = SubscriptionId::new(inner.next_id);
        inner.live.push((id, kind, interval));
        id
    }

    fn cancel(&mut self, id: SubscriptionId) {
        self.inner.lock().unwrap().live.retain(|(live, _, _)| *live != id);
    }
}

#[derive(Clone, Default)]
pub struct RecordingDisplay {
    pub labels: Arc<Mutex<Vec<String>>>,
    pub titles: Arc<Mutex<Vec<String>>>,
}

impl RecordingDisplay {
    pub fn last_label(&self) -> String {
        self.labels.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn last_title(&self) -> String {
        self.titles.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl DisplaySink for RecordingDisplay {
    fn set_label(&mut self, text: &str) {
        self.labels.lock().unwrap().push(text.to_string());
    }

    fn set_play_pause_title(&mut self, title: &str) {
        self.titles.lock().unwrap().push(title.to_string());
    }
}

/// Counts calls and optionally fails every one of them
#[derive(Clone, Default)]
pub struct CountingAlarm {
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
}

impl CountingAlarm {
    pub fn failing() -> Self {
        Self {
            calls: Arc::default(),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("delivery failed");
        }
        Ok(())
    }
}

impl Notifier for CountingAlarm {
    fn notify_expired(&self) -> anyhow::Result<()> {
        self.hit()
    }
}

impl SoundPlayer for CountingAlarm {
    fn play_alarm(&self) -> anyhow::Result<()> {
        self.hit()
    }
}

pub struct Harness {
    pub controller: TimerController,
    pub clock: ManualClock,
    pub display: RecordingDisplay,
    pub notifier: CountingAlarm,
    pub sound: CountingAlarm,
}

impl Harness {
    pub fn new(default_duration_seconds: u64) -> Self {
        Self::build(default_duration_seconds, ControllerOptions::default(), CountingAlarm::default(), CountingAlarm::default())
    }

    pub fn build(
        default_duration_seconds: u64,
        options: ControllerOptions,
        notifier: CountingAlarm,
        sound: CountingAlarm,
    ) -> Self {
        let clock = ManualClock::default();
        let display = RecordingDisplay::default();
        let controller = TimerController::new(
            default_duration_seconds,
            options,
            Capabilities {
                clock: Box::new(clock.clone()),
                display: Box::new(display.clone()),
                notifier: Box::new(notifier.clone()),
                sound: Box::new(sound.clone()),
            },
        );

        Self {
            controller,
            clock,
            display,
            notifier,
            sound,
        }
    }

    /// Deliver `n` countdown ticks through the live subscription
    pub fn tick_n(&mut self, n: usize) {
        for _ in 0..n {
            let event = self.clock.event(TickKind::Countdown);
            self.controller.handle_tick(event);
        }
    }
}
