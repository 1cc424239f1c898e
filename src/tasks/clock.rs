//! Periodic tick subscriptions
//!
//! The controller never captures itself in a timer callback. It asks a
//! [`Clock`] for a subscription, keeps the returned id, and receives
//! [`TickEvent`]s through whatever loop owns it.

use std::{collections::HashMap, time::Duration};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Interval of the countdown tick
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);
/// Interval of the paused-label blink
pub const BLINK_INTERVAL: Duration = Duration::from_secs(2);

/// Handle identifying one live subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Which periodic source a tick belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Countdown,
    Blink,
}

/// One delivery from a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub id: SubscriptionId,
    pub kind: TickKind,
}

/// Source of periodic ticks.
///
/// `cancel` must be idempotent: cancelling an unknown or already cancelled id
/// does nothing.
pub trait Clock: Send {
    fn subscribe(&mut self, kind: TickKind, interval: Duration) -> SubscriptionId;
    fn cancel(&mut self, id: SubscriptionId);
}

/// Clock backed by tokio interval tasks, one task per subscription
#[derive(Debug)]
pub struct TokioClock {
    next_id: u64,
    tx: mpsc::UnboundedSender<TickEvent>,
    tasks: HashMap<SubscriptionId, JoinHandle<()>>,
}

impl TokioClock {
    /// Create a clock and the receiving end of its tick channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let clock = Self {
            next_id: 1,
            tx,
            tasks: HashMap::new(),
        };
        (clock, rx)
    }

    /// Number of subscriptions that have not been cancelled
    pub fn live_subscriptions(&self) -> usize {
        self.tasks.len()
    }
}

impl Clock for TokioClock {
    fn subscribe(&mut self, kind: TickKind, interval: Duration) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            // First delivery after one full period, not immediately
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if tx.send(TickEvent { id, kind }).is_err() {
                    break;
                }
            }
        });

        debug!("Subscribed {:?} tick {} every {:?}", kind, id.raw(), interval);
        self.tasks.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: SubscriptionId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            debug!("Cancelled tick subscription {}", id.raw());
        }
    }
}

impl Drop for TokioClock {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
