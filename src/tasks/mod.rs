//! Background tasks module
//!
//! This module contains the tick clock and the task that delivers its ticks
//! to the controller.

pub mod clock;
pub mod tick_dispatch;

// Re-export main items
pub use clock::{Clock, SubscriptionId, TickEvent, TickKind, TokioClock};
pub use tick_dispatch::tick_dispatch_task;
