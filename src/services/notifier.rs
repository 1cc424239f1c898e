//! End-of-timer notifications

use anyhow::Context;
use notify_rust::Notification;
use tokio::runtime::Handle;
use tracing::{info, warn};

/// Best-effort alert fired when the countdown expires.
///
/// An `Err` means the alert could not be dispatched. Delivery itself happens
/// in the background and is never awaited by the caller.
pub trait Notifier: Send + Sync {
    fn notify_expired(&self) -> anyhow::Result<()>;
}

/// Desktop notification through the platform notification center
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    pub summary: String,
    pub body: String,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            summary: "Time's up!".to_string(),
            body: "Your timer has ended.".to_string(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    fn notify_expired(&self) -> anyhow::Result<()> {
        let runtime = Handle::try_current().context("no runtime available to deliver notification")?;
        let summary = self.summary.clone();
        let body = self.body.clone();

        runtime.spawn_blocking(move || {
            match Notification::new().summary(&summary).body(&body).show() {
                Ok(_) => info!("Expiry notification delivered"),
                Err(e) => warn!("Failed to send notification: {}", e),
            }
        });

        Ok(())
    }
}

/// Notifier used when notifications are switched off
#[derive(Debug, Clone, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify_expired(&self) -> anyhow::Result<()> {
        info!("Timer expired (notifications disabled)");
        Ok(())
    }
}
