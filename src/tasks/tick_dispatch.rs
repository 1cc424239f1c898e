//! Tick dispatch background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::{state::AppState, tasks::clock::TickEvent};

/// Background task that feeds clock deliveries into the controller one at a time
pub async fn tick_dispatch_task(state: Arc<AppState>, mut tick_rx: mpsc::UnboundedReceiver<TickEvent>) {
    info!("Starting tick dispatch task");

    while let Some(event) = tick_rx.recv().await {
        if let Err(e) = state.handle_tick(event) {
            error!("Failed to deliver tick: {}", e);
        }
    }

    info!("Tick channel closed, dispatch task exiting");
}
