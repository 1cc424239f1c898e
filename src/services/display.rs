//! Status display sink

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

/// Receiver of rendered status text
pub trait DisplaySink: Send {
    /// Text of the status item
    fn set_label(&mut self, text: &str);

    /// Title of the play/pause menu entry
    fn set_play_pause_title(&mut self, _title: &str) {}
}

/// What the status item currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFrame {
    pub label: String,
    pub play_pause_title: String,
}

/// Display sink publishing every frame on a watch channel
#[derive(Debug)]
pub struct WatchDisplay {
    tx: watch::Sender<DisplayFrame>,
}

impl WatchDisplay {
    pub fn new() -> (Self, watch::Receiver<DisplayFrame>) {
        let (tx, rx) = watch::channel(DisplayFrame::default());
        (Self { tx }, rx)
    }
}

impl DisplaySink for WatchDisplay {
    fn set_label(&mut self, text: &str) {
        let changed = self.tx.borrow().label != text;
        if changed {
            debug!("Status label: {}", text);
            self.tx.send_modify(|frame| frame.label = text.to_string());
        }
    }

    fn set_play_pause_title(&mut self, title: &str) {
        let changed = self.tx.borrow().play_pause_title != title;
        if changed {
            self.tx.send_modify(|frame| frame.play_pause_title = title.to_string());
        }
    }
}
