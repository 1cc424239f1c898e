//! Host capabilities module
//!
//! This module contains the display, notification and sound capabilities
//! the timer controller calls out to.

pub mod display;
pub mod notifier;
pub mod sound;

// Re-export main types
pub use display::{DisplayFrame, DisplaySink, WatchDisplay};
pub use notifier::{DesktopNotifier, Notifier, SilentNotifier};
pub use sound::{CommandSoundPlayer, SilentSoundPlayer, SoundPlayer};
