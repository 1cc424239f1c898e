//! Status label formatting
//!
//! Pure functions turning the countdown state into the text shown on the
//! status item and on the play/pause menu entry.

use super::Phase;

pub const IDLE_GLYPH: &str = "⏳";
pub const PAUSED_GLYPH: &str = "⏸";
pub const PAUSED_TEXT: &str = "PAUSED";

/// Remaining time as whole minutes, or `m:ss` when `verbose` is set.
pub fn format_remaining(remaining_seconds: u64, verbose: bool) -> String {
    let minutes = remaining_seconds / 60;
    if verbose {
        format!("{}:{:02}", minutes, remaining_seconds % 60)
    } else {
        minutes.to_string()
    }
}

/// Render the status item label.
///
/// Idle with nothing loaded shows the bare glyph. Idle with a duration loaded
/// and Running both show the glyph followed by the time. Paused shows the
/// paused glyph followed by either `PAUSED` or the time, depending on the
/// blink flag.
pub fn format_label(
    remaining_seconds: u64,
    phase: Phase,
    show_paused_text: bool,
    verbose: bool,
) -> String {
    match phase {
        Phase::Idle if remaining_seconds == 0 => IDLE_GLYPH.to_string(),
        Phase::Idle | Phase::Running => {
            format!("{}{}", IDLE_GLYPH, format_remaining(remaining_seconds, verbose))
        }
        Phase::Paused if show_paused_text => format!("{} {}", PAUSED_GLYPH, PAUSED_TEXT),
        Phase::Paused => format!(
            "{} {}",
            PAUSED_GLYPH,
            format_remaining(remaining_seconds, verbose)
        ),
    }
}

/// Title of the play/pause menu entry for the given phase
pub fn play_pause_title(phase: Phase) -> &'static str {
    match phase {
        Phase::Running => "Pause",
        Phase::Paused => "Resume",
        Phase::Idle => "Play",
    }
}
