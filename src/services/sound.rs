//! Alarm sound playback through an external player

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tokio::{process::Command, runtime::Handle};
use tracing::{debug, info, warn};

/// Best-effort audio cue played when the countdown expires
pub trait SoundPlayer: Send + Sync {
    fn play_alarm(&self) -> anyhow::Result<()>;
}

/// Plays the alarm file with a command line player such as `afplay`
#[derive(Debug, Clone)]
pub struct CommandSoundPlayer {
    command: String,
    sound_file: PathBuf,
}

impl CommandSoundPlayer {
    pub fn new(command: impl Into<String>, sound_file: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            sound_file: sound_file.into(),
        }
    }

    pub fn sound_file(&self) -> &Path {
        &self.sound_file
    }

    /// Check that the alarm file is present
    pub fn check_sound_file(&self) -> Result<(), String> {
        if self.sound_file.is_file() {
            info!("Alarm sound found at {}", self.sound_file.display());
            Ok(())
        } else {
            Err(format!(
                "Alarm sound {} not found, expiry will be silent",
                self.sound_file.display()
            ))
        }
    }
}

impl SoundPlayer for CommandSoundPlayer {
    fn play_alarm(&self) -> anyhow::Result<()> {
        if !self.sound_file.is_file() {
            bail!("alarm sound {} not found", self.sound_file.display());
        }
        let runtime = Handle::try_current().context("no runtime available to play alarm")?;

        let command = self.command.clone();
        let sound_file = self.sound_file.clone();
        runtime.spawn(async move {
            if let Err(e) = run_player(&command, &sound_file).await {
                warn!("Error playing sound: {}", e);
            }
        });

        Ok(())
    }
}

async fn run_player(command: &str, sound_file: &Path) -> Result<(), String> {
    debug!("Playing {} with {}", sound_file.display(), command);

    let output = Command::new(command)
        .arg(sound_file)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", command, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", command, stderr.trim()));
    }

    Ok(())
}

/// Sound player used when the alarm is muted
#[derive(Debug, Clone, Default)]
pub struct SilentSoundPlayer;

impl SoundPlayer for SilentSoundPlayer {
    fn play_alarm(&self) -> anyhow::Result<()> {
        debug!("Alarm muted");
        Ok(())
    }
}
