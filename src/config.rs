//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

#[cfg(target_os = "macos")]
const DEFAULT_SOUND_COMMAND: &str = "afplay";
#[cfg(not(target_os = "macos"))]
const DEFAULT_SOUND_COMMAND: &str = "paplay";

/// CLI argument parsing structure
#[derive(Debug, Clone, Parser)]
#[command(name = "drooly-timer")]
#[command(about = "A menu-bar style countdown timer with presets and expiry alarms")]
#[command(version)]
pub struct Config {
    /// Port for the local control surface
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address for the local control surface
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Duration in minutes used when starting from zero
    #[arg(short = 'd', long, default_value = "25", value_parser = clap::value_parser!(u32).range(1..))]
    pub default_minutes: u32,

    /// Preset started by a primary click while idle
    #[arg(long, default_value = "25", value_parser = clap::value_parser!(u32).range(1..))]
    pub quick_start_minutes: u32,

    /// Preset durations offered in the menu, in minutes
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = vec![5, 15, 25, 50, 90],
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub presets: Vec<u32>,

    /// Show minutes and seconds instead of whole minutes
    #[arg(long)]
    pub verbose_time: bool,

    /// Keep the remaining time on screen while paused instead of blinking "PAUSED"
    #[arg(long)]
    pub no_blink: bool,

    /// Alarm sound played when the countdown expires
    #[arg(long, default_value = "alarm.mp3")]
    pub sound_file: PathBuf,

    /// Program used to play the alarm sound
    #[arg(long, default_value = DEFAULT_SOUND_COMMAND)]
    pub sound_command: String,

    /// Do not post desktop notifications on expiry
    #[arg(long)]
    pub no_notifications: bool,

    /// Do not play the alarm sound on expiry
    #[arg(long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the control surface address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn default_duration_seconds(&self) -> u64 {
        u64::from(self.default_minutes) * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_menu() {
        let config = Config::try_parse_from(["drooly-timer"]).unwrap();

        assert_eq!(config.default_minutes, 25);
        assert_eq!(config.default_duration_seconds(), 1500);
        assert_eq!(config.quick_start_minutes, 25);
        assert_eq!(config.presets, vec![5, 15, 25, 50, 90]);
        assert!(!config.verbose_time);
        assert!(!config.no_blink);
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn presets_accept_a_comma_separated_list() {
        let config =
            Config::try_parse_from(["drooly-timer", "--presets", "10,20", "--verbose"]).unwrap();

        assert_eq!(config.presets, vec![10, 20]);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn zero_minute_durations_are_rejected() {
        assert!(Config::try_parse_from(["drooly-timer", "--default-minutes", "0"]).is_err());
        assert!(Config::try_parse_from(["drooly-timer", "--presets", "5,0"]).is_err());
    }
}
