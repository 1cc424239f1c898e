//! Drooly Timer - A menu-bar style countdown timer
//!
//! This is the main entry point for the drooly-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use drooly_timer::{
    config::Config,
    state::{AppState, Capabilities, ControllerOptions, TimerController},
    api::create_router,
    services::{
        CommandSoundPlayer, DesktopNotifier, Notifier, SilentNotifier, SilentSoundPlayer,
        SoundPlayer, WatchDisplay,
    },
    tasks::{tick_dispatch_task, TokioClock},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("drooly_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting drooly-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: default={}min, presets={:?}, verbose_time={}, blink={}",
          config.default_minutes, config.presets, config.verbose_time, !config.no_blink);

    let notifier: Box<dyn Notifier> = if config.no_notifications {
        Box::new(SilentNotifier)
    } else {
        Box::new(DesktopNotifier::new())
    };

    let sound: Box<dyn SoundPlayer> = if config.mute {
        Box::new(SilentSoundPlayer)
    } else {
        let player = CommandSoundPlayer::new(config.sound_command.clone(), config.sound_file.clone());
        if let Err(e) = player.check_sound_file() {
            warn!("{}", e);
        }
        Box::new(player)
    };

    let (clock, tick_rx) = TokioClock::new();
    let (display, display_rx) = WatchDisplay::new();

    let options = ControllerOptions {
        verbose_time: config.verbose_time,
        blink: !config.no_blink,
        quick_start_minutes: config.quick_start_minutes,
        presets: config.presets.clone(),
    };
    let controller = TimerController::new(
        config.default_duration_seconds(),
        options,
        Capabilities {
            clock: Box::new(clock),
            display: Box::new(display),
            notifier,
            sound,
        },
    );

    let state = Arc::new(AppState::new(controller, display_rx, config.port, config.host.clone()));

    // Deliver clock ticks to the controller
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_dispatch_task(tick_state, tick_rx).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control surface running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /click            - Left click on the status item");
    info!("  POST /play-pause       - Play / Pause / Resume");
    info!("  POST /reset            - Reset timer");
    info!("  POST /preset/:minutes  - Start a preset");
    info!("  POST /custom           - Start a custom duration");
    info!("  GET  /status           - Current label and timer state");
    info!("  GET  /health           - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Shutdown complete");
    Ok(())
}
