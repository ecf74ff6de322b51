//! Arena Duel - two-peer battle engine
//!
//! This binary hosts or joins a single direct connection, then runs the
//! duel session: 60 Hz local simulation, 10 Hz position reports, and a
//! mirrored opponent fed by the peer's messages. Rendering and audio run
//! headless (logged); input comes from a small stdin line protocol.

use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arena_duel::config::Config;
use arena_duel::game::Session;
use arena_duel::input;
use arena_duel::net::{link, Channel};
use arena_duel::view::{HeadlessAudio, HeadlessStage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!("Starting Arena Duel");
    info!(role = ?config.role, character = ?config.character, "Configuration loaded");

    // Establish the single peer connection
    let stream = link::establish(&config).await?;

    // Wire the channel tasks to the session's inbound queue
    let (inbound_tx, inbound_rx) = mpsc::channel(64);
    let channel = Channel::spawn(stream, inbound_tx);

    // Local input from the stdin harness
    let input_rx = input::spawn_stdin_input();

    let session = Session::new(
        config.character,
        channel,
        Box::new(HeadlessStage),
        Box::new(HeadlessAudio),
    );

    tokio::select! {
        outcome = session.run(inbound_rx, input_rx) => {
            info!(winner = ?outcome.winner, ticks = outcome.ticks, "Match finished");
        }
        _ = shutdown_signal() => {
            info!("Shutting down");
        }
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        }
    }
}
