// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-Tracker dev harness
//!
//! Runs the activity tracker against the configured backend and maps
//! stdin lines to interaction events:
//!
//! ```text
//! click | key | scroll     record an interaction
//! status                   print the liveness flag
//! auth google|facebook     build the provider authorization request
//! ```
//!
//! EOF tears the tracker down.

use anyhow::Context;
use session_tracker::{
    config::Config,
    social::{self, AuthRequest, PopupLauncher},
    ActivityTracker, HeartbeatClient, Interaction, LivenessFlag, Provider,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Popup stand-in for a terminal: prints what the browser would open.
struct StdoutLauncher;

impl PopupLauncher for StdoutLauncher {
    fn open(&self, request: &AuthRequest) {
        println!(
            "open {} ({}x{}): {}",
            request.window_name, request.width, request.height, request.url
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("failed to load configuration")?;
    tracing::info!(
        backend = %config.backend_url,
        idle_window_secs = config.idle_window.as_secs(),
        "starting session tracker harness"
    );

    let flag = LivenessFlag::new();
    let heartbeat =
        HeartbeatClient::new(&config.backend_url).context("failed to build heartbeat client")?;
    let (handle, task) =
        ActivityTracker::with_window(heartbeat, flag.clone(), config.idle_window).spawn();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "click" => handle.record(Interaction::PointerClick),
            "key" => handle.record(Interaction::KeyPress),
            "scroll" => handle.record(Interaction::Scroll),
            "status" => println!(
                "active: {} (since {})",
                flag.is_active(),
                flag.last_transition_rfc3339()
            ),
            "auth google" => {
                social::initiate(Provider::Google, None, &config, &StdoutLauncher);
            }
            "auth facebook" => {
                social::initiate(Provider::Facebook, None, &config, &StdoutLauncher);
            }
            "" => {}
            other => eprintln!("unknown command: {}", other),
        }
    }

    drop(handle);
    task.await.context("tracker task failed")?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("session_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
