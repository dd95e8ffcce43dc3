// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Session-Tracker: session liveness and social-login coordination
//!
//! This crate provides the client-side core of the demo authentication
//! product: an activity-heartbeat state machine that keeps the backend
//! session store informed of user liveness, and a popup-based OAuth
//! handshake that carries application redirect intent through a
//! Google/Facebook authorization round trip.

pub mod config;
pub mod error;
pub mod heartbeat;
pub mod social;
pub mod tracker;

pub use heartbeat::{Heartbeat, HeartbeatClient};
pub use social::{PopupLauncher, Provider};
pub use tracker::{ActivityTracker, Interaction, LivenessFlag, TrackerHandle};
