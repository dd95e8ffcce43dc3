// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Core error types.
//!
//! Every failure in this layer is terminal where it occurs: heartbeat
//! transport errors are logged and dropped, a garbled state token falls
//! back to the default destination. Nothing here propagates into the
//! host page.

/// Errors raised inside the liveness/auth core.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("heartbeat request failed: {0}")]
    Heartbeat(#[from] reqwest::Error),
}

/// Result type alias for the core.
pub type Result<T> = std::result::Result<T, CoreError>;
