// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Heartbeat client for the backend session store.
//!
//! One fire-and-forget POST tells the backend "this user is still
//! here". Failure is logged and dropped: a missed ping only risks
//! earlier server-side expiry, and the tracker never blocks on (or even
//! observes) the outcome.

use crate::error::Result;

/// Capability to notify the backend of user activity.
///
/// Implementations must return immediately and swallow failures; the
/// tracker state machine never awaits a ping.
pub trait Heartbeat: Send + 'static {
    fn mark_active(&self);
}

/// Production heartbeat: `POST {backend}/users/mark-active` with cookie
/// credentials, response ignored.
#[derive(Clone)]
pub struct HeartbeatClient {
    http: reqwest::Client,
    mark_active_url: String,
}

impl HeartbeatClient {
    pub fn new(backend_url: &str) -> Result<Self> {
        // The cookie store carries the session cookie across pings,
        // matching the browser's credentialed fetch.
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            mark_active_url: mark_active_url(backend_url),
        })
    }

    /// Issue one mark-active request. The response body is ignored;
    /// only transport-level failure is reported.
    pub async fn send(&self) -> Result<()> {
        self.http
            .post(&self.mark_active_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Ok(())
    }
}

impl Heartbeat for HeartbeatClient {
    fn mark_active(&self) {
        let client = self.clone();
        tokio::spawn(async move {
            if let Err(err) = client.send().await {
                tracing::warn!(error = %err, "failed to ping backend");
            }
        });
    }
}

fn mark_active_url(backend_url: &str) -> String {
    format!("{}/users/mark-active", backend_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_active_url() {
        assert_eq!(
            mark_active_url("http://localhost:8000"),
            "http://localhost:8000/users/mark-active"
        );
    }

    #[test]
    fn test_mark_active_url_trailing_slash() {
        assert_eq!(
            mark_active_url("https://api.example.com/"),
            "https://api.example.com/users/mark-active"
        );
    }
}
