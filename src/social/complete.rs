// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Completion half of the social-login handshake.
//!
//! Runs in the popup once the backend redirects it to the completion
//! route with a `redirect_to` query parameter. If the window still
//! holds an opener reference, navigation is handed back to the opening
//! tab and the popup closes itself; otherwise (direct navigation,
//! blocked popup fell back to the same tab) the window navigates
//! itself. Decided exactly once, synchronously, with no retry.

use crate::config::DEFAULT_REDIRECT;

/// Query parameters delivered to the completion route.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompletionParams {
    pub redirect_to: Option<String>,
}

impl CompletionParams {
    /// Parse from a raw query string (`redirect_to=%2Fprofile%2Finfo&...`).
    pub fn from_query(query: &str) -> Self {
        let redirect_to = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "redirect_to")
            .and_then(|(_, value)| urlencoding::decode(value).ok())
            .map(|value| value.into_owned());
        Self { redirect_to }
    }
}

/// Which branch the completion took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// The opener was pointed at the target and this window closed.
    Opener,
    /// No opener: this window navigated itself.
    SelfNavigation,
}

/// Window-side capabilities needed to finish the handshake. The popup
/// never reads or writes anything else of the opener.
pub trait CompletionWindow {
    /// Whether this window was opened as a popup and still holds its
    /// opener reference.
    fn has_opener(&self) -> bool;
    /// Point the opener at `path`.
    fn set_opener_location(&self, path: &str);
    /// Close this window.
    fn close_self(&self);
    /// Navigate this window to `path`.
    fn navigate_self(&self, path: &str);
}

/// Finish the handshake. A missing opener is the direct-navigation
/// fallback, not an error; a missing `redirect_to` falls back to the
/// default destination.
pub fn complete<W: CompletionWindow + ?Sized>(params: &CompletionParams, window: &W) -> Handoff {
    let destination = params.redirect_to.as_deref().unwrap_or(DEFAULT_REDIRECT);

    if window.has_opener() {
        tracing::debug!(redirect_to = destination, "handing navigation back to opener");
        window.set_opener_location(destination);
        window.close_self();
        Handoff::Opener
    } else {
        tracing::debug!(redirect_to = destination, "no opener, navigating in place");
        window.navigate_self(destination);
        Handoff::SelfNavigation
    }
}
