// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Social-login coordination: popup-based OAuth handshake.
//!
//! Two halves that share no memory: [`initiate`] builds the provider
//! authorization request (redirect intent encoded in the OAuth `state`
//! parameter) and opens the popup; [`complete`] runs in the popup once
//! the provider redirects back, handing navigation to the opener tab.
//! Login and register flows share both halves unchanged.

pub mod complete;
pub mod initiate;
pub mod state_token;

pub use complete::{complete, CompletionParams, CompletionWindow, Handoff};
pub use initiate::{authorization_request, initiate, AuthRequest, PopupLauncher};

use crate::config::Config;

/// Supported OAuth providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Facebook,
}

impl Provider {
    /// Provider authorization endpoint.
    pub fn authorize_endpoint(self) -> &'static str {
        match self {
            Provider::Google => "https://accounts.google.com/o/oauth2/v2/auth",
            Provider::Facebook => "https://www.facebook.com/v18.0/dialog/oauth",
        }
    }

    /// OAuth scope list, in each provider's own separator convention.
    pub fn scope(self) -> &'static str {
        match self {
            Provider::Google => "openid email profile",
            Provider::Facebook => "email,public_profile",
        }
    }

    /// This application's callback route for the provider.
    pub fn callback_path(self) -> &'static str {
        match self {
            Provider::Google => "/api/auth/google-callback",
            Provider::Facebook => "/api/auth/facebook-callback",
        }
    }

    /// Named popup target, distinct per provider so repeated clicks
    /// reuse the popup instead of spawning duplicates.
    pub fn window_name(self) -> &'static str {
        match self {
            Provider::Google => "google-login",
            Provider::Facebook => "facebook-login",
        }
    }

    /// Provider-specific extra query parameters.
    pub fn extra_params(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Provider::Google => &[],
            Provider::Facebook => &[("auth_type", "rerequest")],
        }
    }

    pub fn client_id(self, config: &Config) -> &str {
        match self {
            Provider::Google => &config.google_client_id,
            Provider::Facebook => &config.facebook_client_id,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Facebook => "facebook",
        }
    }
}
