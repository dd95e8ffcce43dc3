// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Initiation half of the social-login handshake.
//!
//! Builds the provider authorization URL (redirect intent encoded in
//! the `state` parameter) and opens it in a named popup. Initiation
//! returns immediately: completion arrives, if ever, through the
//! provider redirect into the completion route.

use crate::config::{Config, DEFAULT_REDIRECT};
use crate::social::{state_token, Provider};

/// Popup viewport, fixed for both providers.
const POPUP_WIDTH: u32 = 500;
const POPUP_HEIGHT: u32 = 600;

/// A fully-formed provider authorization request, ready to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub url: String,
    /// Named target: repeated clicks reuse the same popup.
    pub window_name: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Capability to open a named popup window.
///
/// A blocked popup stays the browser's business: implementations do not
/// report it and the flow simply never completes.
pub trait PopupLauncher {
    fn open(&self, request: &AuthRequest);
}

/// Build the authorization request for `provider`, carrying the
/// caller's redirect intent. `redirect_target` defaults to the fixed
/// fallback destination, the same one completion falls back to.
pub fn authorization_request(
    provider: Provider,
    redirect_target: Option<&str>,
    config: &Config,
) -> AuthRequest {
    let redirect_target = redirect_target.unwrap_or(DEFAULT_REDIRECT);
    let state = state_token::encode(redirect_target);
    let callback_url = format!("{}{}", config.app_origin, provider.callback_path());

    let mut url = format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}",
        provider.authorize_endpoint(),
        provider.client_id(config),
        urlencoding::encode(&callback_url),
        urlencoding::encode(provider.scope()),
    );
    for (key, value) in provider.extra_params() {
        url.push_str(&format!("&{}={}", key, value));
    }
    url.push_str(&format!("&state={}", state));

    AuthRequest {
        url,
        window_name: provider.window_name(),
        width: POPUP_WIDTH,
        height: POPUP_HEIGHT,
    }
}

/// Initiate a provider login/register: build the request and open the
/// popup. Non-blocking; the built request is returned for callers that
/// want to surface it.
pub fn initiate<L: PopupLauncher + ?Sized>(
    provider: Provider,
    redirect_target: Option<&str>,
    config: &Config,
    launcher: &L,
) -> AuthRequest {
    let request = authorization_request(provider, redirect_target, config);
    tracing::info!(
        provider = provider.as_str(),
        window = request.window_name,
        "opening provider authorization popup"
    );
    launcher.open(&request);
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingLauncher {
        opened: RefCell<Vec<AuthRequest>>,
    }

    impl RecordingLauncher {
        fn new() -> Self {
            Self {
                opened: RefCell::new(Vec::new()),
            }
        }
    }

    impl PopupLauncher for RecordingLauncher {
        fn open(&self, request: &AuthRequest) {
            self.opened.borrow_mut().push(request.clone());
        }
    }

    fn state_param(url: &str) -> String {
        url.split('&')
            .find_map(|part| part.strip_prefix("state="))
            .expect("url should carry a state parameter")
            .to_string()
    }

    #[test]
    fn test_google_authorization_url() {
        let config = Config::default();
        let request = authorization_request(Provider::Google, Some("/profile/info"), &config);

        assert!(request
            .url
            .starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(request
            .url
            .contains("client_id=test_google_client_id"));
        assert!(request.url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fauth%2Fgoogle-callback"
        ));
        assert!(request.url.contains("response_type=code"));
        assert!(request.url.contains("scope=openid%20email%20profile"));
        assert!(!request.url.contains("auth_type"));
        assert_eq!(request.window_name, "google-login");
        assert_eq!((request.width, request.height), (500, 600));
    }

    #[test]
    fn test_facebook_authorization_url() {
        let config = Config::default();
        let request = authorization_request(Provider::Facebook, None, &config);

        assert!(request
            .url
            .starts_with("https://www.facebook.com/v18.0/dialog/oauth?"));
        assert!(request
            .url
            .contains("client_id=test_facebook_client_id"));
        assert!(request.url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fauth%2Ffacebook-callback"
        ));
        assert!(request.url.contains("scope=email%2Cpublic_profile"));
        assert!(request.url.contains("auth_type=rerequest"));
        assert_eq!(request.window_name, "facebook-login");
    }

    #[test]
    fn test_state_roundtrips_through_url() {
        let config = Config::default();
        let request =
            authorization_request(Provider::Google, Some("/blogposts?page=2"), &config);

        let state = state_param(&request.url);
        assert_eq!(
            state_token::decode(&state),
            Some("/blogposts?page=2".to_string())
        );
    }

    #[test]
    fn test_redirect_target_defaults() {
        let config = Config::default();
        let request = authorization_request(Provider::Facebook, None, &config);

        let state = state_param(&request.url);
        assert_eq!(state_token::decode(&state), Some("/profile".to_string()));
    }

    #[test]
    fn test_initiate_opens_popup() {
        let config = Config::default();
        let launcher = RecordingLauncher::new();

        let request = initiate(Provider::Google, None, &config, &launcher);

        let opened = launcher.opened.borrow();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0], request);
    }
}
