// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Opaque state token carrying redirect intent through the provider
//! round trip.
//!
//! Wire format: a JSON object with the single recognized key `from`,
//! percent-encoded. JSON-then-percent-encode is stable under the
//! conservative escaping providers apply to unknown query parameters,
//! so the token echoes back byte-for-byte. The backend decodes it the
//! same way and forwards the target to the completion route as
//! `redirect_to`.

use serde::Deserialize;

/// Recognized payload. Unknown extra keys are tolerated on decode.
#[derive(Debug, Deserialize)]
struct StatePayload {
    #[serde(default)]
    from: Option<String>,
}

/// Encode a redirect target as a state token.
pub fn encode(redirect_target: &str) -> String {
    let json = serde_json::json!({ "from": redirect_target }).to_string();
    urlencoding::encode(&json).into_owned()
}

/// Decode the redirect target out of a state token.
///
/// Returns `None` for a missing `from` key or a token that does not
/// percent-decode to JSON; callers fall back to the default destination
/// rather than failing the flow.
pub fn decode(token: &str) -> Option<String> {
    let json = urlencoding::decode(token).ok()?;
    let payload: StatePayload = serde_json::from_str(&json).ok()?;
    payload.from
}

/// Decode with the fallback applied: an absent or garbled token yields
/// `default`, never an error.
pub fn decode_or_default(token: Option<&str>, default: &str) -> String {
    token
        .and_then(decode)
        .unwrap_or_else(|| default.to_string())
}
