// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! State token encoding/decoding tests.
//!
//! These verify that redirect targets survive the encode/decode
//! roundtrip through the OAuth state parameter, and that a bad token
//! degrades to the default destination instead of an error.

use session_tracker::social::state_token::{decode, decode_or_default, encode};

#[test]
fn test_state_roundtrip_plain_path() {
    let token = encode("/profile");
    assert_eq!(decode(&token), Some("/profile".to_string()));
}

#[test]
fn test_state_roundtrip_query_characters() {
    let target = "/blogposts?page=2";
    let token = encode(target);
    assert_eq!(decode(&token), Some(target.to_string()));
}

#[test]
fn test_state_roundtrip_hostile_escaping() {
    // Characters that break naive query-string concatenation.
    let target = "/search?q=a+b&lang=en#results";
    let token = encode(target);
    assert_eq!(decode(&token), Some(target.to_string()));
}

#[test]
fn test_state_roundtrip_non_ascii_path() {
    let target = "/blogpost/caf\u{e9}-gr\u{fc}n";
    let token = encode(target);
    assert_eq!(decode(&token), Some(target.to_string()));
}

#[test]
fn test_state_token_is_url_safe() {
    let token = encode("/blogposts?page=2&sort=new");

    // Must survive being dropped into a query string untouched.
    for forbidden in ['{', '}', '"', '&', '=', '?', '#', '+', ' ', '/'] {
        assert!(
            !token.contains(forbidden),
            "token should not contain '{}': {}",
            forbidden,
            token
        );
    }
}

#[test]
fn test_state_decode_malformed_yields_default() {
    assert_eq!(decode_or_default(Some("not-json"), "/profile"), "/profile");
    assert_eq!(decode_or_default(Some(""), "/profile"), "/profile");
    assert_eq!(decode_or_default(None, "/profile"), "/profile");
}

#[test]
fn test_state_decode_tolerates_unknown_keys() {
    // A consumer must accept tokens carrying keys it does not know.
    let raw =
        urlencoding::encode(r#"{"from":"/profile/info","ts":1234567890,"v":2}"#).into_owned();
    assert_eq!(decode(&raw), Some("/profile/info".to_string()));
}

#[test]
fn test_state_decode_wrong_from_type_yields_default() {
    let raw = urlencoding::encode(r#"{"from":42}"#).into_owned();
    assert_eq!(decode_or_default(Some(&raw), "/profile"), "/profile");
}
