//! RFC 3986 percent-encoding as used by OAuth 1.0.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode string per RFC 3986.
pub fn encode(input: &str) -> String {
    percent_encode(input.as_bytes(), OAUTH_ENCODE_SET).to_string()
}

/// Decode a percent-encoded string. `+` is treated as a space.
pub fn decode(input: &str) -> String {
    let plus_free = input.replace('+', " ");
    percent_decode_str(&plus_free)
        .decode_utf8_lossy()
        .into_owned()
}

/// Split an `application/x-www-form-urlencoded` string into decoded pairs.
///
/// Repeated names produce repeated pairs; a name without `=` gets an empty value.
pub fn parse_pairs(input: &str) -> Vec<(String, String)> {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

/// Split an `Authorization: OAuth ...` header value into decoded pairs.
///
/// The scheme name is matched case-insensitively (RFC 7235 Section 2.1).
/// `realm` is dropped; it never takes part in the signature.
pub fn parse_authorization_header(header: &str) -> Vec<(String, String)> {
    let Some((scheme, params)) = header.trim().split_once(char::is_whitespace) else {
        return Vec::new();
    };
    if !scheme.eq_ignore_ascii_case("OAuth") {
        return Vec::new();
    }
    params
        .split(',')
        .filter_map(|part| {
            let (name, value) = part.trim().split_once('=')?;
            let value = value.trim().trim_matches('"');
            (name != "realm").then(|| (decode(name), decode(value)))
        })
        .collect()
}
