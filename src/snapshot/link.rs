//! Share links carrying a snapshot token in the URL fragment.

use super::codec::encode;
use crate::panel::types::Configuration;

/// Fragment parameter holding the token.
pub const FRAGMENT_KEY: &str = "config";

/// Build a fully-qualified share link: `{base_url}#config={token}`.
///
/// Any fragment already present on `base_url` is replaced.
pub fn share_link(base_url: &str, config: &Configuration) -> String {
    let base = base_url.split('#').next().unwrap_or(base_url);
    format!("{}#{}={}", base, FRAGMENT_KEY, encode(config))
}

/// Extract the token from a share link, a bare fragment (`#config=...` or
/// `config=...`) or a bare token.
///
/// Returns `None` when the reference carries no token. The returned token is
/// percent-decoded but not validated.
pub fn token_from_reference(reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    let (fragment, bare) = match reference.split_once('#') {
        Some((_, fragment)) => (fragment, false),
        None if reference.contains("://") => return None,
        None => (reference, find_keyed(reference).is_none()),
    };

    // A key-less value is only a token when it is the whole reference
    let value = if bare {
        reference
    } else {
        find_keyed(fragment)?
    };

    let decoded = urlencoding::decode(value).ok()?.into_owned();
    if decoded.trim().is_empty() {
        None
    } else {
        Some(decoded)
    }
}

fn find_keyed(fragment: &str) -> Option<&str> {
    fragment
        .split('&')
        .find_map(|pair| match pair.split_once('=') {
            Some((key, value)) if key == FRAGMENT_KEY => Some(value),
            _ => None,
        })
}
