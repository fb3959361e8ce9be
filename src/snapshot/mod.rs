//! Configuration snapshot token for share links.
//!
//! The token is URL-safe base64 (no padding) of a versioned JSON document
//! holding groups, rooms and options. Decoding is strict and returns a typed
//! error; falling back to an empty configuration is the caller's decision
//! (see `ConfiguratorSession::from_share_reference`).

mod codec;
mod link;

pub use codec::{decode, encode, validate, SnapshotError, SNAPSHOT_VERSION};
pub use link::{share_link, token_from_reference, FRAGMENT_KEY};
