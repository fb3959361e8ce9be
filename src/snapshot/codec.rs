//! Snapshot token encoding and strict decoding.
//!
//! Token layout: URL-safe base64 without padding over
//! `{"v": 1, "groups": [...], "rooms": [...], "options": {...}}`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::panel::types::{Configuration, LoadGroup, PanelOptions, Room};

/// Schema version written into every token.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("empty token")]
    Empty,

    #[error("token is not valid base64: {0}")]
    Encoding(String),

    #[error("token payload is not valid JSON: {0}")]
    Payload(String),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    v: u32,
    groups: &'a [LoadGroup],
    rooms: &'a [Room],
    options: &'a PanelOptions,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotIn {
    v: u32,
    groups: Vec<LoadGroup>,
    rooms: Vec<Room>,
    options: PanelOptions,
}

/// Encode a configuration as a URL-safe token.
pub fn encode(config: &Configuration) -> String {
    let snapshot = SnapshotOut {
        v: SNAPSHOT_VERSION,
        groups: &config.groups,
        rooms: &config.rooms,
        options: &config.options,
    };
    // Plain data with string keys; serialization cannot fail.
    let json = serde_json::to_vec(&snapshot).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode and validate a token produced by [`encode`].
pub fn decode(token: &str) -> Result<Configuration, SnapshotError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SnapshotError::Empty);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim_end_matches('='))
        .map_err(|e| SnapshotError::Encoding(e.to_string()))?;
    let snapshot: SnapshotIn =
        serde_json::from_slice(&bytes).map_err(|e| SnapshotError::Payload(e.to_string()))?;

    if snapshot.v != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(snapshot.v));
    }

    let config = Configuration {
        groups: snapshot.groups,
        rooms: snapshot.rooms,
        options: snapshot.options,
    };
    validate(&config)?;
    Ok(config)
}

/// Check the invariants every decoded configuration must hold.
pub fn validate(config: &Configuration) -> Result<(), SnapshotError> {
    let diversity = config.options.diversity_factor;
    if !(diversity > 0.0 && diversity <= 1.0) {
        return Err(SnapshotError::Invalid(format!(
            "diversity factor {} outside (0, 1]",
            diversity
        )));
    }

    let mut seen = HashSet::new();
    for group in &config.groups {
        if group.instance_id.is_empty() {
            return Err(SnapshotError::Invalid("group without instance id".to_string()));
        }
        if !seen.insert(group.instance_id.as_str()) {
            return Err(SnapshotError::Invalid(format!(
                "duplicate group id '{}'",
                group.instance_id
            )));
        }
        if !group.power_kw.is_finite() || group.power_kw < 0.0 {
            return Err(SnapshotError::Invalid(format!(
                "group '{}' has invalid power {}",
                group.instance_id, group.power_kw
            )));
        }
    }

    for room in &config.rooms {
        if let Some(bad) = room
            .appliances
            .iter()
            .find(|a| !a.power_kw.is_finite() || a.power_kw < 0.0)
        {
            return Err(SnapshotError::Invalid(format!(
                "room '{}' appliance '{}' has invalid power {}",
                room.name, bad.template_id, bad.power_kw
            )));
        }
    }

    Ok(())
}
