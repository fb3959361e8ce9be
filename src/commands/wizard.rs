use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::info;

use super::{Context, InputArgs};
use crate::panel::types::Room;

/// Append the rooms from `rooms_path` to the input configuration, expand them
/// and emit the resulting configuration JSON.
pub fn wizard(
    ctx: &Context,
    input: &InputArgs,
    rooms_path: &Path,
    output: Option<&Path>,
) -> Result<String> {
    let content = std::fs::read_to_string(rooms_path)
        .with_context(|| format!("Failed to read rooms {:?}", rooms_path))?;
    let rooms: Vec<Room> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid rooms JSON in {:?}", rooms_path))?;

    let mut session = ctx.open_session(input)?;
    session.clear_rooms();
    for room in rooms {
        session.add_room(room);
    }
    let added = session.apply_wizard();

    let json = serde_json::to_string_pretty(session.configuration())?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write configuration {:?}", path))?;
            info!("Wrote configuration to {:?}", path);
            Ok(format!("Added {} groups, saved to {}", added.len(), path.display()))
        }
        None => Ok(json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::read_configuration;
    use crate::commands::tests::test_context;

    const ROOMS: &str = r#"[
        {"name": "Kitchen", "room_type": "kitchen", "lighting_points": 4, "socket_points": 6,
         "appliances": [{"template_id": "oven", "power_kw": 3.5}]},
        {"name": "Bedroom", "room_type": "bedroom", "lighting_points": 2, "socket_points": 4}
    ]"#;

    #[test]
    fn test_wizard_writes_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let rooms = dir.path().join("rooms.json");
        let output = dir.path().join("panel.json");
        std::fs::write(&rooms, ROOMS).unwrap();

        let msg = wizard(&test_context(), &InputArgs::default(), &rooms, Some(&output)).unwrap();
        assert_eq!(msg, format!("Added 5 groups, saved to {}", output.display()));

        let config = read_configuration(&output).unwrap();
        let names: Vec<_> = config.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Kitchen lighting",
                "Kitchen sockets",
                "Kitchen - Electric oven",
                "Bedroom lighting",
                "Bedroom sockets",
            ]
        );
        assert_eq!(config.groups[2].power_kw, 3.5);
        assert_eq!(config.rooms.len(), 2);
    }

    #[test]
    fn test_wizard_output_with_unusable_override_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let rooms = dir.path().join("rooms.json");
        let output = dir.path().join("panel.json");
        std::fs::write(
            &rooms,
            r#"[{"name": "Kitchen", "room_type": "kitchen", "lighting_points": 1,
                "socket_points": 2, "appliances": [{"template_id": "oven", "power_kw": -2.0}]}]"#,
        )
        .unwrap();

        wizard(&test_context(), &InputArgs::default(), &rooms, Some(&output)).unwrap();

        let config = read_configuration(&output).unwrap();
        assert_eq!(config.rooms[0].appliances[0].power_kw, 0.0);
        assert_eq!(config.groups[2].power_kw, 3.0);
    }

    #[test]
    fn test_wizard_bad_rooms_file() {
        let dir = tempfile::tempdir().unwrap();
        let rooms = dir.path().join("rooms.json");
        std::fs::write(&rooms, "{not json").unwrap();
        assert!(wizard(&test_context(), &InputArgs::default(), &rooms, None).is_err());
    }
}
