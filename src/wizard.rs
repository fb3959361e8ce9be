//! Room wizard: expands rooms into load-group drafts.
//!
//! The expansion is one-way and deterministic. Drafts carry no instance id;
//! the session assigns identities when it appends them.

use tracing::warn;

use crate::catalog::Catalog;
use crate::panel::types::{LoadCategory, Room};
use crate::sizing::default_rcd_request;

/// Power per lighting point in kW.
pub const LIGHTING_POINT_KW: f64 = 0.05;

/// Power per socket point in kW.
pub const SOCKET_POINT_KW: f64 = 0.2;

/// A socket circuit is never planned below this load.
pub const MIN_SOCKET_CIRCUIT_KW: f64 = 2.0;

/// A load group before it has an instance id.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDraft {
    pub template_id: String,
    pub name: String,
    pub power_kw: f64,
    pub category: LoadCategory,
    pub is_wet: bool,
    pub is_dedicated: bool,
    pub rcd_requested: bool,
}

/// Expand every room in order.
pub fn expand_rooms(rooms: &[Room], catalog: &Catalog) -> Vec<GroupDraft> {
    rooms
        .iter()
        .flat_map(|room| expand_room(room, catalog))
        .collect()
}

/// Expand one room: a lighting circuit, a socket circuit, then one circuit
/// per appliance. Circuits with no points are skipped.
///
/// Wizard lighting never requests an RCD, even in a wet room.
pub fn expand_room(room: &Room, catalog: &Catalog) -> Vec<GroupDraft> {
    let wet = room.is_wet();
    let mut drafts = Vec::new();

    if room.lighting_points > 0 {
        drafts.push(GroupDraft {
            template_id: "light".to_string(),
            name: format!("{} lighting", room.name),
            power_kw: f64::from(room.lighting_points) * LIGHTING_POINT_KW,
            category: LoadCategory::Lighting,
            is_wet: wet,
            is_dedicated: false,
            rcd_requested: false,
        });
    }

    if room.socket_points > 0 {
        drafts.push(GroupDraft {
            template_id: "socket".to_string(),
            name: format!("{} sockets", room.name),
            power_kw: (f64::from(room.socket_points) * SOCKET_POINT_KW).max(MIN_SOCKET_CIRCUIT_KW),
            category: LoadCategory::Socket,
            is_wet: wet,
            is_dedicated: false,
            rcd_requested: wet,
        });
    }

    for selection in &room.appliances {
        let Some(template) = catalog.template(&selection.template_id) else {
            warn!(
                "Room '{}' references unknown appliance '{}', skipping",
                room.name, selection.template_id
            );
            continue;
        };

        let power_kw = if selection.power_kw.is_finite() && selection.power_kw > 0.0 {
            selection.power_kw
        } else {
            template.power_kw
        };
        let is_wet = wet || template.is_wet;

        drafts.push(GroupDraft {
            template_id: template.id.clone(),
            name: format!("{} - {}", room.name, template.name),
            power_kw,
            category: template.category,
            is_wet,
            is_dedicated: template.is_dedicated,
            rcd_requested: default_rcd_request(is_wet, template.category),
        });
    }

    drafts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::panel::types::{ApplianceSelection, RoomType};

    fn room(name: &str, room_type: RoomType, lights: u32, sockets: u32) -> Room {
        Room {
            name: name.to_string(),
            room_type,
            lighting_points: lights,
            socket_points: sockets,
            appliances: Vec::new(),
        }
    }

    #[test]
    fn test_dry_room_expansion() {
        let catalog = default_catalog();
        let drafts = expand_room(&room("Bedroom", RoomType::Bedroom, 4, 6), &catalog);

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].name, "Bedroom lighting");
        assert_eq!(drafts[0].category, LoadCategory::Lighting);
        assert!((drafts[0].power_kw - 0.2).abs() < 1e-9);
        assert!(!drafts[0].is_wet);

        assert_eq!(drafts[1].name, "Bedroom sockets");
        // 6 * 0.2 = 1.2 kW, raised to the 2.0 kW minimum
        assert_eq!(drafts[1].power_kw, 2.0);
        assert!(!drafts[1].rcd_requested);
    }

    #[test]
    fn test_many_sockets_exceed_minimum() {
        let catalog = default_catalog();
        let drafts = expand_room(&room("Living", RoomType::Living, 0, 15), &catalog);
        assert_eq!(drafts.len(), 1);
        assert!((drafts[0].power_kw - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_wet_room_lighting_asymmetry() {
        let catalog = default_catalog();
        let drafts = expand_room(&room("Bathroom", RoomType::Bathroom, 2, 2), &catalog);

        let lighting = &drafts[0];
        assert!(lighting.is_wet);
        assert!(!lighting.rcd_requested, "wizard lighting never requests RCD");

        let sockets = &drafts[1];
        assert!(sockets.is_wet);
        assert!(sockets.rcd_requested);
    }

    #[test]
    fn test_appliances_with_override() {
        let catalog = default_catalog();
        let mut kitchen = room("Kitchen", RoomType::Kitchen, 0, 0);
        kitchen.appliances = vec![
            ApplianceSelection {
                template_id: "oven".to_string(),
                power_kw: 3.5,
            },
            ApplianceSelection {
                template_id: "kettle".to_string(),
                power_kw: 0.0,
            },
        ];
        let drafts = expand_room(&kitchen, &catalog);

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].name, "Kitchen - Electric oven");
        assert_eq!(drafts[0].power_kw, 3.5);
        assert!(drafts[0].is_wet, "kitchen makes the appliance wet");
        assert!(drafts[0].rcd_requested);
        assert!(drafts[0].is_dedicated);

        // Unusable override falls back to the catalog default
        assert_eq!(drafts[1].power_kw, 2.0);
    }

    #[test]
    fn test_wet_appliance_in_dry_room() {
        let catalog = default_catalog();
        let mut utility = room("Utility", RoomType::Other, 0, 0);
        utility.appliances = vec![ApplianceSelection {
            template_id: "washing_machine".to_string(),
            power_kw: 2.0,
        }];
        let drafts = expand_room(&utility, &catalog);
        assert!(drafts[0].is_wet);
        assert!(drafts[0].rcd_requested);
    }

    #[test]
    fn test_unknown_appliance_skipped() {
        let catalog = default_catalog();
        let mut other = room("Garage", RoomType::Other, 1, 0);
        other.appliances = vec![ApplianceSelection {
            template_id: "welder".to_string(),
            power_kw: 5.0,
        }];
        let drafts = expand_room(&other, &catalog);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].category, LoadCategory::Lighting);
    }

    #[test]
    fn test_empty_room_yields_nothing() {
        let catalog = default_catalog();
        assert!(expand_room(&room("Closet", RoomType::Other, 0, 0), &catalog).is_empty());
    }

    #[test]
    fn test_expand_rooms_keeps_order() {
        let catalog = default_catalog();
        let rooms = vec![
            room("Hall", RoomType::Other, 1, 1),
            room("Bedroom", RoomType::Bedroom, 1, 0),
        ];
        let names: Vec<_> = expand_rooms(&rooms, &catalog)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Hall lighting", "Hall sockets", "Bedroom lighting"]);
    }
}
