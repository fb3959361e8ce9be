//! Editing session over one configuration.
//!
//! The session owns the [`Configuration`] and implements the user-facing
//! mutations. Derived output is recomputed on demand by [`ConfiguratorSession::evaluate`];
//! nothing derived is cached.

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::checkout::{build_cart, Cart};
use crate::error::PanelError;
use crate::panel::types::{Configuration, LoadGroup, ProtectionMode, Room};
use crate::panel::{evaluate, PanelReport};
use crate::settings::Settings;
use crate::sizing::{default_rcd_request, effective_diversity, size_main_supply, ProtectionPlan};
use crate::snapshot::{self, token_from_reference, SnapshotError};
use crate::wizard::{expand_rooms, GroupDraft};

/// Partial update of a group's editable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub power_kw: Option<f64>,
    pub is_wet: Option<bool>,
    pub rcd_requested: Option<bool>,
}

pub struct ConfiguratorSession {
    catalog: Catalog,
    config: Configuration,
    row_capacity: u32,
}

impl ConfiguratorSession {
    /// Start with an empty configuration.
    pub fn new(catalog: Catalog, settings: &Settings) -> Self {
        let mut config = Configuration::default();
        config.options.diversity_factor = effective_diversity(settings.default_diversity_factor);
        Self {
            catalog,
            config,
            row_capacity: settings.row_capacity,
        }
    }

    /// Resume an existing configuration.
    pub fn with_configuration(catalog: Catalog, settings: &Settings, config: Configuration) -> Self {
        Self {
            catalog,
            config,
            row_capacity: settings.row_capacity,
        }
    }

    /// Start from a share link or token read at session start.
    ///
    /// A missing or malformed reference leaves the session empty; the failure
    /// is logged and never returned.
    pub fn from_share_reference(
        catalog: Catalog,
        settings: &Settings,
        reference: Option<&str>,
    ) -> Self {
        let Some(reference) = reference else {
            debug!("No shared configuration, starting empty");
            return Self::new(catalog, settings);
        };

        match restore_configuration(reference) {
            Ok(config) => Self::with_configuration(catalog, settings, config),
            Err(e) => {
                warn!("Ignoring shared configuration: {}", e);
                Self::new(catalog, settings)
            }
        }
    }

    /// Start from a share link or token, failing on anything unusable.
    pub fn from_token(
        catalog: Catalog,
        settings: &Settings,
        reference: &str,
    ) -> Result<Self, PanelError> {
        let config = restore_configuration(reference)?;
        Ok(Self::with_configuration(catalog, settings, config))
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn into_configuration(self) -> Configuration {
        self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn groups(&self) -> &[LoadGroup] {
        &self.config.groups
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Add a group from a catalog template. Returns the new instance id.
    ///
    /// Repeated templates get a "(group N)" suffix.
    pub fn add_group(&mut self, template_id: &str) -> Result<String, PanelError> {
        let template = self
            .catalog
            .template(template_id)
            .ok_or_else(|| PanelError::Catalog(format!("unknown template '{}'", template_id)))?
            .clone();

        let existing = self
            .config
            .groups
            .iter()
            .filter(|g| g.template_id == template.id)
            .count();
        let name = if existing > 0 {
            format!("{} (group {})", template.name, existing + 1)
        } else {
            template.name.clone()
        };

        let draft = GroupDraft {
            template_id: template.id.clone(),
            name,
            power_kw: template.power_kw,
            category: template.category,
            is_wet: template.is_wet,
            is_dedicated: template.is_dedicated,
            rcd_requested: default_rcd_request(template.is_wet, template.category),
        };
        Ok(self.push_draft(draft))
    }

    /// Append already-expanded drafts, assigning instance ids.
    pub fn add_drafts(&mut self, drafts: Vec<GroupDraft>) -> Vec<String> {
        drafts.into_iter().map(|d| self.push_draft(d)).collect()
    }

    fn push_draft(&mut self, draft: GroupDraft) -> String {
        let instance_id = self.next_instance_id(&draft.template_id);
        info!("Adding group '{}' ({})", draft.name, instance_id);
        self.config.groups.push(LoadGroup {
            instance_id: instance_id.clone(),
            template_id: draft.template_id,
            name: draft.name,
            power_kw: sanitize_power(draft.power_kw),
            category: draft.category,
            is_wet: draft.is_wet,
            is_dedicated: draft.is_dedicated,
            rcd_requested: draft.rcd_requested,
        });
        instance_id
    }

    fn next_instance_id(&self, template_id: &str) -> String {
        loop {
            let candidate = format!("{}_{:08x}", template_id, rand::random::<u32>());
            if self.config.group(&candidate).is_none() {
                return candidate;
            }
        }
    }

    pub fn remove_group(&mut self, instance_id: &str) -> bool {
        let before = self.config.groups.len();
        self.config.groups.retain(|g| g.instance_id != instance_id);
        let removed = self.config.groups.len() < before;
        if removed {
            info!("Removed group {}", instance_id);
        } else {
            warn!("Cannot remove unknown group {}", instance_id);
        }
        removed
    }

    pub fn update_group(&mut self, instance_id: &str, update: GroupUpdate) -> bool {
        let Some(group) = self
            .config
            .groups
            .iter_mut()
            .find(|g| g.instance_id == instance_id)
        else {
            warn!("Cannot update unknown group {}", instance_id);
            return false;
        };

        if let Some(name) = update.name {
            group.name = name;
        }
        if let Some(power_kw) = update.power_kw {
            group.power_kw = sanitize_power(power_kw);
        }
        if let Some(is_wet) = update.is_wet {
            group.is_wet = is_wet;
        }
        if let Some(rcd_requested) = update.rcd_requested {
            group.rcd_requested = rcd_requested;
        }
        debug!("Updated group {}", instance_id);
        true
    }

    /// Set a group's power from raw form input. Unparseable input becomes 0 kW.
    pub fn set_power_input(&mut self, instance_id: &str, input: &str) -> bool {
        self.update_group(
            instance_id,
            GroupUpdate {
                power_kw: Some(parse_power_input(input)),
                ..GroupUpdate::default()
            },
        )
    }

    /// Move a group to `new_index` (clamped to the end of the list).
    pub fn move_group(&mut self, instance_id: &str, new_index: usize) -> bool {
        let Some(from) = self
            .config
            .groups
            .iter()
            .position(|g| g.instance_id == instance_id)
        else {
            warn!("Cannot move unknown group {}", instance_id);
            return false;
        };
        let group = self.config.groups.remove(from);
        let to = new_index.min(self.config.groups.len());
        self.config.groups.insert(to, group);
        true
    }

    // =========================================================================
    // Rooms (wizard)
    // =========================================================================

    pub fn rooms(&self) -> &[Room] {
        &self.config.rooms
    }

    /// Store a room. Unusable appliance overrides are stored as 0 kW, which
    /// the wizard expands to the catalog default.
    pub fn add_room(&mut self, mut room: Room) {
        for appliance in &mut room.appliances {
            if !(appliance.power_kw.is_finite() && appliance.power_kw >= 0.0) {
                warn!(
                    "Room '{}' appliance '{}' has unusable power {}, using catalog default",
                    room.name, appliance.template_id, appliance.power_kw
                );
                appliance.power_kw = 0.0;
            }
        }
        self.config.rooms.push(room);
    }

    pub fn remove_room(&mut self, index: usize) -> bool {
        if index < self.config.rooms.len() {
            self.config.rooms.remove(index);
            true
        } else {
            false
        }
    }

    pub fn clear_rooms(&mut self) {
        self.config.rooms.clear();
    }

    /// Expand all rooms into groups appended after the existing ones.
    ///
    /// Rooms stay in the configuration as wizard state.
    pub fn apply_wizard(&mut self) -> Vec<String> {
        let drafts = expand_rooms(&self.config.rooms, &self.catalog);
        info!(
            "Wizard expanded {} rooms into {} groups",
            self.config.rooms.len(),
            drafts.len()
        );
        self.add_drafts(drafts)
    }

    // =========================================================================
    // Options
    // =========================================================================

    pub fn set_include_relay(&mut self, include: bool) {
        self.config.options.include_relay = include;
    }

    /// Set the diversity factor. Values outside (0, 1] are ignored.
    pub fn set_diversity_factor(&mut self, factor: f64) -> bool {
        if factor.is_finite() && factor > 0.0 && factor <= 1.0 {
            self.config.options.diversity_factor = factor;
            true
        } else {
            warn!(
                "Ignoring diversity factor {}, keeping {}",
                factor, self.config.options.diversity_factor
            );
            false
        }
    }

    /// Set the diversity factor from raw form input, keeping the previous
    /// value when the input is unusable.
    pub fn set_diversity_input(&mut self, input: &str) -> bool {
        match input.trim().replace(',', ".").parse::<f64>() {
            Ok(value) => self.set_diversity_factor(value),
            Err(_) => {
                warn!("Ignoring diversity input '{}'", input);
                false
            }
        }
    }

    /// Store the requested protection mode. The effective mode may differ.
    pub fn set_protection_mode(&mut self, mode: ProtectionMode) {
        self.config.options.protection_mode = mode;
    }

    // =========================================================================
    // Derived output
    // =========================================================================

    pub fn protection_plan(&self) -> ProtectionPlan {
        let supply = size_main_supply(&self.config.groups, self.config.options.diversity_factor);
        ProtectionPlan::resolve(self.config.options.protection_mode, supply.main_amps)
    }

    /// Whether per-group RCD toggles should be editable.
    pub fn rcd_toggle_enabled(&self) -> bool {
        self.protection_plan().circuit_rcd_toggle_enabled()
    }

    pub fn evaluate(&self) -> PanelReport {
        evaluate(&self.config, &self.catalog.prices, self.row_capacity)
    }

    /// Build the store cart for the current panel.
    pub fn checkout(&self) -> Result<Cart, PanelError> {
        let report = self.evaluate();
        Ok(build_cart(&report, &self.catalog.commerce)?)
    }

    pub fn share_token(&self) -> String {
        snapshot::encode(&self.config)
    }

    pub fn share_link(&self, base_url: &str) -> String {
        snapshot::share_link(base_url, &self.config)
    }
}

fn restore_configuration(reference: &str) -> Result<Configuration, PanelError> {
    let token = token_from_reference(reference).ok_or(SnapshotError::Empty)?;
    let config = snapshot::decode(&token)?;
    info!(
        "Restored shared configuration: {} groups, {} rooms",
        config.groups.len(),
        config.rooms.len()
    );
    Ok(config)
}

/// Parse a power value typed by the user. Anything unusable becomes 0 kW.
pub fn parse_power_input(input: &str) -> f64 {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map(sanitize_power)
        .unwrap_or(0.0)
}

fn sanitize_power(power_kw: f64) -> f64 {
    if power_kw.is_finite() && power_kw > 0.0 {
        power_kw
    } else {
        0.0
    }
}
