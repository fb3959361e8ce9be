//! Type definitions for the panel model.
//!
//! Input types (groups, rooms, options) are the editable state and round-trip
//! through the share token. Output types (modules, rows, BOM lines) are derived
//! on every read and only ever serialized outward.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// INPUT TYPES (editable configuration)
// =============================================================================

/// Circuit category of a load group. Drives the breaker amperage floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadCategory {
    Lighting,
    Socket,
    Appliance,
}

impl LoadCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadCategory::Lighting => "lighting",
            LoadCategory::Socket => "socket",
            LoadCategory::Appliance => "appliance",
        }
    }
}

impl fmt::Display for LoadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named circuit requirement on the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadGroup {
    /// Per-instance identity, unique within a configuration
    pub instance_id: String,
    /// Catalog template this group was created from (may repeat across groups)
    pub template_id: String,
    pub name: String,
    /// Connected load in kW
    pub power_kw: f64,
    pub category: LoadCategory,
    /// Installed in a wet location (bathroom, kitchen, outdoors)
    pub is_wet: bool,
    /// Dedicated single-appliance circuit
    pub is_dedicated: bool,
    /// User request for an individual RCBO on this circuit
    pub rcd_requested: bool,
}

/// Room type in the wizard. Kitchens and bathrooms count as wet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Living,
    Bedroom,
    Kitchen,
    Bathroom,
    Other,
}

impl RoomType {
    pub fn is_wet(&self) -> bool {
        matches!(self, RoomType::Kitchen | RoomType::Bathroom)
    }
}

/// An appliance picked for a room in the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceSelection {
    /// Catalog template id of the appliance
    pub template_id: String,
    /// Power override in kW (the catalog default when the user kept it)
    pub power_kw: f64,
}

/// Wizard scratch state: a space to be expanded into load groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub room_type: RoomType,
    pub lighting_points: u32,
    pub socket_points: u32,
    #[serde(default)]
    pub appliances: Vec<ApplianceSelection>,
}

impl Room {
    pub fn is_wet(&self) -> bool {
        self.room_type.is_wet()
    }
}

/// How leakage protection is arranged for the whole panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtectionMode {
    /// Plain main breaker, RCBOs only on groups that request one
    #[default]
    Standard,
    /// Combined breaker+RCD as the main device (only up to 40A)
    MainRcd,
    /// Separate RCCB after the main device protecting every circuit
    UpstreamRcd,
}

impl ProtectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionMode::Standard => "standard",
            ProtectionMode::MainRcd => "main-rcd",
            ProtectionMode::UpstreamRcd => "upstream-rcd",
        }
    }
}

impl fmt::Display for ProtectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Panel-wide options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelOptions {
    /// Add a voltage-monitoring relay after the main breaker
    pub include_relay: bool,
    /// Simultaneity multiplier for the main supply, in (0, 1]
    pub diversity_factor: f64,
    /// Requested protection mode (the effective one may differ)
    pub protection_mode: ProtectionMode,
}

pub const DEFAULT_DIVERSITY_FACTOR: f64 = 0.8;

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            include_relay: true,
            diversity_factor: DEFAULT_DIVERSITY_FACTOR,
            protection_mode: ProtectionMode::Standard,
        }
    }
}

/// The editable aggregate. Everything else is derived from it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub groups: Vec<LoadGroup>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub options: PanelOptions,
}

impl Configuration {
    pub fn group(&self, instance_id: &str) -> Option<&LoadGroup> {
        self.groups.iter().find(|g| g.instance_id == instance_id)
    }

    pub fn total_power_kw(&self) -> f64 {
        self.groups.iter().map(|g| g.power_kw).sum()
    }
}

// =============================================================================
// OUTPUT TYPES (derived)
// =============================================================================

/// Device kind placed on the rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    /// Incoming main breaker (plain or with integrated RCD)
    Main,
    /// Voltage-monitoring relay
    Relay,
    /// Residual-current circuit breaker protecting all outgoing circuits
    UpstreamRcd,
    /// Single-pole miniature circuit breaker
    Mcb,
    /// Combined breaker + RCD for one circuit
    Rcbo,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Main => "main",
            ModuleKind::Relay => "relay",
            ModuleKind::UpstreamRcd => "upstream-rcd",
            ModuleKind::Mcb => "mcb",
            ModuleKind::Rcbo => "rcbo",
        }
    }

    /// Rail units occupied by a device of this kind.
    pub fn width(&self) -> u32 {
        match self {
            ModuleKind::Mcb => 1,
            _ => 2,
        }
    }

    pub fn poles(&self) -> u32 {
        match self {
            ModuleKind::Mcb => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A protective device on the rail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub kind: ModuleKind,
    pub name: String,
    pub amperage: u32,
    pub poles: u32,
    /// Width in rail units
    pub width: u32,
    pub product_id: String,
    pub description: String,
    /// Leakage trip threshold in mA, for devices with RCD function
    pub residual_ma: Option<u32>,
    /// Originating group, for per-circuit modules
    pub group_id: Option<String>,
}

impl Module {
    pub fn has_rcd(&self) -> bool {
        self.residual_ma.is_some()
    }
}

/// One row of the rail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RailRow {
    pub modules: Vec<Module>,
    pub used_width: u32,
    pub capacity: u32,
}

impl RailRow {
    /// Free rail units left on this row (zero for an over-wide module).
    pub fn free_units(&self) -> u32 {
        self.capacity.saturating_sub(self.used_width)
    }
}

/// Packed rail and enclosure recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RailLayout {
    pub rows: Vec<RailRow>,
    pub total_width: u32,
    pub enclosure_size: u32,
}

/// Aggregated line in the bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomLine {
    pub product_id: String,
    pub kind: ModuleKind,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl BomLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Bill of materials in first-seen order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BillOfMaterials {
    pub lines: Vec<BomLine>,
}

impl BillOfMaterials {
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn estimated_total(&self) -> f64 {
        self.lines.iter().map(BomLine::line_total).sum()
    }
}
