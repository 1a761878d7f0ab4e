//! Part records for the six build slots.
//!
//! Each category is an independent record type. The compatibility rules read
//! fields directly per pair, so there is no shared trait over "a part".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nominal keyboard form factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutType {
    /// 60% layout
    #[serde(rename = "60%")]
    Sixty,
    /// 65% layout
    #[serde(rename = "65%")]
    SixtyFive,
    /// 75% layout
    #[serde(rename = "75%")]
    SeventyFive,
    /// Tenkeyless
    #[serde(rename = "TKL")]
    Tkl,
    /// Full size with numpad
    #[serde(rename = "Full")]
    Full,
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Sixty => "60%",
            Self::SixtyFive => "65%",
            Self::SeventyFive => "75%",
            Self::Tkl => "TKL",
            Self::Full => "Full",
        };
        f.write_str(label)
    }
}

/// Structural mounting scheme of a case or PCB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MountingType {
    /// Tray mount
    Tray,
    /// Gasket mount
    Gasket,
    /// Top mount
    Top,
    /// Sandwich mount
    Sandwich,
}

impl fmt::Display for MountingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Switch interface tag.
///
/// Shared by switch sockets (PCB, plate), switches themselves and keycap stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwitchType {
    /// Cherry MX style
    #[serde(rename = "MX")]
    Mx,
    /// Alps style
    Alps,
    /// Kailh Choc low profile
    Choc,
}

impl fmt::Display for SwitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Mx => "MX",
            Self::Alps => "Alps",
            Self::Choc => "Choc",
        };
        f.write_str(label)
    }
}

/// Stabilizer mounting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StabilizerType {
    /// PCB screw-in
    #[serde(rename = "Screw-in")]
    ScrewIn,
    /// Plate mounted
    #[serde(rename = "Plate-mount")]
    PlateMount,
    /// PCB snap-in
    #[serde(rename = "Snap-in")]
    SnapIn,
}

/// Keycap sculpt profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeycapProfile {
    /// Cherry profile
    Cherry,
    /// OEM profile
    #[serde(rename = "OEM")]
    Oem,
    /// SA profile
    #[serde(rename = "SA")]
    Sa,
    /// DSA profile
    #[serde(rename = "DSA")]
    Dsa,
    /// MT3 profile
    #[serde(rename = "MT3")]
    Mt3,
}

/// One of the six slots of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartCategory {
    /// Printed circuit board
    #[serde(rename = "PCB")]
    Pcb,
    /// Case
    Case,
    /// Switch plate
    Plate,
    /// Stabilizer set
    Stabilizer,
    /// Switch
    Switch,
    /// Keycap set
    Keycap,
}

impl PartCategory {
    /// All categories in slot order.
    pub const ALL: [Self; 6] = [
        Self::Pcb,
        Self::Case,
        Self::Plate,
        Self::Stabilizer,
        Self::Switch,
        Self::Keycap,
    ];

    /// Display label used in issue part lists (e.g. "PCB").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pcb => "PCB",
            Self::Case => "Case",
            Self::Plate => "Plate",
            Self::Stabilizer => "Stabilizer",
            Self::Switch => "Switch",
            Self::Keycap => "Keycap",
        }
    }

    /// Plural slug used by the catalog and the HTTP API (e.g. "switches").
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Pcb => "pcbs",
            Self::Case => "cases",
            Self::Plate => "plates",
            Self::Stabilizer => "stabilizers",
            Self::Switch => "switches",
            Self::Keycap => "keycaps",
        }
    }
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PartCategory {
    type Err = anyhow::Error;

    /// Accepts the singular or plural name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pcb" | "pcbs" => Ok(Self::Pcb),
            "case" | "cases" => Ok(Self::Case),
            "plate" | "plates" => Ok(Self::Plate),
            "stabilizer" | "stabilizers" => Ok(Self::Stabilizer),
            "switch" | "switches" => Ok(Self::Switch),
            "keycap" | "keycaps" => Ok(Self::Keycap),
            other => anyhow::bail!(
                "Unknown part category '{other}' (expected one of: pcb, case, plate, stabilizer, switch, keycap)"
            ),
        }
    }
}

/// Manufacturer-defined family of parts that physically fit together.
///
/// Group membership is the authoritative fit signal for PCB, case and plate;
/// the layout tag is informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibleGroup {
    /// Group identifier
    pub id: u32,
    /// Display name (e.g. "DZ60 Family")
    pub name: String,
    /// Nominal layout of the family
    pub layout: LayoutType,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Printed circuit board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pcb {
    /// Catalog identifier
    pub id: u32,
    /// Product name
    pub name: String,
    /// Manufacturer
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Nominal layout
    pub layout: LayoutType,
    /// Mounting scheme
    pub mounting_type: MountingType,
    /// Hot-swap sockets
    #[serde(default)]
    pub hotswap: bool,
    /// Switch interface the sockets accept
    pub switch_type: SwitchType,
    /// Per-key RGB
    #[serde(default)]
    pub rgb: bool,
    /// Price
    #[serde(default)]
    pub price: Option<f64>,
    /// Product image
    #[serde(default)]
    pub image_url: Option<String>,
    /// Physical-fit group
    #[serde(default)]
    pub compatible_group_id: Option<u32>,
    /// Physical-fit group display name
    #[serde(default)]
    pub compatible_group_name: Option<String>,
}

/// Keyboard case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Catalog identifier
    pub id: u32,
    /// Product name
    pub name: String,
    /// Manufacturer
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Nominal layout
    pub layout: LayoutType,
    /// Mounting scheme
    pub mounting_type: MountingType,
    /// Material (e.g. "Aluminum")
    #[serde(default)]
    pub material: Option<String>,
    /// Color
    #[serde(default)]
    pub color: Option<String>,
    /// Weight in grams
    #[serde(default)]
    pub weight: Option<f64>,
    /// Price
    #[serde(default)]
    pub price: Option<f64>,
    /// Product image
    #[serde(default)]
    pub image_url: Option<String>,
    /// Physical-fit group
    #[serde(default)]
    pub compatible_group_id: Option<u32>,
    /// Physical-fit group display name
    #[serde(default)]
    pub compatible_group_name: Option<String>,
}

/// Switch plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    /// Catalog identifier
    pub id: u32,
    /// Product name
    pub name: String,
    /// Manufacturer
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Nominal layout
    pub layout: LayoutType,
    /// Material (e.g. "Polycarbonate")
    #[serde(default)]
    pub material: Option<String>,
    /// Switch interface the cutouts accept
    pub switch_type: SwitchType,
    /// Price
    #[serde(default)]
    pub price: Option<f64>,
    /// Product image
    #[serde(default)]
    pub image_url: Option<String>,
    /// Physical-fit group
    #[serde(default)]
    pub compatible_group_id: Option<u32>,
    /// Physical-fit group display name
    #[serde(default)]
    pub compatible_group_name: Option<String>,
}

/// Stabilizer set. No field takes part in compatibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stabilizer {
    /// Catalog identifier
    pub id: u32,
    /// Product name
    pub name: String,
    /// Manufacturer
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Mounting style
    pub stab_type: StabilizerType,
    /// Supported sizes (e.g. "2u, 6.25u")
    #[serde(default)]
    pub size: Option<String>,
    /// Price
    #[serde(default)]
    pub price: Option<f64>,
    /// Product image
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Key switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Switch {
    /// Catalog identifier
    pub id: u32,
    /// Product name
    pub name: String,
    /// Manufacturer
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Interface tag
    pub switch_type: SwitchType,
    /// 3 or 5 pin
    #[serde(default)]
    pub pin_count: Option<u8>,
    /// Actuation force in grams
    #[serde(default)]
    pub actuation_force: Option<f64>,
    /// Tactile bump
    #[serde(default)]
    pub tactile: bool,
    /// Audible click
    #[serde(default)]
    pub clicky: bool,
    /// Price per switch
    #[serde(default)]
    pub price: Option<f64>,
    /// Product image
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Keycap set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keycap {
    /// Catalog identifier
    pub id: u32,
    /// Product name
    pub name: String,
    /// Manufacturer
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Sculpt profile
    pub profile: KeycapProfile,
    /// Material (e.g. "PBT")
    #[serde(default)]
    pub material: Option<String>,
    /// Stem interface, same tag domain as [`SwitchType`]
    pub stem_type: SwitchType,
    /// Price
    #[serde(default)]
    pub price: Option<f64>,
    /// Product image
    #[serde(default)]
    pub image_url: Option<String>,
}
