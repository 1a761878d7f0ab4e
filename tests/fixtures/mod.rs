//! Shared test fixtures for compatibility, CLI and web tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use keebuilder::models::{
    BuildSpec, Case, Keycap, KeycapProfile, LayoutType, MountingType, Pcb, Plate, Stabilizer,
    StabilizerType, Switch, SwitchType,
};
use keebuilder::services::BuildService;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a PCB in the given compatible group.
pub fn test_pcb(id: u32, group: Option<(u32, &str)>, switch_type: SwitchType) -> Pcb {
    Pcb {
        id,
        name: format!("Test PCB {id}"),
        manufacturer: Some("Test".to_string()),
        layout: LayoutType::Sixty,
        mounting_type: MountingType::Tray,
        hotswap: true,
        switch_type,
        rgb: false,
        price: None,
        image_url: None,
        compatible_group_id: group.map(|(gid, _)| gid),
        compatible_group_name: group.map(|(_, name)| name.to_string()),
    }
}

/// Creates a case in the given compatible group.
pub fn test_case(id: u32, group: Option<(u32, &str)>) -> Case {
    Case {
        id,
        name: format!("Test Case {id}"),
        manufacturer: None,
        layout: LayoutType::Sixty,
        mounting_type: MountingType::Tray,
        material: Some("Aluminum".to_string()),
        color: None,
        weight: None,
        price: None,
        image_url: None,
        compatible_group_id: group.map(|(gid, _)| gid),
        compatible_group_name: group.map(|(_, name)| name.to_string()),
    }
}

/// Creates a plate in the given compatible group.
pub fn test_plate(id: u32, group: Option<(u32, &str)>, switch_type: SwitchType) -> Plate {
    Plate {
        id,
        name: format!("Test Plate {id}"),
        manufacturer: None,
        layout: LayoutType::Sixty,
        material: Some("Brass".to_string()),
        switch_type,
        price: None,
        image_url: None,
        compatible_group_id: group.map(|(gid, _)| gid),
        compatible_group_name: group.map(|(_, name)| name.to_string()),
    }
}

/// Creates a stabilizer set.
pub fn test_stabilizer(id: u32) -> Stabilizer {
    Stabilizer {
        id,
        name: format!("Test Stabilizer {id}"),
        manufacturer: None,
        stab_type: StabilizerType::ScrewIn,
        size: Some("2u".to_string()),
        price: None,
        image_url: None,
    }
}

/// Creates a switch.
pub fn test_switch(id: u32, switch_type: SwitchType) -> Switch {
    Switch {
        id,
        name: format!("Test Switch {id}"),
        manufacturer: None,
        switch_type,
        pin_count: Some(5),
        actuation_force: Some(45.0),
        tactile: false,
        clicky: false,
        price: None,
        image_url: None,
    }
}

/// Creates a keycap set.
pub fn test_keycap(id: u32, stem_type: SwitchType) -> Keycap {
    Keycap {
        id,
        name: format!("Test Keycaps {id}"),
        manufacturer: None,
        profile: KeycapProfile::Cherry,
        material: Some("PBT".to_string()),
        stem_type,
        price: None,
        image_url: None,
    }
}

/// Minimal catalog JSON with two groups and a mix of switch types.
pub fn test_catalog_json() -> String {
    serde_json::json!({
        "version": "test",
        "compatible_groups": [
            {"id": 10, "name": "Alpha Family", "layout": "60%"},
            {"id": 20, "name": "Beta Family", "layout": "65%"}
        ],
        "pcbs": [
            {"id": 1, "name": "Alpha PCB", "layout": "60%", "mounting_type": "Tray",
             "switch_type": "MX", "compatible_group_id": 10},
            {"id": 2, "name": "Loose PCB", "layout": "60%", "mounting_type": "Tray",
             "switch_type": "MX"}
        ],
        "cases": [
            {"id": 1, "name": "Alpha Case", "layout": "60%", "mounting_type": "Tray",
             "compatible_group_id": 10},
            {"id": 2, "name": "Beta Case", "layout": "65%", "mounting_type": "Gasket",
             "compatible_group_id": 20}
        ],
        "plates": [
            {"id": 1, "name": "Alpha Plate", "layout": "60%", "switch_type": "MX",
             "compatible_group_id": 10}
        ],
        "stabilizers": [
            {"id": 1, "name": "Test Stabs", "stab_type": "Screw-in"}
        ],
        "switches": [
            {"id": 1, "name": "Test MX", "switch_type": "MX"},
            {"id": 2, "name": "Test Alps", "switch_type": "Alps"}
        ],
        "keycaps": [
            {"id": 1, "name": "Test Caps", "profile": "Cherry", "stem_type": "MX"}
        ]
    })
    .to_string()
}

/// Writes the test catalog into a temp directory.
///
/// # Returns
/// The catalog path and the `TempDir` that owns it (keep it alive).
pub fn create_temp_catalog_file() -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("catalog.json");
    fs::write(&path, test_catalog_json()).expect("Failed to write catalog");
    (path, temp_dir)
}

/// Writes a build file (TOML or JSON by extension) into `dir`.
pub fn write_build_file(dir: &Path, file_name: &str, build: &BuildSpec) -> PathBuf {
    let path = dir.join(file_name);
    BuildService::save(build, &path).expect("Failed to write build file");
    path
}

/// Creates a build with the given ids, in slot order
/// (pcb, case, plate, stabilizer, switch, keycap).
pub fn test_build(name: &str, ids: [Option<u32>; 6]) -> BuildSpec {
    let [pcb_id, case_id, plate_id, stabilizer_id, switch_id, keycap_id] = ids;
    BuildSpec {
        name: name.to_string(),
        pcb_id,
        case_id,
        plate_id,
        stabilizer_id,
        switch_id,
        keycap_id,
    }
}

/// Creates an isolated, empty config directory for CLI runs.
pub fn isolated_config_dir() -> TempDir {
    TempDir::new().expect("Failed to create config dir")
}
