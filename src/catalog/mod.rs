//! Parts catalog.
//!
//! The catalog supplies the immutable part records a selection is built from.
//! A seed catalog is embedded in the binary; a JSON file with the same shape
//! can replace it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::models::{
    BuildSpec, Case, CompatibleGroup, Keycap, PartCategory, Pcb, Plate, SelectedParts,
    Stabilizer, Switch,
};

/// Every part of the catalog keyed by category, plus the compatible groups.
///
/// This is also the JSON shape of catalog files and of `GET /api/parts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllParts {
    /// PCBs
    #[serde(default)]
    pub pcbs: Vec<Pcb>,
    /// Cases
    #[serde(default)]
    pub cases: Vec<Case>,
    /// Plates
    #[serde(default)]
    pub plates: Vec<Plate>,
    /// Stabilizers
    #[serde(default)]
    pub stabilizers: Vec<Stabilizer>,
    /// Switches
    #[serde(default)]
    pub switches: Vec<Switch>,
    /// Keycaps
    #[serde(default)]
    pub keycaps: Vec<Keycap>,
    /// Compatible groups
    #[serde(default)]
    pub compatible_groups: Vec<CompatibleGroup>,
}

/// Catalog file schema.
#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    version: Option<String>,
    #[serde(flatten)]
    parts: AllParts,
}

/// Loaded catalog with id lookup.
#[derive(Debug, Clone)]
pub struct PartsCatalog {
    parts: AllParts,
    /// (category, id) -> index into the category list
    lookup: HashMap<(PartCategory, u32), usize>,
    /// group id -> index into `compatible_groups`
    groups: HashMap<u32, usize>,
}

impl PartsCatalog {
    /// Loads the seed catalog embedded at compile time.
    pub fn load_embedded() -> Result<Self> {
        let json_data = include_str!("parts.json");
        Self::from_json(json_data).context("Failed to parse embedded parts.json")
    }

    /// Loads a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("Failed to load catalog file: {}", path.display()))
    }

    /// Loads `path` when given, otherwise the embedded seed catalog.
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load_embedded(),
        }
    }

    /// Parses a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json).context("Invalid catalog JSON")?;
        let catalog = Self::from_parts(file.parts)?;

        tracing::debug!(
            version = file.version.as_deref().unwrap_or("unversioned"),
            parts = catalog.part_count(),
            groups = catalog.parts.compatible_groups.len(),
            "loaded parts catalog"
        );

        Ok(catalog)
    }

    /// Builds a catalog from part lists.
    ///
    /// Takes group names from the group table (overriding any name on the part)
    /// and rejects duplicate ids within a category or references to unknown groups.
    pub fn from_parts(mut parts: AllParts) -> Result<Self> {
        let mut groups = HashMap::new();
        for (idx, group) in parts.compatible_groups.iter().enumerate() {
            if groups.insert(group.id, idx).is_some() {
                anyhow::bail!("Duplicate compatible group id {}", group.id);
            }
        }

        let group_names: HashMap<u32, String> = parts
            .compatible_groups
            .iter()
            .map(|group| (group.id, group.name.clone()))
            .collect();

        for pcb in &mut parts.pcbs {
            fill_group_name(
                &group_names,
                PartCategory::Pcb,
                pcb.id,
                pcb.compatible_group_id,
                &mut pcb.compatible_group_name,
            )?;
        }
        for case in &mut parts.cases {
            fill_group_name(
                &group_names,
                PartCategory::Case,
                case.id,
                case.compatible_group_id,
                &mut case.compatible_group_name,
            )?;
        }
        for plate in &mut parts.plates {
            fill_group_name(
                &group_names,
                PartCategory::Plate,
                plate.id,
                plate.compatible_group_id,
                &mut plate.compatible_group_name,
            )?;
        }

        let mut lookup = HashMap::new();
        let ids: [(PartCategory, Vec<u32>); 6] = [
            (PartCategory::Pcb, parts.pcbs.iter().map(|p| p.id).collect()),
            (PartCategory::Case, parts.cases.iter().map(|p| p.id).collect()),
            (PartCategory::Plate, parts.plates.iter().map(|p| p.id).collect()),
            (
                PartCategory::Stabilizer,
                parts.stabilizers.iter().map(|p| p.id).collect(),
            ),
            (
                PartCategory::Switch,
                parts.switches.iter().map(|p| p.id).collect(),
            ),
            (
                PartCategory::Keycap,
                parts.keycaps.iter().map(|p| p.id).collect(),
            ),
        ];
        for (category, category_ids) in ids {
            for (idx, id) in category_ids.into_iter().enumerate() {
                if lookup.insert((category, id), idx).is_some() {
                    anyhow::bail!("Duplicate {category} id {id} in catalog");
                }
            }
        }

        Ok(Self {
            parts,
            lookup,
            groups,
        })
    }

    /// All parts and groups.
    #[must_use]
    pub const fn all(&self) -> &AllParts {
        &self.parts
    }

    /// Compatible groups in catalog order.
    #[must_use]
    pub fn groups(&self) -> &[CompatibleGroup] {
        &self.parts.compatible_groups
    }

    /// Gets a compatible group by id.
    #[must_use]
    pub fn group(&self, id: u32) -> Option<&CompatibleGroup> {
        let idx = self.groups.get(&id)?;
        self.parts.compatible_groups.get(*idx)
    }

    fn index(&self, category: PartCategory, id: u32) -> Option<usize> {
        self.lookup.get(&(category, id)).copied()
    }

    /// Gets a PCB by id.
    #[must_use]
    pub fn pcb(&self, id: u32) -> Option<&Pcb> {
        self.parts.pcbs.get(self.index(PartCategory::Pcb, id)?)
    }

    /// Gets a case by id.
    #[must_use]
    pub fn case(&self, id: u32) -> Option<&Case> {
        self.parts.cases.get(self.index(PartCategory::Case, id)?)
    }

    /// Gets a plate by id.
    #[must_use]
    pub fn plate(&self, id: u32) -> Option<&Plate> {
        self.parts.plates.get(self.index(PartCategory::Plate, id)?)
    }

    /// Gets a stabilizer by id.
    #[must_use]
    pub fn stabilizer(&self, id: u32) -> Option<&Stabilizer> {
        self.parts
            .stabilizers
            .get(self.index(PartCategory::Stabilizer, id)?)
    }

    /// Gets a switch by id.
    #[must_use]
    pub fn switch(&self, id: u32) -> Option<&Switch> {
        self.parts
            .switches
            .get(self.index(PartCategory::Switch, id)?)
    }

    /// Gets a keycap set by id.
    #[must_use]
    pub fn keycap(&self, id: u32) -> Option<&Keycap> {
        self.parts
            .keycaps
            .get(self.index(PartCategory::Keycap, id)?)
    }

    /// Returns true if the category holds a part with this id.
    #[must_use]
    pub fn contains(&self, category: PartCategory, id: u32) -> bool {
        self.lookup.contains_key(&(category, id))
    }

    /// Number of parts in one category.
    #[must_use]
    pub fn count(&self, category: PartCategory) -> usize {
        match category {
            PartCategory::Pcb => self.parts.pcbs.len(),
            PartCategory::Case => self.parts.cases.len(),
            PartCategory::Plate => self.parts.plates.len(),
            PartCategory::Stabilizer => self.parts.stabilizers.len(),
            PartCategory::Switch => self.parts.switches.len(),
            PartCategory::Keycap => self.parts.keycaps.len(),
        }
    }

    /// Total number of parts across all categories.
    #[must_use]
    pub fn part_count(&self) -> usize {
        PartCategory::ALL.iter().map(|c| self.count(*c)).sum()
    }

    /// Serializes one category's part list.
    pub fn category_json(&self, category: PartCategory) -> Result<Value> {
        let value = match category {
            PartCategory::Pcb => serde_json::to_value(&self.parts.pcbs),
            PartCategory::Case => serde_json::to_value(&self.parts.cases),
            PartCategory::Plate => serde_json::to_value(&self.parts.plates),
            PartCategory::Stabilizer => serde_json::to_value(&self.parts.stabilizers),
            PartCategory::Switch => serde_json::to_value(&self.parts.switches),
            PartCategory::Keycap => serde_json::to_value(&self.parts.keycaps),
        };
        value.with_context(|| format!("Failed to serialize {} list", category.slug()))
    }

    /// Serializes a single part, or `None` if the id is unknown.
    pub fn part_json(&self, category: PartCategory, id: u32) -> Result<Option<Value>> {
        let value = match category {
            PartCategory::Pcb => self.pcb(id).map(serde_json::to_value),
            PartCategory::Case => self.case(id).map(serde_json::to_value),
            PartCategory::Plate => self.plate(id).map(serde_json::to_value),
            PartCategory::Stabilizer => self.stabilizer(id).map(serde_json::to_value),
            PartCategory::Switch => self.switch(id).map(serde_json::to_value),
            PartCategory::Keycap => self.keycap(id).map(serde_json::to_value),
        };
        value
            .transpose()
            .with_context(|| format!("Failed to serialize {category} {id}"))
    }

    /// Display name of a part, if present.
    #[must_use]
    pub fn part_name(&self, category: PartCategory, id: u32) -> Option<&str> {
        let name = match category {
            PartCategory::Pcb => &self.pcb(id)?.name,
            PartCategory::Case => &self.case(id)?.name,
            PartCategory::Plate => &self.plate(id)?.name,
            PartCategory::Stabilizer => &self.stabilizer(id)?.name,
            PartCategory::Switch => &self.switch(id)?.name,
            PartCategory::Keycap => &self.keycap(id)?.name,
        };
        Some(name.as_str())
    }

    /// Resolves the ids of a build into a selection of part records.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first id that is not in the catalog.
    pub fn resolve(&self, build: &BuildSpec) -> Result<SelectedParts> {
        for category in PartCategory::ALL {
            if let Some(id) = build.id_for(category) {
                if !self.contains(category, id) {
                    anyhow::bail!("{category} with id {id} not found in catalog");
                }
            }
        }

        Ok(SelectedParts {
            pcb: build.pcb_id.and_then(|id| self.pcb(id)).cloned(),
            case: build.case_id.and_then(|id| self.case(id)).cloned(),
            plate: build.plate_id.and_then(|id| self.plate(id)).cloned(),
            stabilizer: build.stabilizer_id.and_then(|id| self.stabilizer(id)).cloned(),
            switch: build.switch_id.and_then(|id| self.switch(id)).cloned(),
            keycap: build.keycap_id.and_then(|id| self.keycap(id)).cloned(),
        })
    }
}

/// Sets a part's group name from the group table; the group id is authoritative.
fn fill_group_name(
    group_names: &HashMap<u32, String>,
    category: PartCategory,
    part_id: u32,
    group_id: Option<u32>,
    group_name: &mut Option<String>,
) -> Result<()> {
    let Some(group_id) = group_id else {
        return Ok(());
    };

    let name = group_names.get(&group_id).with_context(|| {
        format!("{category} {part_id} references unknown compatible group {group_id}")
    })?;

    if group_name.as_ref() != Some(name) {
        if let Some(stale) = group_name.as_deref() {
            tracing::warn!(
                "{category} {part_id} names group {group_id} '{stale}', using '{name}' from the group table"
            );
        }
        *group_name = Some(name.clone());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SwitchType;

    #[test]
    fn test_load_embedded() {
        let catalog = PartsCatalog::load_embedded().unwrap();
        assert_eq!(catalog.count(PartCategory::Pcb), 4);
        assert_eq!(catalog.count(PartCategory::Keycap), 3);
        assert_eq!(catalog.groups().len(), 3);
        assert_eq!(catalog.part_count(), 19);
    }

    #[test]
    fn test_group_names_filled_from_table() {
        let catalog = PartsCatalog::load_embedded().unwrap();
        let dz60 = catalog.pcb(1).unwrap();
        assert_eq!(dz60.compatible_group_id, Some(1));
        assert_eq!(dz60.compatible_group_name.as_deref(), Some("DZ60 Family"));

        let gh60 = catalog.pcb(4).unwrap();
        assert_eq!(gh60.compatible_group_id, None);
        assert_eq!(gh60.compatible_group_name, None);
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = PartsCatalog::load_embedded().unwrap();
        assert_eq!(catalog.switch(4).unwrap().switch_type, SwitchType::Choc);
        assert_eq!(catalog.keycap(1).unwrap().name, "GMK Olivia");
        assert!(catalog.case(99).is_none());
        assert_eq!(catalog.group(2).unwrap().name, "KBD67 Lite Family");
        assert_eq!(catalog.part_name(PartCategory::Plate, 3), Some("Alps64 Steel Plate"));
    }

    #[test]
    fn test_unknown_group_reference_rejected() {
        let json = r#"{
            "pcbs": [{"id": 1, "name": "X", "layout": "60%", "mounting_type": "Tray",
                      "switch_type": "MX", "compatible_group_id": 9}]
        }"#;
        let err = PartsCatalog::from_json(json).unwrap_err();
        assert!(format!("{err:#}").contains("unknown compatible group 9"));
    }

    #[test]
    fn test_group_name_taken_from_table() {
        let json = r#"{
            "compatible_groups": [{"id": 1, "name": "DZ60 Family", "layout": "60%"}],
            "cases": [{"id": 1, "name": "X", "layout": "60%", "mounting_type": "Tray",
                       "compatible_group_id": 1, "compatible_group_name": "Old Name"}]
        }"#;
        let catalog = PartsCatalog::from_json(json).unwrap();
        assert_eq!(
            catalog.case(1).unwrap().compatible_group_name.as_deref(),
            Some("DZ60 Family")
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{
            "switches": [
                {"id": 1, "name": "A", "switch_type": "MX"},
                {"id": 1, "name": "B", "switch_type": "MX"}
            ]
        }"#;
        let err = PartsCatalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate Switch id 1"));
    }

    #[test]
    fn test_same_id_in_different_categories_allowed() {
        let json = r#"{
            "switches": [{"id": 1, "name": "A", "switch_type": "MX"}],
            "keycaps": [{"id": 1, "name": "B", "profile": "SA", "stem_type": "MX"}]
        }"#;
        let catalog = PartsCatalog::from_json(json).unwrap();
        assert_eq!(catalog.part_count(), 2);
    }

    #[test]
    fn test_resolve_build() {
        let catalog = PartsCatalog::load_embedded().unwrap();
        let build = BuildSpec {
            name: "Tofu".to_string(),
            pcb_id: Some(1),
            case_id: Some(1),
            switch_id: Some(2),
            ..BuildSpec::default()
        };
        let selection = catalog.resolve(&build).unwrap();
        assert_eq!(selection.populated_count(), 3);
        assert_eq!(selection.case.unwrap().name, "Tofu60");
    }

    #[test]
    fn test_resolve_unknown_id() {
        let catalog = PartsCatalog::load_embedded().unwrap();
        let build = BuildSpec {
            keycap_id: Some(42),
            ..BuildSpec::default()
        };
        let err = catalog.resolve(&build).unwrap_err();
        assert_eq!(err.to_string(), "Keycap with id 42 not found in catalog");
    }

    #[test]
    fn test_part_json() {
        let catalog = PartsCatalog::load_embedded().unwrap();
        let value = catalog.part_json(PartCategory::Case, 2).unwrap().unwrap();
        assert_eq!(value["name"], "KBD67 Lite");
        assert_eq!(value["compatible_group_name"], "KBD67 Lite Family");
        assert!(catalog.part_json(PartCategory::Case, 77).unwrap().is_none());

        let list = catalog.category_json(PartCategory::Stabilizer).unwrap();
        assert_eq!(list.as_array().unwrap().len(), 2);
    }
}
