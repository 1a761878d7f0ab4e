//! Named build definitions referencing catalog parts by id.

use serde::{Deserialize, Serialize};

use crate::models::part::PartCategory;

/// A named selection of part ids, as stored in a build file.
///
/// Ids are resolved against a [`crate::catalog::PartsCatalog`] before the
/// selection can be evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpec {
    /// Build name
    #[serde(default)]
    pub name: String,
    /// PCB id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcb_id: Option<u32>,
    /// Case id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<u32>,
    /// Plate id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_id: Option<u32>,
    /// Stabilizer id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stabilizer_id: Option<u32>,
    /// Switch id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_id: Option<u32>,
    /// Keycap id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keycap_id: Option<u32>,
}

impl BuildSpec {
    /// Creates an empty build with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the id stored for a slot.
    #[must_use]
    pub const fn id_for(&self, category: PartCategory) -> Option<u32> {
        match category {
            PartCategory::Pcb => self.pcb_id,
            PartCategory::Case => self.case_id,
            PartCategory::Plate => self.plate_id,
            PartCategory::Stabilizer => self.stabilizer_id,
            PartCategory::Switch => self.switch_id,
            PartCategory::Keycap => self.keycap_id,
        }
    }

    /// Sets or clears the id for a slot.
    pub fn set_id(&mut self, category: PartCategory, id: Option<u32>) {
        let slot = match category {
            PartCategory::Pcb => &mut self.pcb_id,
            PartCategory::Case => &mut self.case_id,
            PartCategory::Plate => &mut self.plate_id,
            PartCategory::Stabilizer => &mut self.stabilizer_id,
            PartCategory::Switch => &mut self.switch_id,
            PartCategory::Keycap => &mut self.keycap_id,
        };
        *slot = id;
    }

    /// Overlays every `Some` id from `other` onto this build.
    pub fn merge_ids(&mut self, other: &Self) {
        for category in PartCategory::ALL {
            if let Some(id) = other.id_for(category) {
                self.set_id(category, Some(id));
            }
        }
    }
}
