//! The current part selection of a build.

use serde::{Deserialize, Serialize};

use crate::models::part::{Case, Keycap, PartCategory, Pcb, Plate, Stabilizer, Switch};

/// Minimum number of populated slots before a verdict is worth showing.
pub const MIN_SLOTS_FOR_CHECK: usize = 2;

/// Six optional slots, one per part category.
///
/// Every slot may be empty at any time; an empty slot is never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedParts {
    /// Selected PCB
    #[serde(default)]
    pub pcb: Option<Pcb>,
    /// Selected case
    #[serde(default)]
    pub case: Option<Case>,
    /// Selected plate
    #[serde(default)]
    pub plate: Option<Plate>,
    /// Selected stabilizers
    #[serde(default)]
    pub stabilizer: Option<Stabilizer>,
    /// Selected switch
    #[serde(default)]
    pub switch: Option<Switch>,
    /// Selected keycaps
    #[serde(default)]
    pub keycap: Option<Keycap>,
}

impl SelectedParts {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the PCB slot.
    pub fn with_pcb(mut self, pcb: Pcb) -> Self {
        self.pcb = Some(pcb);
        self
    }

    /// Sets the case slot.
    pub fn with_case(mut self, case: Case) -> Self {
        self.case = Some(case);
        self
    }

    /// Sets the plate slot.
    pub fn with_plate(mut self, plate: Plate) -> Self {
        self.plate = Some(plate);
        self
    }

    /// Sets the stabilizer slot.
    pub fn with_stabilizer(mut self, stabilizer: Stabilizer) -> Self {
        self.stabilizer = Some(stabilizer);
        self
    }

    /// Sets the switch slot.
    pub fn with_switch(mut self, switch: Switch) -> Self {
        self.switch = Some(switch);
        self
    }

    /// Sets the keycap slot.
    pub fn with_keycap(mut self, keycap: Keycap) -> Self {
        self.keycap = Some(keycap);
        self
    }

    /// Returns whether the given slot holds a part.
    #[must_use]
    pub const fn has(&self, category: PartCategory) -> bool {
        match category {
            PartCategory::Pcb => self.pcb.is_some(),
            PartCategory::Case => self.case.is_some(),
            PartCategory::Plate => self.plate.is_some(),
            PartCategory::Stabilizer => self.stabilizer.is_some(),
            PartCategory::Switch => self.switch.is_some(),
            PartCategory::Keycap => self.keycap.is_some(),
        }
    }

    /// Number of populated slots.
    #[must_use]
    pub fn populated_count(&self) -> usize {
        PartCategory::ALL
            .iter()
            .filter(|category| self.has(**category))
            .count()
    }

    /// Returns true once enough slots are populated for a verdict to be shown.
    ///
    /// This is a display policy for callers; evaluation itself accepts any
    /// selection.
    #[must_use]
    pub fn is_ready_for_check(&self) -> bool {
        self.populated_count() >= MIN_SLOTS_FOR_CHECK
    }
}
