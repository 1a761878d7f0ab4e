//! Individual pairwise rules.
//!
//! Every rule returns `None` when either slot of its pair is empty.

use crate::compatibility::CompatibilityIssue;
use crate::models::{Case, PartCategory, Pcb, Plate, SelectedParts, SwitchType};

/// Group membership of one side of a physical-fit pair.
struct GroupSide<'a> {
    category: PartCategory,
    id: Option<u32>,
    name: Option<&'a str>,
}

impl<'a> From<&'a Pcb> for GroupSide<'a> {
    fn from(pcb: &'a Pcb) -> Self {
        Self {
            category: PartCategory::Pcb,
            id: pcb.compatible_group_id,
            name: pcb.compatible_group_name.as_deref(),
        }
    }
}

impl<'a> From<&'a Case> for GroupSide<'a> {
    fn from(case: &'a Case) -> Self {
        Self {
            category: PartCategory::Case,
            id: case.compatible_group_id,
            name: case.compatible_group_name.as_deref(),
        }
    }
}

impl<'a> From<&'a Plate> for GroupSide<'a> {
    fn from(plate: &'a Plate) -> Self {
        Self {
            category: PartCategory::Plate,
            id: plate.compatible_group_id,
            name: plate.compatible_group_name.as_deref(),
        }
    }
}

/// Group ids decide physical fit. Missing data on either side is a warning,
/// never a pass.
fn group_fit(a: &GroupSide<'_>, b: &GroupSide<'_>) -> Option<CompatibilityIssue> {
    let parts = [a.category, b.category];

    match (a.id, b.id) {
        (Some(a_id), Some(b_id)) if a_id == b_id => None,
        (Some(_), Some(_)) => Some(CompatibilityIssue::error(
            parts,
            format!(
                "Compatible group mismatch: {} ({}) vs {} ({})",
                a.category,
                a.name.unwrap_or("unknown"),
                b.category,
                b.name.unwrap_or("unknown"),
            ),
        )),
        _ => Some(CompatibilityIssue::warning(
            parts,
            format!(
                "Compatible group not assigned: cannot verify physical fit between {} and {}",
                a.category, b.category
            ),
        )),
    }
}

/// Interface tags must be equal.
fn interface_fit(
    kind: &str,
    a: (PartCategory, SwitchType),
    b: (PartCategory, SwitchType),
) -> Option<CompatibilityIssue> {
    if a.1 == b.1 {
        return None;
    }

    Some(CompatibilityIssue::error(
        [a.0, b.0],
        format!("{kind} type mismatch: {} ({}) vs {} ({})", a.0, a.1, b.0, b.1),
    ))
}

pub(super) fn pcb_case(selection: &SelectedParts) -> Option<CompatibilityIssue> {
    let (pcb, case) = (selection.pcb.as_ref()?, selection.case.as_ref()?);
    group_fit(&pcb.into(), &case.into())
}

pub(super) fn pcb_plate(selection: &SelectedParts) -> Option<CompatibilityIssue> {
    let (pcb, plate) = (selection.pcb.as_ref()?, selection.plate.as_ref()?);
    group_fit(&pcb.into(), &plate.into())
}

pub(super) fn plate_case(selection: &SelectedParts) -> Option<CompatibilityIssue> {
    let (plate, case) = (selection.plate.as_ref()?, selection.case.as_ref()?);
    group_fit(&plate.into(), &case.into())
}

pub(super) fn pcb_switch(selection: &SelectedParts) -> Option<CompatibilityIssue> {
    let (pcb, switch) = (selection.pcb.as_ref()?, selection.switch.as_ref()?);
    interface_fit(
        "Switch",
        (PartCategory::Pcb, pcb.switch_type),
        (PartCategory::Switch, switch.switch_type),
    )
}

pub(super) fn plate_switch(selection: &SelectedParts) -> Option<CompatibilityIssue> {
    let (plate, switch) = (selection.plate.as_ref()?, selection.switch.as_ref()?);
    interface_fit(
        "Switch",
        (PartCategory::Plate, plate.switch_type),
        (PartCategory::Switch, switch.switch_type),
    )
}

// Different field names, same tag domain.
pub(super) fn switch_keycap(selection: &SelectedParts) -> Option<CompatibilityIssue> {
    let (switch, keycap) = (selection.switch.as_ref()?, selection.keycap.as_ref()?);
    interface_fit(
        "Stem",
        (PartCategory::Switch, switch.switch_type),
        (PartCategory::Keycap, keycap.stem_type),
    )
}
