//! Data models for keyboard parts, selections and builds.
//!
//! Models are plain data. They are independent of the catalog source and of
//! how results are presented.

pub mod build;
pub mod part;
pub mod selection;

// Re-export all model types
pub use build::BuildSpec;
pub use part::{
    Case, CompatibleGroup, Keycap, KeycapProfile, LayoutType, MountingType, PartCategory, Pcb,
    Plate, Stabilizer, StabilizerType, Switch, SwitchType,
};
pub use selection::{SelectedParts, MIN_SLOTS_FOR_CHECK};
