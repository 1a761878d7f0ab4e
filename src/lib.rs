//! Keebuilder Library
//!
//! This library provides the core of the keebuilder custom keyboard build
//! checker: the part models, the parts catalog, and the rule engine that
//! decides whether a selection of PCB, case, plate, stabilizers, switches
//! and keycaps can be assembled.
//!
//! # Example
//!
//! ```
//! use keebuilder::catalog::PartsCatalog;
//! use keebuilder::compatibility::evaluate;
//! use keebuilder::models::BuildSpec;
//!
//! let catalog = PartsCatalog::load_embedded().unwrap();
//! let mut build = BuildSpec::new("Tofu60");
//! build.pcb_id = Some(1);
//! build.case_id = Some(1);
//!
//! let selection = catalog.resolve(&build).unwrap();
//! assert!(evaluate(&selection).compatible);
//! ```

// Module declarations
pub mod catalog;
pub mod cli;
pub mod compatibility;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;

#[cfg(feature = "web")]
pub mod web;
