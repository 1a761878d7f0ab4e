//! Compatibility check command.

use crate::catalog::PartsCatalog;
use crate::cli::common::{print_json, CliError, CliResult};
use crate::compatibility::{CompatibilityEvaluator, CompatibilityResult};
use crate::config::Config;
use crate::models::{BuildSpec, PartCategory, SelectedParts, MIN_SLOTS_FOR_CHECK};
use crate::services::BuildService;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Check whether a selection of parts can be assembled
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Build file (TOML or JSON) with part ids
    #[arg(short, long, value_name = "FILE")]
    pub build: Option<PathBuf>,

    /// PCB id (overrides the build file)
    #[arg(long, value_name = "ID")]
    pub pcb: Option<u32>,

    /// Case id (overrides the build file)
    #[arg(long, value_name = "ID")]
    pub case: Option<u32>,

    /// Plate id (overrides the build file)
    #[arg(long, value_name = "ID")]
    pub plate: Option<u32>,

    /// Stabilizer id (overrides the build file)
    #[arg(long, value_name = "ID")]
    pub stabilizer: Option<u32>,

    /// Switch id (overrides the build file)
    #[arg(long, value_name = "ID")]
    pub switch: Option<u32>,

    /// Keycap id (overrides the build file)
    #[arg(long, value_name = "ID")]
    pub keycap: Option<u32>,

    /// Parts catalog JSON file (defaults to the configured or built-in catalog)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Write the resulting build to this file
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// JSON output of the check command.
#[derive(Debug, Serialize)]
struct CheckResponse<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<&'a str>,
    selected: Vec<SelectedSlot<'a>>,
    ready: bool,
    #[serde(flatten)]
    result: &'a CompatibilityResult,
}

#[derive(Debug, Serialize)]
struct SelectedSlot<'a> {
    category: PartCategory,
    id: u32,
    name: &'a str,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> CliResult<()> {
        let mut build = match &self.build {
            Some(path) => BuildService::load(path).map_err(|e| CliError::io(format!("{e:#}")))?,
            None => BuildSpec::default(),
        };
        build.merge_ids(&self.flag_ids());

        let catalog = load_catalog(self.catalog.as_deref())?;
        let selection = catalog
            .resolve(&build)
            .map_err(|e| CliError::io(e.to_string()))?;

        let result = CompatibilityEvaluator::new(&selection).evaluate();

        if let Some(path) = &self.save {
            BuildService::save(&build, path).map_err(|e| CliError::io(format!("{e:#}")))?;
        }

        let selected = selected_slots(&catalog, &build);

        if self.json {
            print_json(&CheckResponse {
                build: Some(build.name.as_str()).filter(|name| !name.is_empty()),
                selected,
                ready: selection.is_ready_for_check(),
                result: &result,
            })?;
        } else {
            print_human(&build, &selected, &selection, &result);
            if let Some(path) = &self.save {
                println!("\nBuild saved to {}", path.display());
            }
        }

        if !result.compatible {
            return Err(CliError::validation("Parts are not compatible"));
        }

        if self.strict && result.warning_count() > 0 {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }

    /// Ids given on the command line.
    fn flag_ids(&self) -> BuildSpec {
        BuildSpec {
            name: String::new(),
            pcb_id: self.pcb,
            case_id: self.case,
            plate_id: self.plate,
            stabilizer_id: self.stabilizer,
            switch_id: self.switch,
            keycap_id: self.keycap,
        }
    }
}

/// Loads the catalog from the flag, then the config file, then the built-in seed.
pub fn load_catalog(flag: Option<&Path>) -> CliResult<PartsCatalog> {
    let configured = if flag.is_none() {
        Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?
            .catalog
            .path
    } else {
        None
    };

    PartsCatalog::load_or_embedded(flag.or(configured.as_deref()))
        .map_err(|e| CliError::io(format!("{e:#}")))
}

fn selected_slots<'a>(catalog: &'a PartsCatalog, build: &BuildSpec) -> Vec<SelectedSlot<'a>> {
    PartCategory::ALL
        .iter()
        .filter_map(|category| {
            let id = build.id_for(*category)?;
            let name = catalog.part_name(*category, id)?;
            Some(SelectedSlot {
                category: *category,
                id,
                name,
            })
        })
        .collect()
}

fn print_human(
    build: &BuildSpec,
    selected: &[SelectedSlot<'_>],
    selection: &SelectedParts,
    result: &CompatibilityResult,
) {
    if !build.name.is_empty() {
        println!("Build: {}", build.name);
    }

    println!("Selected parts:");
    if selected.is_empty() {
        println!("  (none)");
    }
    for slot in selected {
        println!("  {:<10} [{}] {}", slot.category.label(), slot.id, slot.name);
    }
    println!();

    if !selection.is_ready_for_check() {
        println!("Select at least {MIN_SLOTS_FOR_CHECK} parts to check compatibility.");
        return;
    }

    print!("{}", result.format_message());
}
