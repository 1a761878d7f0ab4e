//! Parts catalog browsing commands.

use crate::catalog::PartsCatalog;
use crate::cli::check::load_catalog;
use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::{CompatibleGroup, PartCategory};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Browse the parts catalog
#[derive(Args, Debug)]
pub struct PartsArgs {
    /// Parts catalog JSON file (defaults to the configured or built-in catalog)
    #[arg(long, value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: PartsCommand,
}

#[derive(Subcommand, Debug)]
enum PartsCommand {
    /// List parts, optionally for one category
    List(PartsListArgs),
    /// Show a single part
    Show(PartsShowArgs),
    /// List compatible groups and their members
    Groups(PartsGroupsArgs),
}

/// List parts
#[derive(Args, Debug)]
pub struct PartsListArgs {
    /// Category (pcb, case, plate, stabilizer, switch, keycap)
    #[arg(short, long)]
    category: Option<PartCategory>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Show a single part
#[derive(Args, Debug)]
pub struct PartsShowArgs {
    /// Category (pcb, case, plate, stabilizer, switch, keycap)
    category: PartCategory,

    /// Part id
    id: u32,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// List compatible groups
#[derive(Args, Debug)]
pub struct PartsGroupsArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Group with member counts for output.
#[derive(Serialize, Debug)]
struct GroupOutput<'a> {
    #[serde(flatten)]
    group: &'a CompatibleGroup,
    pcbs: usize,
    cases: usize,
    plates: usize,
}

impl PartsArgs {
    /// Execute parts subcommand
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog(self.catalog.as_deref())?;

        match &self.command {
            PartsCommand::List(args) => args.execute(&catalog),
            PartsCommand::Show(args) => args.execute(&catalog),
            PartsCommand::Groups(args) => args.execute(&catalog),
        }
    }
}

impl PartsListArgs {
    fn execute(&self, catalog: &PartsCatalog) -> CliResult<()> {
        if self.json {
            return match self.category {
                Some(category) => print_json(&category_json(catalog, category)?),
                None => print_json(catalog.all()),
            };
        }

        let categories = match self.category {
            Some(category) => vec![category],
            None => PartCategory::ALL.to_vec(),
        };

        for category in categories {
            println!("{} ({})", category.label(), catalog.count(category));
            let parts = category_json(catalog, category)?;
            for part in parts.as_array().into_iter().flatten() {
                println!("  {}", summarize(category, part));
            }
            println!();
        }

        Ok(())
    }
}

impl PartsShowArgs {
    fn execute(&self, catalog: &PartsCatalog) -> CliResult<()> {
        let part = catalog
            .part_json(self.category, self.id)
            .map_err(|e| CliError::io(e.to_string()))?
            .ok_or_else(|| {
                CliError::io(format!(
                    "{} with id {} not found in catalog",
                    self.category, self.id
                ))
            })?;

        if self.json {
            return print_json(&part);
        }

        println!("{} #{}", self.category.label(), self.id);
        if let Some(fields) = part.as_object() {
            for (key, value) in fields {
                if key == "id" || value.is_null() {
                    continue;
                }
                println!("  {:<22} {}", format!("{key}:"), display_value(value));
            }
        }

        Ok(())
    }
}

impl PartsGroupsArgs {
    fn execute(&self, catalog: &PartsCatalog) -> CliResult<()> {
        let all = catalog.all();
        let groups: Vec<GroupOutput<'_>> = catalog
            .groups()
            .iter()
            .map(|group| GroupOutput {
                group,
                pcbs: all
                    .pcbs
                    .iter()
                    .filter(|p| p.compatible_group_id == Some(group.id))
                    .count(),
                cases: all
                    .cases
                    .iter()
                    .filter(|c| c.compatible_group_id == Some(group.id))
                    .count(),
                plates: all
                    .plates
                    .iter()
                    .filter(|p| p.compatible_group_id == Some(group.id))
                    .count(),
            })
            .collect();

        if self.json {
            return print_json(&groups);
        }

        println!("Compatible groups ({})", groups.len());
        for output in &groups {
            println!(
                "  [{}] {} ({}) - {} PCB, {} case, {} plate",
                output.group.id,
                output.group.name,
                output.group.layout,
                output.pcbs,
                output.cases,
                output.plates
            );
        }

        Ok(())
    }
}

fn category_json(catalog: &PartsCatalog, category: PartCategory) -> CliResult<Value> {
    catalog
        .category_json(category)
        .map_err(|e| CliError::io(e.to_string()))
}

/// One-line description of a part record.
fn summarize(category: PartCategory, part: &Value) -> String {
    let field = |key: &str| part.get(key).and_then(Value::as_str).unwrap_or("-");

    let mut line = format!(
        "[{}] {}",
        part.get("id").and_then(Value::as_u64).unwrap_or_default(),
        field("name")
    );
    if let Some(manufacturer) = part.get("manufacturer").and_then(Value::as_str) {
        line.push_str(&format!(" ({manufacturer})"));
    }

    let details = match category {
        PartCategory::Pcb | PartCategory::Plate => {
            format!("{}, {}", field("layout"), field("switch_type"))
        }
        PartCategory::Case => format!("{}, {} mount", field("layout"), field("mounting_type")),
        PartCategory::Stabilizer => field("stab_type").to_string(),
        PartCategory::Switch => field("switch_type").to_string(),
        PartCategory::Keycap => format!("{} profile, {} stem", field("profile"), field("stem_type")),
    };
    line.push_str(&format!(" - {details}"));

    if let Some(group) = part.get("compatible_group_name").and_then(Value::as_str) {
        line.push_str(&format!(" [group: {group}]"));
    }

    line
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summarize_pcb() {
        let part = json!({
            "id": 1, "name": "DZ60", "manufacturer": "KBDfans", "layout": "60%",
            "switch_type": "MX", "compatible_group_name": "DZ60 Family"
        });
        assert_eq!(
            summarize(PartCategory::Pcb, &part),
            "[1] DZ60 (KBDfans) - 60%, MX [group: DZ60 Family]"
        );
    }

    #[test]
    fn test_summarize_keycap_without_manufacturer() {
        let part = json!({"id": 3, "name": "Blanks", "profile": "DSA", "stem_type": "Choc"});
        assert_eq!(
            summarize(PartCategory::Keycap, &part),
            "[3] Blanks - DSA profile, Choc stem"
        );
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("Aluminum")), "Aluminum");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(88.0)), "88.0");
    }
}
