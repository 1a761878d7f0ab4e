//! Build file I/O service.
//!
//! Build files hold a named selection of part ids. TOML is used for `.toml`
//! files and JSON for everything else.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::BuildSpec;

/// On-disk encoding of a build file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildFormat {
    /// TOML document
    Toml,
    /// JSON document
    Json,
}

impl BuildFormat {
    /// Picks the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
        {
            Self::Toml
        } else {
            Self::Json
        }
    }
}

/// Service for loading and saving build files.
pub struct BuildService;

impl BuildService {
    /// Loads a build from a TOML or JSON file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use keebuilder::services::BuildService;
    ///
    /// let build = BuildService::load(Path::new("tofu60.toml"))?;
    /// println!("{}", build.name);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<BuildSpec> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read build file: {}", path.display()))?;

        let build = match BuildFormat::from_path(path) {
            BuildFormat::Toml => toml::from_str(&content)
                .with_context(|| format!("Failed to parse build file: {}", path.display()))?,
            BuildFormat::Json => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse build file: {}", path.display()))?,
        };

        Ok(build)
    }

    /// Saves a build, writing to a temp file first and renaming it into place.
    pub fn save(build: &BuildSpec, path: &Path) -> Result<()> {
        let content = match BuildFormat::from_path(path) {
            BuildFormat::Toml => {
                toml::to_string_pretty(build).context("Failed to serialize build as TOML")?
            }
            BuildFormat::Json => {
                serde_json::to_string_pretty(build).context("Failed to serialize build as JSON")?
            }
        };

        let temp_path = temp_path_for(path);

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp build file: {}", temp_path.display()))?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp build file to: {}", path.display()))?;

        Ok(())
    }
}

/// `build.json` -> `build.json.tmp`, so the temp file never shadows a sibling.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_build() -> BuildSpec {
        BuildSpec {
            name: "Tofu60 daily".to_string(),
            pcb_id: Some(1),
            case_id: Some(1),
            switch_id: Some(2),
            ..BuildSpec::default()
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(BuildFormat::from_path(Path::new("a.toml")), BuildFormat::Toml);
        assert_eq!(BuildFormat::from_path(Path::new("a.TOML")), BuildFormat::Toml);
        assert_eq!(BuildFormat::from_path(Path::new("a.json")), BuildFormat::Json);
        assert_eq!(BuildFormat::from_path(Path::new("build")), BuildFormat::Json);
    }

    #[test]
    fn test_save_and_load_toml() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("tofu.toml");

        BuildService::save(&sample_build(), &path)?;
        let content = fs::read_to_string(&path)?;
        assert!(content.contains("name = \"Tofu60 daily\""));
        assert!(!content.contains("plate_id"));

        assert_eq!(BuildService::load(&path)?, sample_build());
        assert!(!temp_path_for(&path).exists());
        Ok(())
    }

    #[test]
    fn test_save_and_load_json() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("tofu.json");

        BuildService::save(&sample_build(), &path)?;
        assert_eq!(BuildService::load(&path)?, sample_build());
        Ok(())
    }

    #[test]
    fn test_save_leaves_sibling_tmp_file_alone() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let sibling = temp_dir.path().join("tofu.tmp");
        fs::write(&sibling, "keep me")?;

        let path = temp_dir.path().join("tofu.json");
        BuildService::save(&sample_build(), &path)?;

        assert_eq!(fs::read_to_string(&sibling)?, "keep me");
        assert_eq!(BuildService::load(&path)?, sample_build());
        assert_eq!(
            temp_path_for(&path),
            temp_dir.path().join("tofu.json.tmp")
        );
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let err = BuildService::load(Path::new("/nonexistent/build.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read build file"));
    }

    #[test]
    fn test_load_invalid_content() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json")?;

        let err = BuildService::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse build file"));
        Ok(())
    }
}
