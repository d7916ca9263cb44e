//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! settings, component catalog, and tax bracket schedules from YAML files.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{ComponentCatalog, EmolumentComponent};

use super::registry::SettingsRegistry;
use super::types::{BracketFile, SettingsFile, TaxBracket};

/// Component catalog file structure (`components.yaml`).
#[derive(Debug, Clone, Deserialize)]
struct ComponentsFile {
    components: Vec<EmolumentComponent>,
}

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// assembles the settings registry and component catalog.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── settings.yaml    # versioned statutory settings
/// ├── components.yaml  # emolument component catalog
/// └── brackets/
///     └── 2025-01-01.yaml  # bracket schedule effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
/// let registry = loader.registry();
/// let rate = registry.get("PENSION_RATE").unwrap();
/// println!("Pension setting: {:?}", rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    registry: SettingsRegistry,
    catalog: ComponentCatalog,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns a `ConfigLoader` on success, or an error if any required file
    /// is missing (`ConfigNotFound`) or contains invalid YAML
    /// (`ConfigParseError`).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("settings.yaml");
        let settings = Self::load_yaml::<SettingsFile>(&settings_path)?;

        let components_path = path.join("components.yaml");
        let components = Self::load_yaml::<ComponentsFile>(&components_path)?;

        let brackets_dir = path.join("brackets");
        let brackets = Self::load_brackets(&brackets_dir)?;

        Ok(Self {
            registry: SettingsRegistry::new(settings.settings, brackets),
            catalog: ComponentCatalog::new(components.components),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all bracket schedule files from the brackets directory.
    fn load_brackets(brackets_dir: &Path) -> EngineResult<Vec<TaxBracket>> {
        let dir_str = brackets_dir.display().to_string();

        if !brackets_dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(brackets_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut brackets = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<BracketFile>(&path)?;
                brackets.extend(file.into_brackets());
            }
        }

        if brackets.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no bracket files found)", dir_str),
            });
        }

        Ok(brackets)
    }

    /// Returns the settings registry.
    pub fn registry(&self) -> &SettingsRegistry {
        &self.registry
    }

    /// Returns the component catalog.
    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    /// Consumes the loader, yielding the registry and catalog.
    pub fn into_parts(self) -> (SettingsRegistry, ComponentCatalog) {
        (self.registry, self.catalog)
    }
}
