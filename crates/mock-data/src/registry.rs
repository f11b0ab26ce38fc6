//! Preset registry types and JSON parsing.
//!
//! A preset names a seed together with a set of collection counts, so a
//! fixture snapshot can be regenerated by name. The registry is loaded from
//! a versioned JSON document:
//!
//! ```json
//! {
//!   "version": 1,
//!   "presets": [
//!     {"name": "demo", "seed": 42, "counts": {"orgs": 3, "usersPerOrg": 5}}
//!   ]
//! }
//! ```
//!
//! Counts omitted from a preset take their documented defaults.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::{GenerationConfig, RawCounts};
use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A registry of named generation presets.
///
/// # Example
///
/// ```
/// use mock_data::PresetRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "presets": [{"name": "tiny", "seed": 7, "counts": {"orgs": 1}}]
/// }"#;
///
/// let registry = PresetRegistry::from_json(json).expect("valid registry");
/// let preset = registry.find_preset("tiny").expect("preset found");
/// assert_eq!(preset.seed(), 7);
/// assert_eq!(preset.config().orgs, 1);
/// assert_eq!(preset.config().users_per_org, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetRegistry {
    version: u32,
    presets: Vec<Preset>,
}

impl PresetRegistry {
    /// Parses a preset registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or has unknown count keys
    /// - The version is unsupported
    /// - The presets array is empty
    /// - Two presets share a name
    /// - A preset declares a negative or overflowing count
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawPresetRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a preset registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawPresetRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.presets.is_empty() {
            return Err(RegistryError::EmptyPresets);
        }

        let mut names = BTreeSet::new();
        let mut presets = Vec::with_capacity(raw.presets.len());
        for entry in raw.presets {
            if !names.insert(entry.name.clone()) {
                return Err(RegistryError::DuplicatePreset { name: entry.name });
            }
            let config = match GenerationConfig::try_from(entry.counts) {
                Ok(config) => config,
                Err(source) => {
                    return Err(RegistryError::InvalidCounts {
                        name: entry.name,
                        source,
                    });
                }
            };
            presets.push(Preset {
                name: entry.name,
                seed: entry.seed,
                config,
            });
        }

        Ok(Self {
            version: raw.version,
            presets,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all presets in file order.
    #[must_use]
    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Finds a preset by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PresetNotFound`] if no preset with the given
    /// name exists.
    pub fn find_preset(&self, name: &str) -> Result<&Preset, RegistryError> {
        self.presets
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| RegistryError::PresetNotFound {
                name: name.to_owned(),
            })
    }
}

/// A named seed and validated counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    name: String,
    seed: u64,
    config: GenerationConfig,
}

impl Preset {
    /// Returns the preset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the collection counts.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPresetRegistry {
    version: u32,
    presets: Vec<RawPreset>,
}

/// Raw JSON representation of a preset.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPreset {
    name: String,
    seed: u64,
    #[serde(default)]
    counts: RawCounts,
}
