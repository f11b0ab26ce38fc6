//! Error types for the mock-data crate.
//!
//! This module defines semantic error enums for configuration validation,
//! graph generation, preset registry parsing, and output writing, following
//! the project's error handling conventions with `thiserror`.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while validating cardinality parameters.
///
/// A configuration error always aborts the whole generation run; values are
/// never clamped into range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A count parameter was negative.
    #[error("count '{parameter}' must be non-negative, found {value}")]
    NegativeCount {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// The planned size of a collection does not fit in memory addressing.
    #[error("planned size of '{collection}' overflows the supported range")]
    CardinalityOverflow {
        /// Collection whose planned record count overflowed.
        collection: &'static str,
    },
}

/// Errors that can occur during graph generation.
///
/// Generation is all-or-nothing: when any of these is returned no partial
/// collections are exposed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The supplied configuration was rejected before generation started.
    #[error("invalid configuration: {source}")]
    InvalidConfig {
        /// Underlying configuration error.
        #[from]
        #[source]
        source: ConfigError,
    },

    /// A reference table had no entries to draw from.
    #[error("catalog '{catalog}' has no entries")]
    EmptyCatalog {
        /// Name of the empty catalog.
        catalog: &'static str,
    },

    /// The reference instant could not be offset without leaving the
    /// representable date range.
    #[error("timestamp offset of {minutes} minutes from the reference instant is out of range")]
    TimestampOutOfRange {
        /// Offset that could not be applied, in minutes.
        minutes: i64,
    },

    /// A calendar date before the reference day could not be represented.
    #[error("date {days} days before the reference day is out of range")]
    DateOutOfRange {
        /// Offset that could not be applied, in days.
        days: u64,
    },
}

/// Errors that can occur when parsing or querying a preset registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no presets.
    #[error("registry contains no presets")]
    EmptyPresets,

    /// Two presets share a name.
    #[error("preset '{name}' is defined more than once")]
    DuplicatePreset {
        /// The repeated preset name.
        name: String,
    },

    /// A preset declared invalid counts.
    #[error("preset '{name}' has invalid counts: {source}")]
    InvalidCounts {
        /// Name of the preset.
        name: String,
        /// Underlying configuration error.
        #[source]
        source: ConfigError,
    },

    /// The requested preset name was not found in the registry.
    #[error("preset '{name}' not found in registry")]
    PresetNotFound {
        /// The preset name that was not found.
        name: String,
    },
}

/// Errors raised while writing a generated snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// The snapshot could not be encoded as JSON.
    #[error("failed to encode snapshot: {message}")]
    EncodeError {
        /// Description of the encoding failure.
        message: String,
    },

    /// The output file could not be written.
    #[error("failed to write output file at '{path}': {message}")]
    WriteError {
        /// Path to the output file.
        path: Utf8PathBuf,
        /// Description of the write error.
        message: String,
    },
}
