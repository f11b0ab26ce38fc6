//! Error types for the generation CLI.

use thiserror::Error;

use crate::error::{ConfigError, GenerationError, OutputError, RegistryError};

/// Errors surfaced by the CLI resolution and run flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// The preset registry could not be loaded or queried.
    #[error("registry error: {source}")]
    RegistryError {
        /// Underlying registry error.
        #[from]
        #[source]
        source: RegistryError,
    },
    /// Count flags produced an invalid configuration.
    #[error("configuration error: {source}")]
    ConfigError {
        /// Underlying configuration error.
        #[from]
        #[source]
        source: ConfigError,
    },
    /// Snapshot generation failed.
    #[error("generation error: {source}")]
    GenerationError {
        /// Underlying generation error.
        #[from]
        #[source]
        source: GenerationError,
    },
    /// The snapshot could not be written.
    #[error("output error: {source}")]
    OutputError {
        /// Underlying output error.
        #[from]
        #[source]
        source: OutputError,
    },
}
