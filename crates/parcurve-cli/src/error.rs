//! CLI error types.

use std::path::PathBuf;

use parcurve_curves::CurveError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Curve file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Curve file is not valid TOML or does not match the curve schema.
    #[error("Invalid curve file {}: {source}", path.display())]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// Discount curve snapshot is not valid JSON.
    #[error("Invalid discount curve {}: {source}", path.display())]
    Snapshot {
        /// File path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// An instrument entry is missing a field its type needs.
    #[error("Instrument #{index} ({kind}): missing `{field}`")]
    MissingField {
        /// One-based position in the file.
        index: usize,
        /// Instrument type.
        kind: String,
        /// Missing field name.
        field: &'static str,
    },

    /// An instrument could not be built or registered.
    #[error("Instrument #{index}: {source}")]
    Instrument {
        /// One-based position in the file.
        index: usize,
        /// Underlying curve error.
        source: CurveError,
    },

    /// Invalid date argument.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Curve error outside of instrument registration.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
