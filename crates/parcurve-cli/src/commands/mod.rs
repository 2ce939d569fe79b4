//! CLI command implementations.

pub mod bootstrap;
pub mod df;
pub mod validate;

pub use bootstrap::BootstrapArgs;
pub use df::DfArgs;
pub use validate::ValidateArgs;

use parcurve_core::Date;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    s.trim()
        .parse::<Date>()
        .map_err(|_| CliError::InvalidDate(s.to_string()))
}
