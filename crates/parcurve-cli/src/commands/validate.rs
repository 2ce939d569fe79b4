//! Validate command implementation.
//!
//! Builds and registers every instrument of a curve file without solving,
//! reporting each problem instead of stopping at the first.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use parcurve_curves::prelude::*;

use crate::cli::OutputFormat;
use crate::config::{base_dir, CurveFile};
use crate::error::CliError;
use crate::output::{print_error, print_output, print_success};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Curve definition (TOML)
    pub file: PathBuf,
}

#[derive(Tabled, Serialize)]
struct ValidationRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Instrument")]
    instrument: String,
    #[tabled(rename = "Pillar")]
    pillar: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Execute the validate command.
pub fn execute(args: ValidateArgs, format: OutputFormat) -> Result<()> {
    let file = CurveFile::load(&args.file)?;
    let mut curve = file.empty_curve(&base_dir(&args.file))?;

    let mut failures = 0;
    let rows: Vec<ValidationRow> = file
        .instruments
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let index = i + 1;
            let registered = spec.to_instrument(index, file.valuation_date).and_then(|instrument| {
                let description = instrument.description();
                let pillar = instrument.maturity();
                curve
                    .add_instrument(instrument)
                    .map(|()| (description, pillar))
                    .map_err(|source| CliError::Instrument { index, source })
            });

            match registered {
                Ok((instrument, pillar)) => ValidationRow {
                    index,
                    kind: spec.kind.to_string(),
                    instrument,
                    pillar: pillar.to_string(),
                    status: "ok".to_string(),
                },
                Err(err) => {
                    failures += 1;
                    ValidationRow {
                        index,
                        kind: spec.kind.to_string(),
                        instrument: "-".to_string(),
                        pillar: "-".to_string(),
                        status: status_message(&err),
                    }
                }
            }
        })
        .collect();

    print_output(&rows, format)?;

    if failures > 0 {
        if format == OutputFormat::Table {
            print_error(&format!("{failures} of {} instruments invalid", rows.len()));
        }
        anyhow::bail!("{} is invalid", args.file.display());
    }

    if format == OutputFormat::Table {
        print_success(&format!("{} instruments registered", rows.len()));
    }
    Ok(())
}

fn status_message(err: &CliError) -> String {
    match err {
        CliError::Instrument { source, .. } => source.to_string(),
        CliError::MissingField { field, .. } => format!("missing `{field}`"),
        other => other.to_string(),
    }
}
