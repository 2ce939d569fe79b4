//! Discount factor command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use parcurve_core::Date;
use parcurve_curves::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::config::load_curve;
use crate::output::{format_df, format_percent, print_output};

/// Arguments for the df command.
#[derive(Args, Debug)]
pub struct DfArgs {
    /// Curve definition (TOML)
    pub file: PathBuf,

    /// Dates (YYYY-MM-DD)
    #[arg(required = true)]
    pub dates: Vec<String>,

    /// Compounding of the reported zero rate
    #[arg(short, long, default_value = "continuous")]
    pub compounding: String,
}

#[derive(Tabled, Serialize)]
struct DfRow {
    #[tabled(rename = "Date")]
    date: Date,
    #[tabled(rename = "Discount Factor", display_with = "format_df")]
    discount_factor: f64,
    #[tabled(rename = "Zero Rate (%)", display_with = "format_percent")]
    zero_rate: f64,
}

/// Execute the df command.
pub fn execute(args: DfArgs, format: OutputFormat) -> Result<()> {
    let compounding: Compounding = args.compounding.parse()?;
    let dates = args
        .dates
        .iter()
        .map(|s| parse_date(s))
        .collect::<Result<Vec<_>, _>>()?;

    let mut curve = load_curve(&args.file)?;

    let rows = dates
        .into_iter()
        .map(|date| {
            Ok(DfRow {
                date,
                discount_factor: curve.discount_factor(date)?,
                zero_rate: curve.zero_rate(date, compounding)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    print_output(&rows, format)
}
