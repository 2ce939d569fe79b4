//! Bootstrap command implementation.
//!
//! Solves a curve file and prints its pillars, zero rates or repricing report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use parcurve_core::Date;
use parcurve_curves::prelude::*;

use crate::cli::OutputFormat;
use crate::config::load_curve;
use crate::output::{
    format_df, format_percent, format_residual, print_header, print_json, print_output,
};

/// Arguments for the bootstrap command.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// Curve definition (TOML)
    pub file: PathBuf,

    /// Print continuously compounded ACT/365F zero rates
    #[arg(long, conflicts_with = "repricing")]
    pub zeros: bool,

    /// Reprice every instrument against the solved curve
    #[arg(long)]
    pub repricing: bool,

    /// Write the solved curve as a JSON discount curve snapshot
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,
}

#[derive(Tabled, Serialize)]
struct PillarRow {
    #[tabled(rename = "Date")]
    date: Date,
    #[tabled(rename = "Discount Factor", display_with = "format_df")]
    discount_factor: f64,
    #[tabled(rename = "Instrument")]
    instrument: String,
}

#[derive(Tabled, Serialize)]
struct ZeroRow {
    #[tabled(rename = "Date")]
    date: Date,
    #[tabled(rename = "Zero Rate (%)", display_with = "format_percent")]
    rate: f64,
}

#[derive(Tabled, Serialize)]
struct RepricingRow {
    #[tabled(rename = "Instrument")]
    instrument: String,
    #[tabled(rename = "Pillar")]
    maturity: Date,
    #[tabled(rename = "Discount Factor", display_with = "format_df")]
    discount_factor: f64,
    #[tabled(rename = "Residual", display_with = "format_residual")]
    residual: f64,
    #[tabled(rename = "Passed")]
    passed: bool,
}

/// Execute the bootstrap command.
pub fn execute(args: BootstrapArgs, format: OutputFormat) -> Result<()> {
    let mut curve = load_curve(&args.file)?;
    curve.bootstrap()?;

    if let Some(path) = &args.snapshot {
        let snapshot = curve.snapshot()?;
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Wrote discount curve snapshot");
    }

    if format == OutputFormat::Table {
        print_header("Bootstrapped Curve");
        println!("Valuation Date: {}", curve.valuation_date());
        println!("Interpolation:  {}", curve.interpolation());
        println!("Instruments:    {}", curve.instruments().len());
        println!();
    }

    if args.repricing {
        output_repricing(&mut curve, format)
    } else if args.zeros {
        output_zeros(&mut curve, format)
    } else {
        output_pillars(&mut curve, format)
    }
}

fn output_pillars(curve: &mut Curve, format: OutputFormat) -> Result<()> {
    let pillars = curve.view()?.to_vec();
    let labels = std::iter::once("Valuation".to_string())
        .chain(curve.instruments().iter().map(CurveInstrument::description));

    let rows: Vec<PillarRow> = pillars
        .iter()
        .zip(labels)
        .map(|(pillar, instrument)| PillarRow {
            date: pillar.date,
            discount_factor: pillar.discount_factor,
            instrument,
        })
        .collect();

    print_output(&rows, format)
}

fn output_zeros(curve: &mut Curve, format: OutputFormat) -> Result<()> {
    let rows: Vec<ZeroRow> = curve
        .zeros()?
        .into_iter()
        .map(|z| ZeroRow {
            date: z.date,
            rate: z.rate,
        })
        .collect();

    print_output(&rows, format)
}

fn output_repricing(curve: &mut Curve, format: OutputFormat) -> Result<()> {
    let report = curve.repricing_report()?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<RepricingRow> = report
                .checks()
                .iter()
                .map(|c| RepricingRow {
                    instrument: c.instrument.clone(),
                    maturity: c.maturity,
                    discount_factor: c.discount_factor,
                    residual: c.residual,
                    passed: c.passed,
                })
                .collect();
            print_output(&rows, format)?;

            if format == OutputFormat::Table {
                println!();
                println!(
                    "{}/{} passed, max error {:.2e}, RMS {:.2e}",
                    report.passed_count(),
                    report.total_count(),
                    report.max_error(),
                    report.rms_error()
                );
            }
        }
    }

    if !report.is_valid() {
        anyhow::bail!(
            "Repricing failed for: {}",
            report.failed_instruments().join(", ")
        );
    }
    Ok(())
}
