//! TOML curve definitions.
//!
//! ```toml
//! valuation_date = "2016-03-16"
//! interpolation = "log-linear"
//!
//! [solver]
//! tolerance = 1e-12
//! max_iterations = 100
//!
//! [[instruments]]
//! type = "deposit"
//! rate = -0.00293
//! maturity = "5D"
//!
//! [[instruments]]
//! type = "swap"
//! rate = 0.0095
//! maturity = "3Y"
//! conventions = { fixed_length = 12, float_length = 6 }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use parcurve_core::{Date, Tenor};
use parcurve_curves::prelude::*;
use serde::Deserialize;

use crate::error::{CliError, CliResult};

/// A curve file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurveFile {
    /// Valuation date.
    pub valuation_date: Date,

    /// Pillar interpolation.
    #[serde(default)]
    pub interpolation: InterpolationMethod,

    /// Root finder settings.
    #[serde(default)]
    pub solver: SolverConfig,

    /// Solve deposits, FRAs and futures in closed form when possible.
    #[serde(default = "default_closed_form")]
    pub closed_form: bool,

    /// JSON discount curve snapshot for term swaps, relative to the curve file.
    pub discount_curve: Option<PathBuf>,

    /// Market instruments, in any order.
    #[serde(default)]
    pub instruments: Vec<InstrumentSpec>,
}

fn default_closed_form() -> bool {
    true
}

/// Instrument types accepted in curve files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentType {
    /// Cash deposit.
    Deposit,
    /// Forward rate agreement.
    #[serde(alias = "forward-rate")]
    Fra,
    /// Interest rate future.
    Future,
    /// Future on a compounded overnight rate.
    #[serde(rename = "compound-future")]
    CompoundFuture,
    /// Overnight index swap.
    Ois,
    /// Fixed against term rate swap.
    #[serde(alias = "term-swap")]
    Swap,
    /// Term rate against average overnight rate basis swap.
    #[serde(rename = "average-basis")]
    AverageBasis,
    /// Compounded overnight against compounded overnight basis swap.
    #[serde(rename = "compound-basis")]
    CompoundBasis,
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstrumentType::Deposit => "deposit",
            InstrumentType::Fra => "fra",
            InstrumentType::Future => "future",
            InstrumentType::CompoundFuture => "compound-future",
            InstrumentType::Ois => "ois",
            InstrumentType::Swap => "swap",
            InstrumentType::AverageBasis => "average-basis",
            InstrumentType::CompoundBasis => "compound-basis",
        };
        write!(f, "{name}")
    }
}

/// One `[[instruments]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentSpec {
    /// Instrument type.
    #[serde(rename = "type")]
    pub kind: InstrumentType,
    /// Quoted rate (decimal). The spread for basis swaps.
    pub rate: Option<f64>,
    /// Futures price.
    pub price: Option<f64>,
    /// Effective or start date. Defaults to the valuation date.
    pub effective: Option<Date>,
    /// End date or tenor from the effective date.
    pub maturity: Option<Maturity>,
    /// IMM contract code for futures (e.g. "H19").
    pub code: Option<String>,
    /// Futures contract length when given by IMM code. Defaults to 3M.
    pub tenor: Option<Tenor>,
    /// Convention overrides.
    #[serde(default)]
    pub conventions: BTreeMap<String, toml::Value>,
}

impl InstrumentSpec {
    /// Builds the instrument. `index` is the one-based position in the file.
    pub fn to_instrument(&self, index: usize, valuation_date: Date) -> CliResult<Instrument> {
        let wrap = |source: CurveError| CliError::Instrument { index, source };

        let instrument: Instrument = match self.kind {
            InstrumentType::Deposit => Deposit::new(
                self.effective.unwrap_or(valuation_date),
                self.require(index, "maturity", self.maturity)?,
                self.require(index, "rate", self.rate)?,
                self.money_market().map_err(wrap)?,
            )
            .map_err(wrap)?
            .into(),
            InstrumentType::Fra => ForwardRate::new(
                self.require(index, "effective", self.effective)?,
                self.require(index, "maturity", self.maturity)?,
                self.require(index, "rate", self.rate)?,
                self.money_market().map_err(wrap)?,
            )
            .map_err(wrap)?
            .into(),
            InstrumentType::Future => {
                let price = self.require(index, "price", self.price)?;
                let conventions = self.money_market().map_err(wrap)?;
                match &self.code {
                    Some(code) => Future::from_imm(code, self.contract_tenor(), price, conventions),
                    None => Future::new(
                        self.require(index, "effective", self.effective)?,
                        self.require(index, "maturity", self.maturity)?,
                        price,
                        conventions,
                    ),
                }
                .map_err(wrap)?
                .into()
            }
            InstrumentType::CompoundFuture => {
                let price = self.require(index, "price", self.price)?;
                let conventions = self.money_market().map_err(wrap)?;
                match &self.code {
                    Some(code) => {
                        CompoundFuture::from_imm(code, self.contract_tenor(), price, conventions)
                    }
                    None => CompoundFuture::new(
                        self.require(index, "effective", self.effective)?,
                        self.require(index, "maturity", self.maturity)?,
                        price,
                        conventions,
                    ),
                }
                .map_err(wrap)?
                .into()
            }
            InstrumentType::Ois => OvernightIndexSwap::new(
                self.effective.unwrap_or(valuation_date),
                self.require(index, "maturity", self.maturity)?,
                self.require(index, "rate", self.rate)?,
                self.swap().map_err(wrap)?,
            )
            .map_err(wrap)?
            .into(),
            InstrumentType::Swap => TermSwap::new(
                self.effective.unwrap_or(valuation_date),
                self.require(index, "maturity", self.maturity)?,
                self.require(index, "rate", self.rate)?,
                self.swap().map_err(wrap)?,
            )
            .map_err(wrap)?
            .into(),
            InstrumentType::AverageBasis | InstrumentType::CompoundBasis => {
                let style = if self.kind == InstrumentType::AverageBasis {
                    BasisSwapStyle::AverageIndex
                } else {
                    BasisSwapStyle::CompoundIndex
                };
                BasisSwap::new(
                    style,
                    self.effective.unwrap_or(valuation_date),
                    self.require(index, "maturity", self.maturity)?,
                    self.require(index, "rate", self.rate)?,
                    self.basis().map_err(wrap)?,
                )
                .map_err(wrap)?
                .into()
            }
        };

        Ok(instrument)
    }

    fn require<T>(&self, index: usize, field: &'static str, value: Option<T>) -> CliResult<T> {
        value.ok_or_else(|| CliError::MissingField {
            index,
            kind: self.kind.to_string(),
            field,
        })
    }

    fn convention_pairs(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.conventions.iter().map(|(key, value)| {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.as_str(), text)
        })
    }

    fn money_market(&self) -> CurveResult<MoneyMarketConventions> {
        MoneyMarketConventions::from_pairs(self.convention_pairs())
    }

    fn swap(&self) -> CurveResult<SwapConventions> {
        SwapConventions::from_pairs(self.convention_pairs())
    }

    fn basis(&self) -> CurveResult<BasisSwapConventions> {
        BasisSwapConventions::from_pairs(self.convention_pairs())
    }

    fn contract_tenor(&self) -> Tenor {
        self.tenor.unwrap_or(Tenor::months(3))
    }
}

impl CurveFile {
    /// Reads and parses a curve file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> CliResult<Self> {
        toml::from_str(content).map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An empty curve with this file's settings and discount curve.
    pub fn empty_curve(&self, base_dir: &Path) -> CliResult<Curve> {
        let config = BootstrapConfig::default()
            .with_solver(self.solver)
            .with_closed_form(self.closed_form);
        let curve = Curve::new(self.valuation_date)
            .with_interpolation(self.interpolation)
            .with_config(config);

        match &self.discount_curve {
            Some(path) => Ok(curve.with_discount_curve(load_snapshot(&base_dir.join(path))?)?),
            None => Ok(curve),
        }
    }

    /// Builds the curve with every instrument registered. Nothing is solved yet.
    pub fn build(&self, base_dir: &Path) -> CliResult<Curve> {
        let mut curve = self.empty_curve(base_dir)?;
        for (i, spec) in self.instruments.iter().enumerate() {
            let index = i + 1;
            let instrument = spec.to_instrument(index, self.valuation_date)?;
            curve
                .add_instrument(instrument)
                .map_err(|source| CliError::Instrument { index, source })?;
        }
        Ok(curve)
    }
}

/// Loads a curve file and registers its instruments.
pub fn load_curve(path: &Path) -> CliResult<Curve> {
    let file = CurveFile::load(path)?;
    file.build(&base_dir(path))
}

/// Directory relative paths in a curve file are resolved against.
pub fn base_dir(path: &Path) -> PathBuf {
    path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn load_snapshot(path: &Path) -> CliResult<DiscountCurve> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}
